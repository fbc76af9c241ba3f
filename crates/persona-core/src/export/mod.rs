//! Document export boundary.
//!
//! The presenter hands a [`PersonaView`] to a [`DocumentExporter`] together
//! with a deterministic file name and the fixed [`ExportOptions`].

use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;
use crate::persona::PersonaView;

const AVATAR_BASE_URL: &str = "https://i.pravatar.cc/300";

// Literal pattern, safe to unwrap
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Deterministic avatar image URL keyed by the persona name.
pub fn avatar_url(name: &str) -> String {
    format!("{AVATAR_BASE_URL}?u={}", urlencoding::encode(name))
}

/// `Persona_<name>.pdf`, with every whitespace run replaced by `_`.
pub fn export_file_name(name: &str) -> String {
    format!("Persona_{}.pdf", WHITESPACE_RUN.replace_all(name, "_"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFormat {
    A4,
}

impl PageFormat {
    /// Width and height in millimetres, portrait.
    pub fn size_mm(self) -> (f32, f32) {
        match self {
            PageFormat::A4 => (210.0, 297.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Fixed export settings. Not user-configurable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    /// Top, right, bottom, left, in millimetres
    pub margins_mm: [f32; 4],
    /// JPEG quality for embedded images, 0.0..=1.0
    pub image_quality: f32,
    pub format: PageFormat,
    pub orientation: Orientation,
}

impl ExportOptions {
    pub const STANDARD: ExportOptions = ExportOptions {
        margins_mm: [10.0, 10.0, 10.0, 10.0],
        image_quality: 0.98,
        format: PageFormat::A4,
        orientation: Orientation::Portrait,
    };

    /// Page width and height in millimetres after applying the orientation.
    pub fn page_size_mm(&self) -> (f32, f32) {
        let (w, h) = self.format.size_mm();
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    /// Image quality on the 1..=100 scale used by JPEG encoders.
    pub fn jpeg_quality(&self) -> u8 {
        (self.image_quality * 100.0).round().clamp(1.0, 100.0) as u8
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Renders a persona view into a portable document.
#[async_trait::async_trait]
pub trait DocumentExporter: Send + Sync {
    /// Whether the rendering backend can be used at all. When it cannot,
    /// callers fall back to printing the plain-text view.
    fn is_available(&self) -> bool;

    /// Writes the document and returns where it landed.
    async fn export(
        &self,
        view: &PersonaView,
        file_name: &str,
        options: &ExportOptions,
    ) -> Result<PathBuf>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_collapses_whitespace_runs() {
        assert_eq!(export_file_name("Ana Paula  Souza"), "Persona_Ana_Paula_Souza.pdf");
        assert_eq!(export_file_name(" Ana\tSouza "), "Persona__Ana_Souza_.pdf");
        assert_eq!(export_file_name("Carlos"), "Persona_Carlos.pdf");
    }

    #[test]
    fn test_avatar_url_is_deterministic_and_encoded() {
        assert_eq!(avatar_url("João Silva"), avatar_url("João Silva"));
        assert_eq!(
            avatar_url("João Silva"),
            "https://i.pravatar.cc/300?u=Jo%C3%A3o%20Silva"
        );
    }

    #[test]
    fn test_standard_options() {
        let options = ExportOptions::default();
        assert_eq!(options.margins_mm, [10.0; 4]);
        assert_eq!(options.page_size_mm(), (210.0, 297.0));
        assert_eq!(options.jpeg_quality(), 98);
    }
}
