//! PDF document exporter built on lopdf.
//!
//! Lays a [`PersonaView`] out on A4 pages with the standard Helvetica fonts,
//! an optional avatar image, word wrap and pagination.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};
use persona_core::error::{PersonaError, Result};
use persona_core::export::{DocumentExporter, ExportOptions};
use persona_core::persona::{PersonaView, SectionBody};

use crate::avatar::{AvatarSource, EmbeddedImage, encode_jpeg};
use crate::pdf_text::{Face, encode_win_ansi, text_width, wrap};

const PT_PER_MM: f32 = 72.0 / 25.4;
const AVATAR_SIZE_MM: f32 = 30.0;
const AVATAR_RESOURCE: &str = "Im1";

const HEADING_SIZE: f32 = 18.0;
const NAME_SIZE: f32 = 16.0;
const SECTION_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 11.0;
const META_SIZE: f32 = 9.0;
const LINE_SPACING: f32 = 1.35;
const BULLET: &str = "• ";

/// Writes persona maps as PDF files into a fixed output directory.
#[derive(Clone)]
pub struct PdfExporter {
    output_dir: PathBuf,
    avatars: Option<Arc<dyn AvatarSource>>,
}

impl PdfExporter {
    /// Creates an exporter that embeds avatars fetched from `avatars`.
    pub fn new(output_dir: impl Into<PathBuf>, avatars: Arc<dyn AvatarSource>) -> Self {
        Self {
            output_dir: output_dir.into(),
            avatars: Some(avatars),
        }
    }

    /// Creates an exporter that never fetches the avatar.
    pub fn without_avatar(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            avatars: None,
        }
    }

    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    /// Avatar fetch failures are logged and the document goes without it.
    async fn load_avatar(&self, url: &str, quality: u8) -> Option<EmbeddedImage> {
        let source = self.avatars.as_ref()?;
        let bytes = match source.fetch(url).await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(error = %err, "Avatar unavailable, exporting without it");
                return None;
            }
        };
        match encode_jpeg(&bytes, quality) {
            Ok(image) => Some(image),
            Err(err) => {
                tracing::warn!(error = %err, "Avatar could not be re-encoded, exporting without it");
                None
            }
        }
    }
}

#[async_trait]
impl DocumentExporter for PdfExporter {
    fn is_available(&self) -> bool {
        self.output_dir.is_dir()
    }

    async fn export(
        &self,
        view: &PersonaView,
        file_name: &str,
        options: &ExportOptions,
    ) -> Result<PathBuf> {
        let avatar = self
            .load_avatar(&view.header.avatar_url, options.jpeg_quality())
            .await;
        let generated_at = chrono::Local::now();

        let bytes = render_pdf(view, options, avatar.as_ref(), generated_at)?;

        let path = self.output_dir.join(file_name);
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            PersonaError::export(format!("Failed to write {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), with_avatar = avatar.is_some(), "PDF written");
        Ok(path)
    }
}

/// Renders the whole document into memory.
pub fn render_pdf(
    view: &PersonaView,
    options: &ExportOptions,
    avatar: Option<&EmbeddedImage>,
    generated_at: chrono::DateTime<chrono::Local>,
) -> Result<Vec<u8>> {
    let mut layout = PageLayout::new(options);
    layout.persona(view, avatar.is_some());
    layout.gap(BODY_SIZE);
    layout.line(
        &format!("Gerado em {}", generated_at.format("%d/%m/%Y %H:%M")),
        Face::Oblique,
        META_SIZE,
        0.0,
    );

    let title = format!("Persona - {}", view.header.name);
    assemble(layout, options, avatar, &title)
}

/// Cursor-based writer that turns laid-out lines into per-page operations.
struct PageLayout {
    page_width: f32,
    page_height: f32,
    margin_top: f32,
    margin_right: f32,
    margin_bottom: f32,
    margin_left: f32,
    pages: Vec<Vec<Operation>>,
    y: f32,
}

impl PageLayout {
    fn new(options: &ExportOptions) -> Self {
        let (width_mm, height_mm) = options.page_size_mm();
        let [top, right, bottom, left] = options.margins_mm.map(|mm| mm * PT_PER_MM);
        let page_height = height_mm * PT_PER_MM;
        Self {
            page_width: width_mm * PT_PER_MM,
            page_height,
            margin_top: top,
            margin_right: right,
            margin_bottom: bottom,
            margin_left: left,
            pages: vec![Vec::new()],
            y: page_height - top,
        }
    }

    fn content_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    fn current(&mut self) -> &mut Vec<Operation> {
        // `pages` starts with one page and only ever grows.
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Starts a new page when `height` does not fit above the bottom margin.
    fn reserve(&mut self, height: f32) {
        if self.y - height < self.margin_bottom {
            self.pages.push(Vec::new());
            self.y = self.page_height - self.margin_top;
        }
    }

    fn gap(&mut self, size: f32) {
        self.y -= size * 0.6;
    }

    /// Writes one pre-wrapped line at `indent` points from the left margin.
    fn line(&mut self, text: &str, face: Face, size: f32, indent: f32) {
        let height = size * LINE_SPACING;
        self.reserve(height);
        self.y -= height;
        let x = self.margin_left + indent;
        let y = self.y + (height - size);
        self.current().extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![face.resource().into(), size.into()]),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);
    }

    fn paragraph(&mut self, text: &str, face: Face, size: f32, indent: f32) {
        let width = self.content_width() - indent;
        for line in wrap(text, face, size, width) {
            self.line(&line, face, size, indent);
        }
    }

    fn bullet(&mut self, text: &str) {
        let hang = text_width(BULLET, Face::Regular, BODY_SIZE);
        let width = self.content_width() - hang;
        for (i, line) in wrap(text, Face::Regular, BODY_SIZE, width).iter().enumerate() {
            if i == 0 {
                self.line(&format!("{BULLET}{line}"), Face::Regular, BODY_SIZE, 0.0);
            } else {
                self.line(line, Face::Regular, BODY_SIZE, hang);
            }
        }
    }

    fn rule(&mut self) {
        self.reserve(4.0);
        self.y -= 4.0;
        let (x1, x2, y) = (self.margin_left, self.page_width - self.margin_right, self.y);
        self.current().extend([
            Operation::new("w", vec![0.5_f32.into()]),
            Operation::new("m", vec![x1.into(), y.into()]),
            Operation::new("l", vec![x2.into(), y.into()]),
            Operation::new("S", vec![]),
        ]);
        self.y -= 4.0;
    }

    fn persona(&mut self, view: &PersonaView, with_avatar: bool) {
        let header = &view.header;
        self.line(view.heading, Face::Bold, HEADING_SIZE, 0.0);
        self.rule();

        let top = self.y;
        let indent = if with_avatar {
            let size = AVATAR_SIZE_MM * PT_PER_MM;
            self.reserve(size);
            let (x, y) = (self.margin_left, self.y - size);
            self.current().extend([
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![size.into(), 0.into(), 0.into(), size.into(), x.into(), y.into()],
                ),
                Operation::new("Do", vec![AVATAR_RESOURCE.into()]),
                Operation::new("Q", vec![]),
            ]);
            size + 4.0 * PT_PER_MM
        } else {
            0.0
        };

        self.paragraph(&header.name, Face::Bold, NAME_SIZE, indent);
        self.paragraph(&header.job_title, Face::Regular, BODY_SIZE + 1.0, indent);
        let meta = [
            header.location.as_str(),
            header.industry.as_str(),
            header.education.as_str(),
            header.age_range.as_str(),
        ]
        .join(" | ");
        self.paragraph(&meta, Face::Regular, META_SIZE, indent);

        if with_avatar {
            self.y = self.y.min(top - AVATAR_SIZE_MM * PT_PER_MM);
        }

        self.gap(BODY_SIZE);
        self.paragraph(&format!("“{}”", header.quote), Face::Oblique, BODY_SIZE + 1.0, 0.0);

        for section in &view.sections {
            self.gap(SECTION_SIZE);
            self.reserve(SECTION_SIZE * LINE_SPACING + BODY_SIZE * LINE_SPACING);
            self.line(section.title, Face::Bold, SECTION_SIZE, 0.0);
            match &section.body {
                SectionBody::Paragraph(text) => self.paragraph(text, Face::Regular, BODY_SIZE, 0.0),
                SectionBody::Bullets(items) => {
                    for item in items {
                        self.bullet(item);
                    }
                }
                SectionBody::Tags(items) => {
                    self.paragraph(&items.join(" · "), Face::Regular, BODY_SIZE, 0.0)
                }
            }
        }
    }
}

fn assemble(
    layout: PageLayout,
    options: &ExportOptions,
    avatar: Option<&EmbeddedImage>,
    title: &str,
) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = lopdf::Dictionary::new();
    for face in [Face::Regular, Face::Bold, Face::Oblique] {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.resource(), font_id);
    }

    let mut resources = dictionary! { "Font" => fonts };
    if let Some(image) = avatar {
        // Already JPEG; DCTDecode streams must not be re-compressed.
        let image_id = doc.add_object(
            Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => i64::from(image.width),
                    "Height" => i64::from(image.height),
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => 8,
                    "Filter" => "DCTDecode",
                },
                image.jpeg.clone(),
            )
            .with_compression(false),
        );
        resources.set("XObject", dictionary! { AVATAR_RESOURCE => image_id });
    }
    let resources_id = doc.add_object(resources);

    let mut kids: Vec<Object> = Vec::with_capacity(layout.pages.len());
    for operations in layout.pages {
        let encoded = Content { operations }
            .encode()
            .map_err(|e| PersonaError::export(format!("Failed to encode page content: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let (width_mm, height_mm) = options.page_size_mm();
    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                (width_mm * PT_PER_MM).into(),
                (height_mm * PT_PER_MM).into(),
            ],
        }),
    );

    let catalog_id: ObjectId = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(encode_win_ansi(title), StringFormat::Literal),
        "Producer" => Object::string_literal("persona-architect"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| PersonaError::export(format!("Failed to serialize PDF: {e}")))?;
    Ok(bytes)
}
