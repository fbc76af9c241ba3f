//! Avatar download and JPEG re-encoding for the document exporter.

use std::io::Cursor;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use image::ExtendedColorType;
use image::codecs::jpeg::JpegEncoder;

/// A JPEG ready to embed with `DCTDecode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    pub jpeg: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Where avatar bytes come from.
#[async_trait]
pub trait AvatarSource: Send + Sync {
    /// Raw image bytes in any format the `image` crate decodes.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Fetches avatars over HTTP.
#[derive(Clone)]
pub struct HttpAvatarSource {
    client: reqwest::Client,
}

impl HttpAvatarSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build avatar HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl AvatarSource for HttpAvatarSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch avatar from {url}"))?
            .error_for_status()
            .context("Avatar service returned an error status")?;
        let bytes = response.bytes().await.context("Failed to read avatar body")?;
        Ok(bytes.to_vec())
    }
}

/// Decodes any supported image and re-encodes it as baseline RGB JPEG.
///
/// # Arguments
///
/// * `bytes` - Source image
/// * `quality` - JPEG quality, 1..=100
pub fn encode_jpeg(bytes: &[u8], quality: u8) -> Result<EmbeddedImage> {
    let decoded = image::load_from_memory(bytes).context("Unsupported avatar image")?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut out = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut out, quality)
        .encode(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
        .context("Failed to encode avatar as JPEG")?;

    Ok(EmbeddedImage {
        jpeg: out.into_inner(),
        width,
        height,
    })
}


#[cfg(test)]
mod tests {
    use super::test_support::png_bytes;
    use super::*;

    #[test]
    fn test_png_is_reencoded_as_jpeg() {
        let image = encode_jpeg(&png_bytes(24, 16), 98).unwrap();

        assert_eq!((image.width, image.height), (24, 16));
        // JPEG SOI marker
        assert_eq!(&image.jpeg[..2], &[0xFF, 0xD8]);

        let decoded = image::load_from_memory(&image.jpeg).unwrap();
        assert_eq!(decoded.color(), image::ColorType::Rgb8);
    }

    #[test]
    fn test_lower_quality_is_smaller() {
        let png = png_bytes(64, 64);
        let high = encode_jpeg(&png, 98).unwrap();
        let low = encode_jpeg(&png, 10).unwrap();
        assert!(low.jpeg.len() < high.jpeg.len());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(encode_jpeg(b"not an image", 98).is_err());
    }
}
