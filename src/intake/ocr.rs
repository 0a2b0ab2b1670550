//! Business-card and ID image handling
//!
//! There is no text recognition in this crate. [`SimulatedOcr`] stands in for
//! an external service behind the [`ImageTextExtractor`] seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::attachment::Attachment;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("failed to read card image '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("text extraction failed: {0}")]
    Extraction(String),
}

/// A card photo held in memory as a data URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardImage {
    pub file_name: Option<String>,
    pub preview: Attachment,
}

impl CardImage {
    pub fn from_bytes(media_type: &str, bytes: &[u8]) -> Self {
        Self {
            file_name: None,
            preview: Attachment::from_bytes(media_type, bytes),
        }
    }

    /// Read a whole image file; the media type comes from the extension
    pub async fn read(path: impl AsRef<Path>) -> Result<Self, OcrError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|source| OcrError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let mut image = Self::from_bytes(media_type_for(path), &bytes);
        image.file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        tracing::debug!(
            file = ?image.file_name,
            size = bytes.len(),
            "card image loaded"
        );
        Ok(image)
    }
}

/// Guess an image media type from the file extension
pub fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Contact details read off a card; absent fields leave the form untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardExtract {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[async_trait]
pub trait ImageTextExtractor: Send + Sync {
    async fn extract(&self, image: Option<&CardImage>) -> Result<CardExtract, OcrError>;
}

/// Fixed placeholder results, whatever the image
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedOcr;

impl SimulatedOcr {
    pub const NAME: &'static str = "Sample OCR Name";
    pub const PHONE: &'static str = "+66 81 000 0000";
    pub const EMAIL: &'static str = "ocr@example.com";
}

#[async_trait]
impl ImageTextExtractor for SimulatedOcr {
    async fn extract(&self, _image: Option<&CardImage>) -> Result<CardExtract, OcrError> {
        Ok(CardExtract {
            name: Some(Self::NAME.to_string()),
            phone: Some(Self::PHONE.to_string()),
            email: Some(Self::EMAIL.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use super::*;

    #[test]
    fn test_media_type_for() {
        assert_eq!(media_type_for(Path::new("card.PNG")), "image/png");
        assert_eq!(media_type_for(Path::new("id.jpeg")), "image/jpeg");
        assert_eq!(
            media_type_for(Path::new("scan")),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn test_simulated_ocr_ignores_input() {
        let image = CardImage::from_bytes("image/png", &[1, 2, 3]);
        let with_image = SimulatedOcr.extract(Some(&image)).await.unwrap();
        let without = SimulatedOcr.extract(None).await.unwrap();

        assert_eq!(with_image, without);
        assert_eq!(with_image.name.as_deref(), Some("Sample OCR Name"));
        assert_eq!(with_image.phone.as_deref(), Some("+66 81 000 0000"));
        assert_eq!(with_image.email.as_deref(), Some("ocr@example.com"));
    }

    #[tokio::test]
    async fn test_read_encodes_file() {
        let mut file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
        file.write_all(b"not really a jpeg").unwrap();

        let image = CardImage::read(file.path()).await.unwrap();
        assert_eq!(image.preview.media_type(), Some("image/jpeg"));
        assert_eq!(image.preview.decode().unwrap(), b"not really a jpeg");
        assert!(image.file_name.unwrap().ends_with(".jpg"));
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let result = CardImage::read("/definitely/not/here.png").await;
        assert!(matches!(result, Err(OcrError::Read { .. })));
    }
}
