//! QR code PNG export

use std::path::Path;

use image::Luma;
use qrcode::{EcLevel, QrCode};
use thiserror::Error;

use crate::domain::message::{payload, MessageId};

/// Minimum rendered symbol size in pixels
const MIN_DIMENSIONS: u32 = 400;

/// QR export errors
#[derive(Debug, Error)]
pub enum QrExportError {
    #[error("Failed to build QR code: {0}")]
    Encode(String),

    #[error("Failed to write QR image: {0}")]
    Write(String),
}

/// Renders a message's QR payload into a PNG file.
///
/// Uses error-correction level H (the symbol stays readable when printed
/// small or partially covered) and a quiet zone around the modules.
pub struct QrPngExporter;

impl QrPngExporter {
    pub fn new() -> Self {
        Self
    }

    /// Write the QR code for a message id to `path`
    pub fn export(&self, id: &MessageId, path: &Path) -> Result<(), QrExportError> {
        let payload = payload::encode(id);

        let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)
            .map_err(|e| QrExportError::Encode(e.to_string()))?;

        let image = code
            .render::<Luma<u8>>()
            .min_dimensions(MIN_DIMENSIONS, MIN_DIMENSIONS)
            .quiet_zone(true)
            .build();

        image
            .save(path)
            .map_err(|e| QrExportError::Write(e.to_string()))?;

        Ok(())
    }

    /// Default file name for a message's QR image, derived from its title
    pub fn default_file_name(title: &str) -> String {
        let slug: String = title
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        let slug = if slug.is_empty() { "message".to_string() } else { slug };
        format!("QR-{}.png", slug)
    }
}

impl Default for QrPngExporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_writes_a_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("code.png");
        let id: MessageId = "abc1234".parse().unwrap();

        QrPngExporter::new().export(&id, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // PNG signature
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn exported_code_decodes_back_to_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("code.png");
        let id: MessageId = "zz:9".parse().unwrap();

        QrPngExporter::new().export(&id, &path).unwrap();

        let image = image::open(&path).unwrap().to_luma8();
        let mut prepared = rqrr::PreparedImage::prepare(image);
        let grids = prepared.detect_grids();
        assert_eq!(grids.len(), 1);
        let (_, content) = grids[0].decode().unwrap();
        assert_eq!(content, "qr-audio:zz:9");
    }

    #[test]
    fn default_file_name_slugs_title() {
        assert_eq!(
            QrPngExporter::default_file_name("My Morning Note"),
            "QR-My-Morning-Note.png"
        );
        assert_eq!(QrPngExporter::default_file_name("  "), "QR-message.png");
    }
}
