//! QR decoding adapter backed by rqrr

use image::GrayImage;

use crate::application::ports::{Frame, QrDecoder};

/// Decodes QR codes from grayscale camera frames
pub struct RqrrDecoder;

impl RqrrDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RqrrDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl QrDecoder for RqrrDecoder {
    fn decode(&self, frame: &Frame) -> Option<String> {
        let image = GrayImage::from_raw(frame.width, frame.height, frame.pixels.clone())?;

        let mut prepared = rqrr::PreparedImage::prepare(image);
        for grid in prepared.detect_grids() {
            if let Ok((_meta, content)) = grid.decode() {
                return Some(content);
            }
        }
        None
    }
}
