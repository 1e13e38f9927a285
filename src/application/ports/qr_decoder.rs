//! QR decoding port interface

use super::frame_source::Frame;

/// Port for single-frame QR decoding.
///
/// Decoding is synchronous and runs inline in the scan tick; the loop never
/// submits a frame before the previous decode result is known.
pub trait QrDecoder: Send {
    /// Decode the first QR code found in a frame.
    ///
    /// # Returns
    /// The decoded payload string, or `None` when the frame contains no
    /// readable code
    fn decode(&self, frame: &Frame) -> Option<String>;
}
