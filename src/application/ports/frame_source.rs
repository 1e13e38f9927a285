//! Camera frame source port interface

use async_trait::async_trait;
use thiserror::Error;

/// Camera errors
#[derive(Debug, Clone, Error)]
pub enum CameraError {
    #[error("No camera available")]
    NoCamera,

    #[error("Camera access denied or unavailable: {0}")]
    OpenFailed(String),

    #[error("Frame capture failed: {0}")]
    CaptureFailed(String),
}

/// One grayscale video frame: 8-bit luma samples, row-major
#[derive(Debug, Clone)]
pub struct Frame {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    /// Create a frame, checking that the buffer matches the dimensions
    pub fn new(pixels: Vec<u8>, width: u32, height: u32) -> Option<Self> {
        if pixels.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            pixels,
            width,
            height,
        })
    }
}

/// Port for a live camera feed.
///
/// `open` either acquires the device and starts the stream or fails
/// terminally; a session never observes a half-initialized source.
/// `close` must be called on every exit path to release the device.
#[async_trait]
pub trait FrameSource: Send {
    /// Acquire the camera and start streaming
    async fn open(&mut self) -> Result<(), CameraError>;

    /// Fetch the next frame.
    ///
    /// # Returns
    /// `Ok(None)` when no frame is ready yet (not an error), `Ok(Some(_))`
    /// with the current frame, or an error if capture broke
    async fn next_frame(&mut self) -> Result<Option<Frame>, CameraError>;

    /// Release the camera. Idempotent.
    async fn close(&mut self);
}
