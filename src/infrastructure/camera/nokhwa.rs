//! Camera frame source using nokhwa

use async_trait::async_trait;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;
use tokio::sync::oneshot;

use crate::application::ports::{CameraError, Frame, FrameSource};

/// Commands handled by the camera worker thread
enum CameraCommand {
    Fetch(oneshot::Sender<Result<Option<Frame>, CameraError>>),
    Close,
}

/// Frame source backed by a nokhwa camera.
///
/// The camera handle is not thread-safe, so it lives on a dedicated worker
/// thread for the whole session; the async side talks to it over channels.
/// Dropping the command sender (or sending `Close`) makes the worker stop
/// the stream and exit, releasing the device.
pub struct NokhwaFrameSource {
    index: u32,
    commands: Option<std::sync::mpsc::Sender<CameraCommand>>,
}

impl NokhwaFrameSource {
    /// Create a frame source for the camera at `index`
    pub fn new(index: u32) -> Self {
        Self {
            index,
            commands: None,
        }
    }
}

#[async_trait]
impl FrameSource for NokhwaFrameSource {
    async fn open(&mut self) -> Result<(), CameraError> {
        if self.commands.is_some() {
            return Ok(());
        }

        let (cmd_tx, cmd_rx) = std::sync::mpsc::channel();
        let (ready_tx, ready_rx) = oneshot::channel();
        let index = self.index;

        std::thread::spawn(move || camera_worker(index, cmd_rx, ready_tx));

        match ready_rx.await {
            Ok(Ok(())) => {
                self.commands = Some(cmd_tx);
                Ok(())
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(CameraError::OpenFailed("camera thread exited".into())),
        }
    }

    async fn next_frame(&mut self) -> Result<Option<Frame>, CameraError> {
        let Some(commands) = &self.commands else {
            return Err(CameraError::CaptureFailed("camera not open".into()));
        };

        let (reply_tx, reply_rx) = oneshot::channel();
        commands
            .send(CameraCommand::Fetch(reply_tx))
            .map_err(|_| CameraError::CaptureFailed("camera thread exited".into()))?;

        reply_rx
            .await
            .map_err(|_| CameraError::CaptureFailed("camera thread exited".into()))?
    }

    async fn close(&mut self) {
        if let Some(commands) = self.commands.take() {
            let _ = commands.send(CameraCommand::Close);
        }
    }
}

impl Drop for NokhwaFrameSource {
    fn drop(&mut self) {
        // Sender drop alone also ends the worker; Close is explicit
        if let Some(commands) = self.commands.take() {
            let _ = commands.send(CameraCommand::Close);
        }
    }
}

/// Worker owning the camera handle for the session lifetime
fn camera_worker(
    index: u32,
    commands: std::sync::mpsc::Receiver<CameraCommand>,
    ready: oneshot::Sender<Result<(), CameraError>>,
) {
    let mut camera = match open_camera(index) {
        Ok(camera) => camera,
        Err(e) => {
            let _ = ready.send(Err(e));
            return;
        }
    };

    let _ = ready.send(Ok(()));

    while let Ok(command) = commands.recv() {
        match command {
            CameraCommand::Fetch(reply) => {
                let _ = reply.send(fetch_frame(&mut camera));
            }
            CameraCommand::Close => break,
        }
    }

    let _ = camera.stop_stream();
}

fn open_camera(index: u32) -> Result<Camera, CameraError> {
    let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
    let mut camera = Camera::new(CameraIndex::Index(index), requested)
        .map_err(|e| CameraError::OpenFailed(e.to_string()))?;

    camera
        .open_stream()
        .map_err(|e| CameraError::OpenFailed(e.to_string()))?;

    Ok(camera)
}

fn fetch_frame(camera: &mut Camera) -> Result<Option<Frame>, CameraError> {
    let buffer = camera
        .frame()
        .map_err(|e| CameraError::CaptureFailed(e.to_string()))?;

    let rgb = buffer
        .decode_image::<RgbFormat>()
        .map_err(|e| CameraError::CaptureFailed(e.to_string()))?;

    let (width, height) = rgb.dimensions();
    let pixels: Vec<u8> = rgb.pixels().map(|p| luma(p.0)).collect();

    let frame = Frame::new(pixels, width, height)
        .ok_or_else(|| CameraError::CaptureFailed("mismatched frame dimensions".into()))?;

    Ok(Some(frame))
}

/// BT.601 luma from an RGB pixel
fn luma([r, g, b]: [u8; 3]) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::FrameSource as _;

    #[test]
    fn luma_weights() {
        assert_eq!(luma([0, 0, 0]), 0);
        assert_eq!(luma([255, 255, 255]), 255);
        // Green dominates the perceived brightness
        assert!(luma([0, 255, 0]) > luma([255, 0, 0]));
        assert!(luma([255, 0, 0]) > luma([0, 0, 255]));
    }

    #[tokio::test]
    async fn next_frame_before_open_is_an_error() {
        let mut source = NokhwaFrameSource::new(0);
        assert!(matches!(
            source.next_frame().await,
            Err(CameraError::CaptureFailed(_))
        ));
    }

    #[tokio::test]
    #[ignore = "Requires camera hardware"]
    async fn open_fetch_close() {
        let mut source = NokhwaFrameSource::new(0);
        source.open().await.unwrap();
        let frame = source.next_frame().await.unwrap().unwrap();
        assert!(frame.width > 0 && frame.height > 0);
        source.close().await;
    }
}
