//! Scan-decode-dispatch use case

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use thiserror::Error;
use tokio::time::interval;

use crate::domain::message::payload;
use crate::domain::scan::{InvalidScanTransition, ScanSession};

use super::ports::{CameraError, FrameSource, QrDecoder};

/// Tick cadence between frame samples (~30 fps)
pub const DEFAULT_TICK: StdDuration = StdDuration::from_millis(33);

/// Errors from the scan use case
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),

    #[error(transparent)]
    Session(#[from] InvalidScanTransition),
}

/// How a scan session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A scheme-matching code was decoded; carries the raw identifier
    Matched(String),
    /// The session was torn down before any match
    Cancelled,
}

/// One-shot dispatch callback, invoked with the scanned identifier
pub type MatchCallback = Box<dyn FnOnce(&str) + Send>;

/// Scan use case: samples camera frames at a fixed cadence, decodes each,
/// and stops on the first payload carrying our scheme.
///
/// Frames are fetched and decoded strictly in sequence within the loop, so
/// two decodes are never in flight together and the dispatch callback fires
/// at most once per session. The camera is released on every exit path.
pub struct ScanQrUseCase<F, D>
where
    F: FrameSource,
    D: QrDecoder,
{
    frames: F,
    decoder: D,
    tick: StdDuration,
    stop_flag: Arc<AtomicBool>,
}

impl<F, D> ScanQrUseCase<F, D>
where
    F: FrameSource,
    D: QrDecoder,
{
    /// Create a new scan use case with the default tick cadence
    pub fn new(frames: F, decoder: D) -> Self {
        Self::with_tick(frames, decoder, DEFAULT_TICK)
    }

    /// Create a new scan use case with a custom tick cadence
    pub fn with_tick(frames: F, decoder: D, tick: StdDuration) -> Self {
        Self {
            frames,
            decoder,
            tick,
            stop_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the stop flag for external signal handling
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_flag)
    }

    /// Run the scan session to completion.
    ///
    /// Opens the camera (a failure here is terminal and happens before any
    /// decode attempt), then loops: fetch a frame if one is ready, decode
    /// it, ignore payloads without our scheme, and dispatch the identifier
    /// of the first match. Setting the stop flag ends the session cleanly.
    pub async fn execute(mut self, on_match: Option<MatchCallback>) -> Result<ScanOutcome, ScanError> {
        let mut session = ScanSession::new();

        if let Err(e) = self.frames.open().await {
            self.frames.close().await;
            session.fail()?;
            return Err(ScanError::Camera(e));
        }
        session.start()?;

        let mut on_match = on_match;
        let mut ticker = interval(self.tick);

        let result = loop {
            if self.stop_flag.load(Ordering::SeqCst) {
                break Ok(ScanOutcome::Cancelled);
            }

            ticker.tick().await;

            let frame = match self.frames.next_frame().await {
                Ok(Some(frame)) => frame,
                Ok(None) => continue,
                Err(e) => break Err(ScanError::Camera(e)),
            };

            let Some(decoded) = self.decoder.decode(&frame) else {
                continue;
            };
            // A code without our scheme is the same as no code at all
            let Some(id) = payload::parse(&decoded) else {
                continue;
            };

            if let Some(dispatch) = on_match.take() {
                dispatch(id);
            }
            break Ok(ScanOutcome::Matched(id.to_string()));
        };

        self.frames.close().await;
        match result {
            Ok(outcome) => {
                session.stop()?;
                Ok(outcome)
            }
            Err(e) => {
                session.fail()?;
                Err(e)
            }
        }
    }
}
