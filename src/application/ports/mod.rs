//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod annotator;
pub mod config;
pub mod frame_source;
pub mod library_store;
pub mod player;
pub mod qr_decoder;
pub mod recorder;

// Re-export common types
pub use annotator::{AnnotationError, Annotator};
pub use config::ConfigStore;
pub use frame_source::{CameraError, Frame, FrameSource};
pub use library_store::{LibraryStore, StoreError};
pub use player::{AudioPlayer, PlaybackError};
pub use qr_decoder::QrDecoder;
pub use recorder::{AudioRecorder, ProgressCallback, RecordingError};
