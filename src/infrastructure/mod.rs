//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like the camera, Gemini API, etc.

pub mod annotation;
pub mod camera;
pub mod config;
pub mod playback;
pub mod qr;
pub mod recording;
pub mod storage;

// Re-export adapters
pub use annotation::{GeminiAnnotator, NoopAnnotator};
pub use camera::NokhwaFrameSource;
pub use config::XdgConfigStore;
pub use playback::RodioPlayer;
pub use qr::{QrPngExporter, RqrrDecoder};
pub use recording::CpalRecorder;
pub use storage::JsonFileStore;
