//! Library persistence port interface

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::message::AudioMessage;

/// Library storage errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Failed to read library file: {0}")]
    ReadError(String),

    #[error("Failed to parse library file: {0}")]
    ParseError(String),

    #[error("Failed to write library file: {0}")]
    WriteError(String),
}

/// Port for whole-library persistence.
///
/// The library is stored as one serialized collection; every save rewrites
/// the full sequence. There is no incremental or per-record persistence.
#[async_trait]
pub trait LibraryStore: Send + Sync {
    /// Load the persisted messages, newest first.
    ///
    /// A missing file is an empty library, not an error.
    async fn load(&self) -> Result<Vec<AudioMessage>, StoreError>;

    /// Persist the full message sequence, replacing any previous contents
    async fn save(&self, messages: &[AudioMessage]) -> Result<(), StoreError>;

    /// Get the storage location
    fn path(&self) -> PathBuf;
}
