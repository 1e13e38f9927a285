//! JSON file library store adapter

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::application::ports::{LibraryStore, StoreError};
use crate::domain::message::AudioMessage;

/// Current on-disk format version
const FORMAT_VERSION: u32 = 1;

/// On-disk shape of the library: a version tag plus the message sequence,
/// newest first.
#[derive(Debug, Serialize, Deserialize)]
struct LibraryFile {
    version: u32,
    messages: Vec<AudioMessage>,
}

/// Library store writing one JSON file in the XDG data directory
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store at the default location
    pub fn new() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("qr-audio");

        Self {
            path: data_dir.join("messages.json"),
        }
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse file content into the message sequence.
    ///
    /// Accepts the current versioned shape and, as a fallback, a bare array
    /// of messages as written by earlier releases.
    fn parse(content: &str) -> Result<Vec<AudioMessage>, StoreError> {
        match serde_json::from_str::<LibraryFile>(content) {
            Ok(file) => Ok(file.messages),
            Err(versioned_err) => serde_json::from_str::<Vec<AudioMessage>>(content)
                .map_err(|_| StoreError::ParseError(versioned_err.to_string())),
        }
    }

    /// Serialize the message sequence into the current file shape
    fn serialize(messages: &[AudioMessage]) -> Result<String, StoreError> {
        let file = LibraryFile {
            version: FORMAT_VERSION,
            messages: messages.to_vec(),
        };
        serde_json::to_string(&file).map_err(|e| StoreError::WriteError(e.to_string()))
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LibraryStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<AudioMessage>, StoreError> {
        if !self.path.exists() {
            // No library yet
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| StoreError::ReadError(e.to_string()))?;

        Self::parse(&content)
    }

    async fn save(&self, messages: &[AudioMessage]) -> Result<(), StoreError> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::WriteError(e.to_string()))?;
        }

        let content = Self::serialize(messages)?;

        fs::write(&self.path, content)
            .await
            .map_err(|e| StoreError::WriteError(e.to_string()))?;

        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }
}
