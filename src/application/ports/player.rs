//! Playback port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::AudioData;

/// Playback errors
#[derive(Debug, Clone, Error)]
pub enum PlaybackError {
    #[error("No audio output device available: {0}")]
    DeviceNotAvailable(String),

    #[error("Unsupported or corrupt audio data: {0}")]
    DecodeFailed(String),

    #[error("Playback failed: {0}")]
    PlaybackFailed(String),
}

/// Port for playing an audio clip to completion
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Play the clip, returning once playback finishes
    async fn play(&self, audio: &AudioData) -> Result<(), PlaybackError>;
}
