//! Rodio-based playback adapter

use std::io::Cursor;

use async_trait::async_trait;
use rodio::{Decoder, OutputStream, Sink};

use crate::application::ports::{AudioPlayer, PlaybackError};
use crate::domain::audio::AudioData;

/// Plays message audio through the default output device
pub struct RodioPlayer;

impl RodioPlayer {
    /// Create a new rodio-based player
    pub fn new() -> Self {
        Self
    }
}

impl Default for RodioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioPlayer for RodioPlayer {
    async fn play(&self, audio: &AudioData) -> Result<(), PlaybackError> {
        let bytes = audio.data().to_vec();

        // Run audio playback in a blocking thread to avoid stalling the async runtime
        tokio::task::spawn_blocking(move || play_sync(bytes))
            .await
            .map_err(|e| PlaybackError::PlaybackFailed(format!("Task join error: {}", e)))?
    }
}

/// Play a clip synchronously (called from spawn_blocking)
fn play_sync(bytes: Vec<u8>) -> Result<(), PlaybackError> {
    let (_stream, stream_handle) = OutputStream::try_default()
        .map_err(|e| PlaybackError::DeviceNotAvailable(e.to_string()))?;

    let sink =
        Sink::try_new(&stream_handle).map_err(|e| PlaybackError::PlaybackFailed(e.to_string()))?;

    let source =
        Decoder::new(Cursor::new(bytes)).map_err(|e| PlaybackError::DecodeFailed(e.to_string()))?;

    sink.append(source);

    // Wait for playback to complete
    sink.sleep_until_end();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audio::AudioMimeType;

    // These tests require audio hardware and may not work in CI

    #[tokio::test]
    async fn garbage_bytes_fail_to_decode() {
        let player = RodioPlayer::new();
        let audio = AudioData::new(vec![0u8; 16], AudioMimeType::Flac);
        let result = player.play(&audio).await;
        // Either no output device (CI) or a decode failure; never a panic
        assert!(matches!(
            result,
            Err(PlaybackError::DecodeFailed(_)) | Err(PlaybackError::DeviceNotAvailable(_))
        ));
    }

    #[tokio::test]
    #[ignore = "Requires audio hardware"]
    async fn plays_generated_wav() {
        // Minimal WAV: 100ms of silence at 16kHz mono
        let samples = 1600u32;
        let data_len = samples * 2;
        let mut wav: Vec<u8> = Vec::new();
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&(36 + data_len).to_le_bytes());
        wav.extend_from_slice(b"WAVEfmt ");
        wav.extend_from_slice(&16u32.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
        wav.extend_from_slice(&1u16.to_le_bytes()); // mono
        wav.extend_from_slice(&16000u32.to_le_bytes());
        wav.extend_from_slice(&32000u32.to_le_bytes());
        wav.extend_from_slice(&2u16.to_le_bytes());
        wav.extend_from_slice(&16u16.to_le_bytes());
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&data_len.to_le_bytes());
        wav.extend(std::iter::repeat(0u8).take(data_len as usize));

        let player = RodioPlayer::new();
        let audio = AudioData::new(wav, AudioMimeType::Wav);
        player.play(&audio).await.unwrap();
    }
}
