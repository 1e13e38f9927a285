//! Audio message entity

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::domain::audio::{AudioData, AudioMimeType};
use crate::domain::message::annotation::{Annotation, DEFAULT_EMOJI};
use crate::domain::message::MessageId;

/// A persisted audio message.
///
/// Field names serialize in camelCase so the stored JSON matches the shape
/// produced by earlier releases. `id` and `created_at` are immutable once a
/// message exists; edits replace audio and derived fields in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioMessage {
    pub id: MessageId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    /// Base64-encoded audio bytes
    pub audio_data: String,
    /// Records written by earlier releases carry no MIME field; those clips
    /// were browser WebM recordings.
    #[serde(default = "legacy_mime_type")]
    pub mime_type: AudioMimeType,
    /// Creation time in epoch milliseconds, preserved across edits
    pub created_at: u64,
}

fn legacy_mime_type() -> AudioMimeType {
    AudioMimeType::Webm
}

impl AudioMessage {
    /// Build a new message from audio and its annotation
    pub fn new(audio: &AudioData, annotation: Annotation) -> Self {
        Self {
            id: MessageId::generate(),
            title: annotation.title,
            description: Some(annotation.description),
            emoji: Some(annotation.emoji),
            audio_data: audio.to_base64(),
            mime_type: audio.mime_type(),
            created_at: epoch_millis(),
        }
    }

    /// Build an edited copy of an existing message: new audio and annotation,
    /// same identifier and creation time
    pub fn edited(previous: &Self, audio: &AudioData, annotation: Annotation) -> Self {
        Self {
            id: previous.id.clone(),
            title: annotation.title,
            description: Some(annotation.description),
            emoji: Some(annotation.emoji),
            audio_data: audio.to_base64(),
            mime_type: audio.mime_type(),
            created_at: previous.created_at,
        }
    }

    /// The emoji to display, falling back to the fixed placeholder
    pub fn display_emoji(&self) -> &str {
        self.emoji
            .as_deref()
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_EMOJI)
    }

    /// The annotation currently attached to this message
    pub fn annotation(&self) -> Annotation {
        Annotation {
            title: self.title.clone(),
            description: self.description.clone().unwrap_or_default(),
            emoji: self.emoji.clone().unwrap_or_else(|| DEFAULT_EMOJI.to_string()),
        }
    }

    /// Decode the stored audio payload
    pub fn audio(&self) -> Result<AudioData, base64::DecodeError> {
        AudioData::from_base64(&self.audio_data, self.mime_type)
    }

    /// Approximate size of the decoded audio in bytes
    pub fn audio_size_bytes(&self) -> usize {
        // 4 base64 chars encode 3 bytes
        self.audio_data.len() / 4 * 3
    }
}

/// Current time as epoch milliseconds
pub fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
