//! Audio data value object

use std::fmt;
use std::path::Path;

use base64::Engine;

/// Supported audio MIME types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AudioMimeType {
    #[serde(rename = "audio/flac")]
    Flac,
    #[serde(rename = "audio/ogg")]
    Ogg,
    #[serde(rename = "audio/mp3")]
    Mp3,
    #[serde(rename = "audio/wav")]
    Wav,
    #[serde(rename = "audio/webm")]
    Webm,
    #[serde(rename = "audio/mp4")]
    Mp4,
}

impl AudioMimeType {
    /// Get the MIME type string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Flac => "audio/flac",
            Self::Ogg => "audio/ogg",
            Self::Mp3 => "audio/mp3",
            Self::Wav => "audio/wav",
            Self::Webm => "audio/webm",
            Self::Mp4 => "audio/mp4",
        }
    }

    /// Get the file extension
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Flac => "flac",
            Self::Ogg => "ogg",
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Webm => "webm",
            Self::Mp4 => "mp4",
        }
    }

    /// Guess the MIME type from a file path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "flac" => Some(Self::Flac),
            "ogg" | "oga" | "opus" => Some(Self::Ogg),
            "mp3" => Some(Self::Mp3),
            "wav" => Some(Self::Wav),
            "webm" => Some(Self::Webm),
            "mp4" | "m4a" => Some(Self::Mp4),
            _ => None,
        }
    }
}

impl fmt::Display for AudioMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for AudioMimeType {
    fn default() -> Self {
        Self::Flac
    }
}

/// Value object holding a playable audio clip.
/// Contains raw audio bytes and their MIME type.
#[derive(Debug, Clone)]
pub struct AudioData {
    data: Vec<u8>,
    mime_type: AudioMimeType,
}

impl AudioData {
    /// Create AudioData from raw bytes
    pub fn new(data: Vec<u8>, mime_type: AudioMimeType) -> Self {
        Self { data, mime_type }
    }

    /// Decode AudioData from a base64 payload
    pub fn from_base64(encoded: &str, mime_type: AudioMimeType) -> Result<Self, base64::DecodeError> {
        let data = base64::engine::general_purpose::STANDARD.decode(encoded)?;
        Ok(Self { data, mime_type })
    }

    /// Get the raw audio data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the raw audio data
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get the MIME type
    pub fn mime_type(&self) -> AudioMimeType {
        self.mime_type
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        human_readable_size(self.size_bytes())
    }

    /// Encode the audio data as base64
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }
}

/// Format a byte count for display
pub fn human_readable_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn mime_type_as_str() {
        assert_eq!(AudioMimeType::Flac.as_str(), "audio/flac");
        assert_eq!(AudioMimeType::Webm.as_str(), "audio/webm");
        assert_eq!(AudioMimeType::Wav.as_str(), "audio/wav");
    }

    #[test]
    fn mime_type_extension() {
        assert_eq!(AudioMimeType::Flac.extension(), "flac");
        assert_eq!(AudioMimeType::Mp3.extension(), "mp3");
    }

    #[test]
    fn mime_type_from_path() {
        assert_eq!(
            AudioMimeType::from_path(&PathBuf::from("clip.FLAC")),
            Some(AudioMimeType::Flac)
        );
        assert_eq!(
            AudioMimeType::from_path(&PathBuf::from("clip.m4a")),
            Some(AudioMimeType::Mp4)
        );
        assert_eq!(AudioMimeType::from_path(&PathBuf::from("clip.txt")), None);
        assert_eq!(AudioMimeType::from_path(&PathBuf::from("noext")), None);
    }

    #[test]
    fn default_mime_type_is_flac() {
        assert_eq!(AudioMimeType::default(), AudioMimeType::Flac);
    }

    #[test]
    fn base64_round_trip() {
        let data = AudioData::new(vec![1, 2, 3, 4], AudioMimeType::Flac);
        let b64 = data.to_base64();
        let back = AudioData::from_base64(&b64, AudioMimeType::Flac).unwrap();
        assert_eq!(back.data(), &[1, 2, 3, 4]);
    }

    #[test]
    fn from_base64_rejects_garbage() {
        assert!(AudioData::from_base64("not base64!!", AudioMimeType::Flac).is_err());
    }

    #[test]
    fn human_readable_sizes() {
        assert_eq!(human_readable_size(500), "500 B");
        assert_eq!(human_readable_size(2048), "2.0 KB");
        assert_eq!(human_readable_size(2 * 1024 * 1024), "2.0 MB");
    }
}
