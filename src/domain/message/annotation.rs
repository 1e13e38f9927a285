//! Audio annotation value object

use serde::{Deserialize, Serialize};

/// Placeholder glyph shown when a message carries no emoji
pub const DEFAULT_EMOJI: &str = "\u{1F399}\u{FE0F}";

/// Fallback values used when content analysis fails
const FALLBACK_TITLE: &str = "New Audio Message";
const FALLBACK_DESCRIPTION: &str = "A custom audio recording.";
const FALLBACK_EMOJI: &str = "\u{1F3B5}";

/// Result of analyzing an audio clip: a catchy title, a short description,
/// and a single emoji. All fields are mandatory; a response missing any of
/// them is invalid and callers substitute [`Annotation::fallback`] instead
/// of coalescing partial fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub title: String,
    pub description: String,
    pub emoji: String,
}

impl Annotation {
    /// Create an annotation, trimming surrounding whitespace
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        emoji: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into().trim().to_string(),
            description: description.into().trim().to_string(),
            emoji: emoji.into().trim().to_string(),
        }
    }

    /// Fixed annotation used when the analysis service is unavailable
    /// or returns an unusable response
    pub fn fallback() -> Self {
        Self {
            title: FALLBACK_TITLE.to_string(),
            description: FALLBACK_DESCRIPTION.to_string(),
            emoji: FALLBACK_EMOJI.to_string(),
        }
    }

    /// Whether this annotation is usable for display
    pub fn is_valid(&self) -> bool {
        !self.title.is_empty() && !self.emoji.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_fields() {
        let a = Annotation::new("  Morning Note ", " A reminder. ", " \u{1F305} ");
        assert_eq!(a.title, "Morning Note");
        assert_eq!(a.description, "A reminder.");
        assert_eq!(a.emoji, "\u{1F305}");
    }

    #[test]
    fn fallback_is_valid() {
        let a = Annotation::fallback();
        assert!(a.is_valid());
        assert_eq!(a.title, "New Audio Message");
    }

    #[test]
    fn empty_title_is_invalid() {
        let a = Annotation::new("", "desc", "\u{1F3B5}");
        assert!(!a.is_valid());
    }

    #[test]
    fn empty_emoji_is_invalid() {
        let a = Annotation::new("Title", "desc", "  ");
        assert!(!a.is_valid());
    }
}
