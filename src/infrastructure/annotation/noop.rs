//! No-op annotator used when no API key is configured

use async_trait::async_trait;

use crate::application::ports::{AnnotationError, Annotator};
use crate::domain::audio::AudioData;
use crate::domain::message::Annotation;

/// Annotator for installations without an API key.
///
/// Always reports a failure, which callers absorb by substituting the fixed
/// fallback annotation; message creation proceeds without analysis.
pub struct NoopAnnotator;

impl NoopAnnotator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoopAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Annotator for NoopAnnotator {
    async fn analyze(&self, _audio: &AudioData) -> Result<Annotation, AnnotationError> {
        Err(AnnotationError::RequestFailed(
            "no API key configured (set GEMINI_API_KEY or run 'qr-audio config set api_key <key>')"
                .to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audio::AudioMimeType;

    #[tokio::test]
    async fn always_fails_so_callers_fall_back() {
        let annotator = NoopAnnotator::new();
        let audio = AudioData::new(vec![1, 2, 3], AudioMimeType::Flac);
        assert!(annotator.analyze(&audio).await.is_err());
    }
}
