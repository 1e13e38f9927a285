//! Content analysis port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::AudioData;
use crate::domain::message::Annotation;

/// Annotation errors
#[derive(Debug, Clone, Error)]
pub enum AnnotationError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Empty analysis response")]
    EmptyResponse,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// Port for deriving a title/description/emoji from an audio clip.
///
/// Implementations are best-effort annotators: callers must be prepared to
/// substitute [`Annotation::fallback`] on any error rather than fail the
/// surrounding operation.
#[async_trait]
pub trait Annotator: Send + Sync {
    /// Analyze an audio clip.
    ///
    /// # Returns
    /// A complete annotation, or an error describing why analysis failed
    async fn analyze(&self, audio: &AudioData) -> Result<Annotation, AnnotationError>;
}
