//! Create/update message use case

use crate::domain::audio::AudioData;
use crate::domain::message::{Annotation, AudioMessage};

use super::ports::Annotator;

/// Input parameters for building a message
pub struct CreateMessageInput {
    /// The recorded or imported audio
    pub audio: AudioData,
    /// When set, this is an edit: the new message keeps the existing
    /// identifier and creation time, so the printed QR stays valid
    pub existing: Option<AudioMessage>,
    /// Skip content analysis and keep the existing annotation
    /// (only meaningful for edits)
    pub keep_annotation: bool,
}

/// Builds an [`AudioMessage`] from audio, annotating it via the content
/// analysis service with a fixed fallback on any failure. Annotation never
/// blocks message creation.
pub struct CreateMessageUseCase<A: Annotator> {
    annotator: A,
}

impl<A: Annotator> CreateMessageUseCase<A> {
    pub fn new(annotator: A) -> Self {
        Self { annotator }
    }

    /// Execute the use case.
    ///
    /// # Returns
    /// The built message and whether the annotation came from the service
    /// (`false` means the fallback or a kept annotation was used)
    pub async fn execute(&self, input: CreateMessageInput) -> (AudioMessage, bool) {
        let (annotation, analyzed) = self.annotate(&input).await;

        let message = match input.existing {
            Some(ref previous) => AudioMessage::edited(previous, &input.audio, annotation),
            None => AudioMessage::new(&input.audio, annotation),
        };

        (message, analyzed)
    }

    async fn annotate(&self, input: &CreateMessageInput) -> (Annotation, bool) {
        if input.keep_annotation {
            if let Some(ref previous) = input.existing {
                return (previous.annotation(), false);
            }
        }

        match self.annotator.analyze(&input.audio).await {
            Ok(annotation) if annotation.is_valid() => (annotation, true),
            Ok(_) => (Annotation::fallback(), false),
            Err(e) => {
                eprintln!("Warning: content analysis failed: {}", e);
                (Annotation::fallback(), false)
            }
        }
    }
}
