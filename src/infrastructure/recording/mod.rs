//! Microphone recording adapters

mod cpal_recorder;
mod flac;

pub use cpal_recorder::CpalRecorder;
pub use flac::CLIP_SAMPLE_RATE;
