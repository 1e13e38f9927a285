//! Audio domain module

mod audio_data;
mod duration;

pub use audio_data::{human_readable_size, AudioData, AudioMimeType};
pub use duration::Duration;
