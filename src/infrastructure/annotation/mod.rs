//! Content analysis adapters

mod gemini;
mod noop;

pub use gemini::GeminiAnnotator;
pub use noop::NoopAnnotator;
