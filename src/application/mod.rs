//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod create_message;
pub mod library;
pub mod ports;
pub mod scan;

// Re-export use cases
pub use create_message::{CreateMessageInput, CreateMessageUseCase};
pub use library::MessageLibrary;
pub use scan::{MatchCallback, ScanError, ScanOutcome, ScanQrUseCase};
