//! QR Audio - link audio recordings to scannable QR codes
//!
//! This crate records (or imports) short audio clips, derives a title,
//! description, and emoji for each via Google Gemini, stores them in a local
//! library, and exports QR codes that play the clip back when scanned.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Core business logic, value objects, entities, and errors
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (camera, Gemini, QR, storage, etc.)
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
