//! Scan domain module

mod session;

pub use session::{InvalidScanTransition, ScanSession, ScanState};
