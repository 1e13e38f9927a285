//! Camera capture adapters

mod nokhwa;

pub use self::nokhwa::NokhwaFrameSource;
