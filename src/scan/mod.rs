//! Scan session bookkeeping on top of an external vision engine

/// Duplicate suppression and confirmation
pub mod session;

pub use session::{FrameReport, ScanEvent, ScanSession};
