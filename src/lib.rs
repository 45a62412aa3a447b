//! kscan - QR payload recovery for barcode scanners
//!
//! Vision engines hand back QR content as a string, which truncates byte-mode
//! segments at the first null byte. This crate re-reads the error-corrected
//! payload of the symbol and recovers the exact bytes, and provides the
//! host-independent bookkeeping a scanner view needs around an engine.
//!
//! ```
//! use kscan::payload::{CountWidth, segment::encode_byte_segment};
//!
//! let payload = encode_byte_segment(b"Hello\0World", CountWidth::Narrow).unwrap();
//! assert_eq!(kscan::extract_raw_bytes(&payload).unwrap(), b"Hello\0World");
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Parallel payload extraction
pub mod batch;
mod config;
/// Error type for engine reports and tooling
pub mod error;
/// Scan result types (Barcode, DetectedSymbol, BarcodeFormat)
pub mod models;
/// Payload decoding (bit reader, byte mode, segment encoder)
pub mod payload;
/// Scan session bookkeeping (duplicate suppression)
pub mod scan;

pub use batch::extract_raw_bytes_batch;
pub use config::{DEFAULT_CONFIRMATIONS, DEFAULT_MAX_BYTE_PAYLOAD};
pub use error::{KscanError, Result};
pub use models::{Barcode, BarcodeFormat, DetectedSymbol};
pub use payload::{BitReader, ByteModeDecoder, CountWidth};
pub use scan::{FrameReport, ScanEvent, ScanSession};

/// Recover the bytes of a byte-mode QR segment from its error-corrected payload.
///
/// Returns `None` when the payload is empty, uses another mode, or carries a
/// header that does not fit the data. Callers fall back to the engine's
/// string value in that case.
pub fn extract_raw_bytes(codewords: &[u8]) -> Option<Vec<u8>> {
    ByteModeDecoder::new().decode(codewords)
}
