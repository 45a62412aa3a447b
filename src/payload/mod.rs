//! QR payload recovery
//!
//! This module works on the error-corrected data codewords reported by an
//! external vision engine:
//! - Bit reader: MSB-first cursor over the codewords
//! - Byte mode: exact byte extraction, including embedded null bytes
//! - Segment: encoder for building data segments

/// MSB-first bit cursor
pub mod bit_reader;
/// Byte mode segment extraction
pub mod byte_mode;
/// Data segment encoder (byte, numeric, alphanumeric)
pub mod segment;

pub use bit_reader::BitReader;
pub use byte_mode::{ByteModeDecoder, CountWidth};
