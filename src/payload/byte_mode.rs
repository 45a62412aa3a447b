//! Byte mode payload extractor (Mode 0100)
//!
//! Re-derives the raw bytes of a byte-mode segment from an error-corrected
//! payload. String-based decoders truncate such segments at the first `0x00`;
//! reading the segment bit by bit keeps every byte.

use log::{debug, trace};

use super::bit_reader::BitReader;
use crate::config;

/// Mode indicator for byte mode
pub const MODE_BYTE: u32 = 0b0100;

/// Width of the mode indicator in bits
pub const MODE_INDICATOR_BITS: usize = 4;

/// Width of the byte-mode character count field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountWidth {
    /// Versions 1-9
    Narrow = 8,
    /// Versions 10-40
    Wide = 16,
}

impl CountWidth {
    /// Order in which widths are tried when the symbol version is unknown
    pub const PROBE_ORDER: [CountWidth; 2] = [CountWidth::Narrow, CountWidth::Wide];

    /// Count field width for a Model 2 version number
    pub fn for_version(version: u8) -> Self {
        if version <= 9 {
            CountWidth::Narrow
        } else {
            CountWidth::Wide
        }
    }

    /// Width in bits
    pub fn bits(self) -> usize {
        self as usize
    }
}

/// Decode byte-mode segments out of error-corrected codewords
#[derive(Debug, Clone, Copy)]
pub struct ByteModeDecoder {
    max_len: usize,
}

impl Default for ByteModeDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteModeDecoder {
    /// Decoder using the configured payload ceiling (`KSCAN_MAX_BYTE_PAYLOAD`, default 4096)
    pub fn new() -> Self {
        Self {
            max_len: config::max_byte_payload(),
        }
    }

    /// Decoder with an explicit payload ceiling
    pub fn with_max_len(max_len: usize) -> Self {
        Self { max_len }
    }

    /// Largest count field this decoder accepts
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Extract the raw bytes of a byte-mode segment.
    ///
    /// Tries an 8-bit count field first and a 16-bit one second; the first
    /// attempt whose header is consistent with the data wins. Returns `None`
    /// for empty input, other modes, and truncated or implausible headers.
    pub fn decode(&self, codewords: &[u8]) -> Option<Vec<u8>> {
        if codewords.is_empty() {
            return None;
        }

        CountWidth::PROBE_ORDER
            .into_iter()
            .find_map(|width| self.decode_with_width(codewords, width))
    }

    /// Single attempt with a known count field width
    pub fn decode_with_width(&self, codewords: &[u8], width: CountWidth) -> Option<Vec<u8>> {
        let mut reader = BitReader::new(codewords);

        if !reader.has_available(MODE_INDICATOR_BITS) {
            return None;
        }
        let mode = reader.read_bits(MODE_INDICATOR_BITS);
        if mode != MODE_BYTE {
            trace!("byte mode: mode indicator {mode:#06b} is not byte mode");
            return None;
        }

        if !reader.has_available(width.bits()) {
            trace!("byte mode: no room for {width:?} count field");
            return None;
        }
        let count = reader.read_bits(width.bits()) as usize;

        if count == 0 {
            trace!("byte mode: zero count with {width:?} count field");
            return None;
        }
        if count > self.max_len {
            debug!(
                "byte mode: count {count} exceeds ceiling {} ({width:?})",
                self.max_len
            );
            return None;
        }
        if !reader.has_available(count * 8) {
            trace!(
                "byte mode: count {count} needs {} bits, {} remain ({width:?})",
                count * 8,
                reader.remaining()
            );
            return None;
        }

        let bytes: Vec<u8> = (0..count).map(|_| reader.read_u8()).collect();
        debug!("byte mode: extracted {count} bytes with {width:?} count field");
        Some(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::segment::{
        BitWriter, encode_alphanumeric_segment, encode_byte_segment, encode_numeric_segment,
    };

    fn decoder() -> ByteModeDecoder {
        ByteModeDecoder::with_max_len(4096)
    }

    #[test]
    fn test_byte_mode_decode() {
        let payload = encode_byte_segment(&[0x41, 0x42, 0x43], CountWidth::Narrow).unwrap();
        assert_eq!(decoder().decode(&payload), Some(vec![0x41, 0x42, 0x43]));
    }

    #[test]
    fn test_null_byte_preserved() {
        let payload = encode_byte_segment(b"Hi\0!", CountWidth::Narrow).unwrap();
        let result = decoder().decode(&payload).unwrap();
        assert_eq!(result.len(), 4);
        assert_eq!(result, b"Hi\0!");
    }

    #[test]
    fn test_numeric_and_alphanumeric_decline() {
        let numeric = encode_numeric_segment("123").unwrap();
        assert_eq!(decoder().decode(&numeric), None);

        let alphanumeric = encode_alphanumeric_segment("AB").unwrap();
        assert_eq!(decoder().decode(&alphanumeric), None);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(decoder().decode(&[]), None);
    }

    #[test]
    fn test_mode_only_input() {
        // 0100 followed by four bits: no room for either count field
        assert_eq!(decoder().decode(&[0x40]), None);
    }

    #[test]
    fn test_zero_count_declines() {
        let mut writer = BitWriter::new();
        writer.push_bits(MODE_BYTE, 4);
        writer.push_bits(0, 8);
        writer.push_bits(0, 4);
        // Wide attempt also reads a zero count out of the padding
        assert_eq!(decoder().decode(&writer.into_bytes()), None);
    }

    #[test]
    fn test_truncated_payload_declines() {
        let mut writer = BitWriter::new();
        writer.push_bits(MODE_BYTE, 4);
        writer.push_bits(10, 8);
        for byte in b"abc" {
            writer.push_bits(*byte as u32, 8);
        }
        assert_eq!(decoder().decode(&writer.into_bytes()), None);
    }

    #[test]
    fn test_wide_count_falls_through_narrow() {
        // High byte of a 16-bit count below 256 is zero, so the narrow attempt declines
        let data = b"version ten";
        let payload = encode_byte_segment(data, CountWidth::Wide).unwrap();
        assert_eq!(decoder().decode_with_width(&payload, CountWidth::Narrow), None);
        assert_eq!(decoder().decode(&payload), Some(data.to_vec()));
    }

    #[test]
    fn test_ceiling_applies() {
        let data = vec![0xAAu8; 40];
        let payload = encode_byte_segment(&data, CountWidth::Narrow).unwrap();
        assert_eq!(ByteModeDecoder::with_max_len(39).decode(&payload), None);
        assert_eq!(ByteModeDecoder::with_max_len(40).decode(&payload), Some(data));
    }

    #[test]
    fn test_count_width_for_version() {
        assert_eq!(CountWidth::for_version(1), CountWidth::Narrow);
        assert_eq!(CountWidth::for_version(9), CountWidth::Narrow);
        assert_eq!(CountWidth::for_version(10), CountWidth::Wide);
        assert_eq!(CountWidth::for_version(40), CountWidth::Wide);
        assert_eq!(CountWidth::Wide.bits(), 16);
    }
}
