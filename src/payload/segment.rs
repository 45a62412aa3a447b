//! Data segment encoder
//!
//! Produces the bit layout a QR encoder writes into the data codewords:
//! mode indicator, character count, data, terminator. Used to build
//! fixtures for the extractor and by `kscantool encode`.

use super::byte_mode::{CountWidth, MODE_BYTE};

/// Mode indicator for numeric mode
pub const MODE_NUMERIC: u32 = 0b0001;
/// Mode indicator for alphanumeric mode
pub const MODE_ALPHANUMERIC: u32 = 0b0010;

/// Alphanumeric character set: 0-9, A-Z, space, $%*+-./:
const ALPHANUMERIC_TABLE: [char; 45] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', ' ', '$',
    '%', '*', '+', '-', '.', '/', ':',
];

/// Append-only MSB-first bit buffer
#[derive(Debug, Default, Clone)]
pub struct BitWriter {
    bits: Vec<bool>,
}

impl BitWriter {
    /// Empty writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the low `count` bits of `value`, most significant first
    pub fn push_bits(&mut self, value: u32, count: usize) {
        for i in (0..count).rev() {
            self.bits.push(((value >> i) & 1) != 0);
        }
    }

    /// Number of bits written so far
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True if nothing has been written
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Pack into bytes, zero padding the final byte
    pub fn into_bytes(self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &bit)| acc | ((bit as u8) << (7 - i)))
            })
            .collect()
    }
}

fn push_terminator(writer: &mut BitWriter) {
    writer.push_bits(0, 4);
}

/// Encode `data` as a single byte-mode segment.
///
/// Returns `None` when `data.len()` does not fit in the count field.
pub fn encode_byte_segment(data: &[u8], width: CountWidth) -> Option<Vec<u8>> {
    if data.len() >= 1 << width.bits() {
        return None;
    }
    let mut writer = BitWriter::new();
    writer.push_bits(MODE_BYTE, 4);
    writer.push_bits(data.len() as u32, width.bits());
    for &byte in data {
        writer.push_bits(byte as u32, 8);
    }
    push_terminator(&mut writer);
    Some(writer.into_bytes())
}

/// Encode a digit string as a numeric segment (10-bit count, versions 1-9)
pub fn encode_numeric_segment(digits: &str) -> Option<Vec<u8>> {
    if !digits.bytes().all(|b| b.is_ascii_digit()) || digits.len() >= 1 << 10 {
        return None;
    }
    let mut writer = BitWriter::new();
    writer.push_bits(MODE_NUMERIC, 4);
    writer.push_bits(digits.len() as u32, 10);
    // Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits
    for group in digits.as_bytes().chunks(3) {
        let value = group
            .iter()
            .fold(0u32, |acc, &b| acc * 10 + (b - b'0') as u32);
        let bits = match group.len() {
            3 => 10,
            2 => 7,
            _ => 4,
        };
        writer.push_bits(value, bits);
    }
    push_terminator(&mut writer);
    Some(writer.into_bytes())
}

/// Encode text as an alphanumeric segment (9-bit count, versions 1-9)
pub fn encode_alphanumeric_segment(text: &str) -> Option<Vec<u8>> {
    let indices: Vec<u32> = text
        .chars()
        .map(|c| {
            ALPHANUMERIC_TABLE
                .iter()
                .position(|&t| t == c)
                .map(|i| i as u32)
        })
        .collect::<Option<_>>()?;
    if indices.len() >= 1 << 9 {
        return None;
    }

    let mut writer = BitWriter::new();
    writer.push_bits(MODE_ALPHANUMERIC, 4);
    writer.push_bits(indices.len() as u32, 9);
    // Pairs = 11 bits, single = 6 bits
    for pair in indices.chunks(2) {
        match pair {
            [a, b] => writer.push_bits(a * 45 + b, 11),
            [a] => writer.push_bits(*a, 6),
            _ => unreachable!(),
        }
    }
    push_terminator(&mut writer);
    Some(writer.into_bytes())
}
