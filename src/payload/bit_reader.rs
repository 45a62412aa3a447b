/// Cursor-based bit reader over error-corrected codewords (MSB first)
pub struct BitReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader positioned at the first bit of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Total number of bits in the underlying buffer
    pub fn len_bits(&self) -> usize {
        self.data.len() * 8
    }

    /// Current cursor, in bits
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bits left between the cursor and the end of the buffer
    pub fn remaining(&self) -> usize {
        self.len_bits().saturating_sub(self.position)
    }

    /// True iff at least `bit_count` bits remain
    pub fn has_available(&self, bit_count: usize) -> bool {
        self.remaining() >= bit_count
    }

    /// Read `bit_count` bits (at most 32) as an unsigned value.
    ///
    /// The first bit read ends up in the most significant position. Bits past
    /// the end of the buffer read as zero; guard with [`has_available`] first.
    ///
    /// [`has_available`]: BitReader::has_available
    pub fn read_bits(&mut self, bit_count: usize) -> u32 {
        debug_assert!(bit_count <= 32);
        let mut value = 0u32;
        for _ in 0..bit_count {
            let byte_idx = self.position / 8;
            let bit = match self.data.get(byte_idx) {
                Some(&byte) => (byte >> (7 - (self.position % 8))) & 1,
                None => 0,
            };
            value = (value << 1) | bit as u32;
            self.position = (self.position + 1).min(self.len_bits());
        }
        value
    }

    /// Read one full byte
    pub fn read_u8(&mut self) -> u8 {
        self.read_bits(8) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_msb_first() {
        let data = [0b1010_0000, 0xFF];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read_bits(1), 1);
        assert_eq!(reader.read_bits(3), 0b010);
        assert_eq!(reader.position(), 4);
        // Crosses the byte boundary: 0000 1111
        assert_eq!(reader.read_bits(8), 0x0F);
        assert_eq!(reader.remaining(), 4);
    }

    #[test]
    fn test_has_available() {
        let data = [0u8; 2];
        let mut reader = BitReader::new(&data);
        assert!(reader.has_available(16));
        assert!(!reader.has_available(17));
        reader.read_bits(12);
        assert!(reader.has_available(4));
        assert!(!reader.has_available(5));
        assert!(BitReader::new(&[]).has_available(0));
        assert!(!BitReader::new(&[]).has_available(1));
    }

    #[test]
    fn test_over_read_zero_fills_and_clamps_cursor() {
        let data = [0xFF];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read_bits(4), 0xF);
        // 4 real bits then 4 zero bits
        assert_eq!(reader.read_bits(8), 0xF0);
        assert_eq!(reader.position(), 8);
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.read_bits(16), 0);
        assert_eq!(reader.position(), 8);
    }

    #[test]
    fn test_read_u8_sequence() {
        let data = [0x41, 0x00, 0x42];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read_u8(), 0x41);
        assert_eq!(reader.read_u8(), 0x00);
        assert_eq!(reader.read_u8(), 0x42);
        assert!(!reader.has_available(1));
    }
}
