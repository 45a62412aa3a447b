use std::fmt;

use crate::payload::ByteModeDecoder;

/// Application-level barcode format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarcodeFormat {
    /// QR code
    QrCode,
    /// Aztec
    Aztec,
    /// Code 128
    Code128,
    /// Code 39
    Code39,
    /// Code 93
    Code93,
    /// Codabar
    Codabar,
    /// Data Matrix
    DataMatrix,
    /// EAN-13
    Ean13,
    /// EAN-8
    Ean8,
    /// ITF
    Itf,
    /// UPC-A
    UpcA,
    /// UPC-E
    UpcE,
    /// PDF417
    Pdf417,
    /// Request marker meaning "every supported format"
    AllFormats,
    /// Format the engine reported but the application does not know
    Unknown,
}

impl BarcodeFormat {
    /// True for formats a scan result can actually carry
    pub fn is_concrete(&self) -> bool {
        !matches!(self, BarcodeFormat::AllFormats | BarcodeFormat::Unknown)
    }
}

impl fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BarcodeFormat::QrCode => "FORMAT_QR_CODE",
            BarcodeFormat::Aztec => "FORMAT_AZTEC",
            BarcodeFormat::Code128 => "FORMAT_CODE_128",
            BarcodeFormat::Code39 => "FORMAT_CODE_39",
            BarcodeFormat::Code93 => "FORMAT_CODE_93",
            BarcodeFormat::Codabar => "FORMAT_CODABAR",
            BarcodeFormat::DataMatrix => "FORMAT_DATA_MATRIX",
            BarcodeFormat::Ean13 => "FORMAT_EAN_13",
            BarcodeFormat::Ean8 => "FORMAT_EAN_8",
            BarcodeFormat::Itf => "FORMAT_ITF",
            BarcodeFormat::UpcA => "FORMAT_UPC_A",
            BarcodeFormat::UpcE => "FORMAT_UPC_E",
            BarcodeFormat::Pdf417 => "FORMAT_PDF417",
            BarcodeFormat::AllFormats => "FORMAT_ALL_FORMATS",
            BarcodeFormat::Unknown => "TYPE_UNKNOWN",
        };
        f.write_str(name)
    }
}

/// One symbol as reported by the external vision engine
#[derive(Debug, Clone)]
pub struct DetectedSymbol {
    /// Format reported by the engine
    pub format: BarcodeFormat,
    /// Engine's string rendering of the content
    pub display_value: Option<String>,
    /// Raw bytes, when the engine provides them
    pub raw_bytes: Option<Vec<u8>>,
    /// Error-corrected data codewords (QR only, when available)
    pub error_corrected_payload: Option<Vec<u8>>,
}

impl DetectedSymbol {
    /// Symbol with only a display value
    pub fn new(format: BarcodeFormat, display_value: impl Into<String>) -> Self {
        Self {
            format,
            display_value: Some(display_value.into()),
            raw_bytes: None,
            error_corrected_payload: None,
        }
    }

    /// Attach raw bytes
    pub fn with_raw_bytes(mut self, raw_bytes: Vec<u8>) -> Self {
        self.raw_bytes = Some(raw_bytes);
        self
    }

    /// Attach the error-corrected payload
    pub fn with_payload(mut self, payload: Vec<u8>) -> Self {
        self.error_corrected_payload = Some(payload);
        self
    }

    /// Best available bytes for this symbol.
    ///
    /// Byte-mode extraction from the QR payload wins when it agrees with what
    /// the engine reported, then the engine's raw bytes, then the UTF-8 bytes
    /// of the display value.
    pub fn resolve_raw_bytes(&self) -> Vec<u8> {
        self.resolve_raw_bytes_with(&ByteModeDecoder::new())
    }

    /// [`resolve_raw_bytes`](Self::resolve_raw_bytes) with an explicit decoder
    pub fn resolve_raw_bytes_with(&self, decoder: &ByteModeDecoder) -> Vec<u8> {
        let extracted = match (&self.format, &self.error_corrected_payload) {
            (BarcodeFormat::QrCode, Some(payload)) => decoder.decode(payload),
            _ => None,
        };
        extracted
            .filter(|bytes| self.agrees_with_engine(bytes))
            .or_else(|| self.raw_bytes.clone())
            .or_else(|| self.display_value.as_ref().map(|s| s.as_bytes().to_vec()))
            .unwrap_or_default()
    }

    // The engine's string and raw bytes may be cut at a null byte, so an
    // extraction only has to extend them. A wide count field misread as a
    // narrow one yields a short payload that fails this check.
    fn agrees_with_engine(&self, extracted: &[u8]) -> bool {
        let display_ok = self
            .display_value
            .as_ref()
            .is_none_or(|s| extracted.starts_with(s.as_bytes()));
        let raw_ok = self
            .raw_bytes
            .as_ref()
            .is_none_or(|raw| extracted.starts_with(raw));
        display_ok && raw_ok
    }
}

/// Confirmed scan result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Barcode {
    /// Display value
    pub data: String,
    /// Format of the symbol
    pub format: BarcodeFormat,
    /// Exact bytes encoded in the symbol, as far as they can be recovered
    pub raw_bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::CountWidth;
    use crate::payload::segment::{encode_byte_segment, encode_numeric_segment};

    fn decoder() -> ByteModeDecoder {
        ByteModeDecoder::with_max_len(4096)
    }

    #[test]
    fn test_format_display() {
        assert_eq!(BarcodeFormat::QrCode.to_string(), "FORMAT_QR_CODE");
        assert_eq!(BarcodeFormat::Unknown.to_string(), "TYPE_UNKNOWN");
        assert!(BarcodeFormat::Ean13.is_concrete());
        assert!(!BarcodeFormat::AllFormats.is_concrete());
    }

    #[test]
    fn test_resolve_prefers_extracted_bytes() {
        let payload = encode_byte_segment(b"Hi\0!", CountWidth::Narrow).unwrap();
        // The engine's string value is truncated at the null byte
        let symbol = DetectedSymbol::new(BarcodeFormat::QrCode, "Hi")
            .with_raw_bytes(b"Hi".to_vec())
            .with_payload(payload);
        assert_eq!(symbol.resolve_raw_bytes_with(&decoder()), b"Hi\0!");
    }

    #[test]
    fn test_resolve_falls_back_to_raw_then_display() {
        let numeric = encode_numeric_segment("123").unwrap();
        let symbol = DetectedSymbol::new(BarcodeFormat::QrCode, "123")
            .with_raw_bytes(vec![0x10, 0x0C, 0x7B])
            .with_payload(numeric.clone());
        assert_eq!(symbol.resolve_raw_bytes_with(&decoder()), vec![0x10, 0x0C, 0x7B]);

        let symbol = DetectedSymbol::new(BarcodeFormat::QrCode, "123").with_payload(numeric);
        assert_eq!(symbol.resolve_raw_bytes_with(&decoder()), b"123");
    }

    #[test]
    fn test_resolve_rejects_misread_wide_count() {
        // 300 = 0x012C: an 8-bit count field reads 1 and yields a single byte
        let data: Vec<u8> = (0..300u32).map(|i| i as u8).collect();
        let payload = encode_byte_segment(&data, CountWidth::Wide).unwrap();
        assert_eq!(decoder().decode(&payload).map(|b| b.len()), Some(1));

        // First byte is 0x00, so the engine's string is empty; raw bytes disagree
        let symbol = DetectedSymbol::new(BarcodeFormat::QrCode, "")
            .with_raw_bytes(data.clone())
            .with_payload(payload);
        assert_eq!(symbol.resolve_raw_bytes_with(&decoder()), data);
    }

    #[test]
    fn test_resolve_rejects_extraction_not_matching_display() {
        let data = vec![b'x'; 300];
        let payload = encode_byte_segment(&data, CountWidth::Wide).unwrap();
        let display = String::from_utf8(data).unwrap();
        let symbol = DetectedSymbol::new(BarcodeFormat::QrCode, display.clone())
            .with_payload(payload);
        assert_eq!(symbol.resolve_raw_bytes_with(&decoder()), display.as_bytes());
    }

    #[test]
    fn test_resolve_ignores_payload_for_other_formats() {
        let payload = encode_byte_segment(b"xyz", CountWidth::Narrow).unwrap();
        let symbol = DetectedSymbol::new(BarcodeFormat::DataMatrix, "abc").with_payload(payload);
        assert_eq!(symbol.resolve_raw_bytes_with(&decoder()), b"abc");
    }
}
