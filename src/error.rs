use thiserror::Error;

/// Errors surfaced outside the payload extractor.
///
/// Payload extraction itself never fails: it either recovers bytes or
/// declines with `None`.
#[derive(Debug, Error)]
pub enum KscanError {
    /// The vision engine reported a failure for a frame
    #[error("scanner engine failed: {0}")]
    Engine(String),

    /// Payload text was not valid hex
    #[error("invalid hex payload: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Text could not be encoded as a data segment
    #[error("cannot encode {len} bytes as a {width}-bit count segment")]
    Encode {
        /// Input length in bytes
        len: usize,
        /// Count field width in bits
        width: usize,
    },

    /// I/O failure while reading a payload file
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias for fallible kscan operations
pub type Result<T> = std::result::Result<T, KscanError>;
