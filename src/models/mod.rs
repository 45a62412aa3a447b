/// Barcode formats, engine-reported symbols and confirmed results
pub mod barcode;

pub use barcode::{Barcode, BarcodeFormat, DetectedSymbol};
