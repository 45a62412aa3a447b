use rayon::prelude::*;

use crate::payload::ByteModeDecoder;

/// Extract byte-mode payloads from many symbols in parallel.
///
/// Results are in input order; each entry is what
/// [`extract_raw_bytes`](crate::extract_raw_bytes) returns for that payload.
pub fn extract_raw_bytes_batch<P>(payloads: &[P]) -> Vec<Option<Vec<u8>>>
where
    P: AsRef<[u8]> + Sync,
{
    let decoder = ByteModeDecoder::new();
    payloads
        .par_iter()
        .map(|payload| decoder.decode(payload.as_ref()))
        .collect()
}
