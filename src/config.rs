use std::sync::OnceLock;

/// Default byte-mode payload ceiling, in bytes.
pub const DEFAULT_MAX_BYTE_PAYLOAD: usize = 4096;

/// Default number of sightings before a value is confirmed.
pub const DEFAULT_CONFIRMATIONS: u32 = 2;

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

static MAX_BYTE_PAYLOAD: OnceLock<usize> = OnceLock::new();

/// Upper bound on a byte-mode count field accepted by the extractor.
///
/// Clamped to the range a 16-bit count field can express.
pub(crate) fn max_byte_payload() -> usize {
    *MAX_BYTE_PAYLOAD.get_or_init(|| {
        parse_env_usize("KSCAN_MAX_BYTE_PAYLOAD", DEFAULT_MAX_BYTE_PAYLOAD).clamp(1, 0xFFFF)
    })
}

static CONFIRMATIONS: OnceLock<u32> = OnceLock::new();

/// Sightings of the same display value needed before a scan is confirmed.
pub(crate) fn confirmations() -> u32 {
    *CONFIRMATIONS.get_or_init(|| {
        parse_env_u32("KSCAN_CONFIRMATIONS", DEFAULT_CONFIRMATIONS).clamp(2, 16)
    })
}
