use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use sha2::{Digest, Sha256};

const SUFFIX_LEN: usize = 6;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Appends a short hex digest of the current time to `base`.
///
/// The result looks like `base-3fa9c1`. Names produced in the same process
/// never repeat a digest input, even within one clock tick.
pub fn unique_name(base: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    let sequence = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    name_with_stamp(base, nanos, sequence)
}

fn name_with_stamp(base: &str, nanos: u128, sequence: u64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(nanos.to_string().as_bytes());
    hasher.update(b":");
    hasher.update(sequence.to_string().as_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("{base}-{}", &digest[..SUFFIX_LEN])
}
