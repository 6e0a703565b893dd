//! Random source shared by the region store and the quiz engine.
//!
//! Native builds seed from the thread-local OS-backed generator. Browser
//! builds seed from the wall clock instead, so no entropy backend is needed
//! there; those seeds are predictable to anyone who knows the start time,
//! which is acceptable for shuffles and display ids but nothing secret.
//! Tests seed explicitly.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// A generator with a seed unique to this process and call.
#[cfg(not(target_arch = "wasm32"))]
pub fn fresh_rng() -> StdRng {
    StdRng::from_rng(&mut rand::rng())
}

/// A generator with a seed unique to this process and call.
#[cfg(target_arch = "wasm32")]
pub fn fresh_rng() -> StdRng {
    use std::sync::atomic::{AtomicU64, Ordering};
    use web_time::{SystemTime, UNIX_EPOCH};

    static SEQUENCE: AtomicU64 = AtomicU64::new(0);

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let sequence = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    // Spread consecutive calls within the same clock tick apart
    StdRng::seed_from_u64(nanos ^ sequence.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}
