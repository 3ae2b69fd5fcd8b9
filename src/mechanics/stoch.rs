//! Stochastic mechanics: stream seeding and bounded integer draws.
//! Note: every run owns its `bevy_prng::WyRand` and passes it down by
//! `&mut`; nothing here holds RNG state between calls.
use std::time::{SystemTime, UNIX_EPOCH};

use bevy_prng::WyRand;
use rand_core::{RngCore, SeedableRng};

/// Seed value that asks for a time-derived seed instead of a fixed one.
pub const UNSET_SEED: u64 = 0;

/// Replace the `UNSET_SEED` sentinel with a time-derived, non-zero seed.
/// Any other seed is returned unchanged.
pub fn resolve_seed(seed: u64) -> u64 {
    if seed != UNSET_SEED {
        return seed;
    }
    let micros = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(1);
    micros.max(1)
}

/// Fresh stream for one run.
#[inline]
pub fn stream(seed: u64) -> WyRand {
    WyRand::from_seed(seed.to_le_bytes())
}

/// Uniform integer in `[0, n)` via rejection over `next_u32` (no modulo bias).
/// `n == 0` is treated as `n == 1`.
#[inline]
pub fn uniform_below<R: RngCore + ?Sized>(rng: &mut R, n: u32) -> u32 {
    let n = n.max(1);
    // Largest multiple of n minus one; values above it are redrawn.
    let zone = u32::MAX - (u32::MAX - n + 1) % n;
    loop {
        let v = rng.next_u32();
        if v <= zone {
            return v % n;
        }
    }
}
