//! Hash-derived pseudo-random draws.
//!
//! Every "random" payroll attribute is a pure function of the entity identifier and a purpose
//! tag, so re-scoring the same store always reproduces the same figures without storing them.

use sha2::{Digest, Sha256};

const MANTISSA_BITS: u32 = 53;

/// Deterministic value in `[0, 1)` for an identifier and purpose tag.
pub fn draw(identifier: &str, purpose: &str) -> f64 {
    let mut hasher = Sha256::new();
    hasher.update(identifier.as_bytes());
    hasher.update(purpose.as_bytes());
    let value = leading_u64(&hasher.finalize());

    (value >> (64 - MANTISSA_BITS)) as f64 / (1u64 << MANTISSA_BITS) as f64
}

/// Stable bucket in `[0, modulus)` derived from the identifier alone.
///
/// Feeds the secondary variance terms of the payroll synthesizer. Returns 0 for a zero modulus.
pub fn secondary_bucket(identifier: &str, modulus: u64) -> u64 {
    if modulus == 0 {
        return 0;
    }
    let digest = Sha256::digest(identifier.as_bytes());
    leading_u64(&digest) % modulus
}

fn leading_u64(digest: &[u8]) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}
