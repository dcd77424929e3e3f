//! Plaintext Hamming distance, computed client-side.
//!
//! The proof never reveals the distance to a verifier; the prover reads it
//! here and carries the number into the verify step by hand.

use crate::codec::BitVector;

/// Number of positions at which `a` and `b` differ.
///
/// Pure and independent of the proving backend.
pub fn hamming_distance(a: &BitVector, b: &BitVector) -> u32 {
    a.bits()
        .iter()
        .zip(b.bits())
        .filter(|(x, y)| x != y)
        .count() as u32
}
