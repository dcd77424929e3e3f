//! Binary input validation and encoding.
//!
//! Raw user input arrives as a string of '0'/'1' characters. Each character
//! becomes one element of the encoded vector; the string is never parsed as
//! a multi-digit number.

use crate::error::{LifecycleError, Result};

/// Fixed length of every committed vector. Doubles as the circuit size
/// parameter k forwarded to the proving backend.
pub const VECTOR_BITS: usize = 8;

/// Maximum Hamming distance two vectors of [`VECTOR_BITS`] bits can be apart.
pub const MAX_DISTANCE: u32 = VECTOR_BITS as u32;

/// An encoded binary vector of exactly [`VECTOR_BITS`] bits, most
/// significant bit first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitVector([u8; VECTOR_BITS]);

impl BitVector {
    /// The individual bit values, each 0 or 1.
    pub fn bits(&self) -> &[u8; VECTOR_BITS] {
        &self.0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

/// Validates `raw` and encodes it into a [`BitVector`].
///
/// Inputs shorter than [`VECTOR_BITS`] characters are left-padded with
/// zeros, preserving the given digits in their original order:
/// `"101"` encodes as `[0, 0, 0, 0, 0, 1, 0, 1]`.
pub fn encode(raw: &str) -> Result<BitVector> {
    let len = raw.chars().count();
    if len > VECTOR_BITS {
        return Err(LifecycleError::InputTooLong {
            len,
            max: VECTOR_BITS,
        });
    }
    if let Some(found) = raw.chars().find(|c| *c != '0' && *c != '1') {
        return Err(LifecycleError::InvalidBit { found });
    }

    let mut bits = [0u8; VECTOR_BITS];
    let offset = VECTOR_BITS - len;
    for (i, c) in raw.chars().enumerate() {
        bits[offset + i] = if c == '1' { 1 } else { 0 };
    }
    Ok(BitVector(bits))
}

/// Parses the decimal distance claim typed by the user during verification.
///
/// Range checking happens in the verify workflow; this only rejects input
/// that is not an integer at all.
pub fn parse_claim(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| LifecycleError::ClaimNotInteger(raw.to_string()))
}
