//! Mock proving backend.
//!
//! Stands in for the real proving system during tests and local runs. Proofs
//! are blake3 commitments binding the setup parameters to the measured
//! distance, so verification genuinely distinguishes correct claims, wrong
//! claims, and artifacts left over from a superseded generation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::codec::BitVector;
use crate::distance::hamming_distance;

use super::ProofBackend;

const PARAMS_LEN: usize = 64;
const PROOF_LEN: usize = 32;

const PARAMS_DOMAIN: &[u8] = b"bitgap-mock-params-v1";
const PROOF_DOMAIN: &[u8] = b"bitgap-mock-proof-v1";

/// Mock backend producing commitment-style fake proofs.
pub struct MockBackend {
    /// Simulated proving time
    prove_time: Duration,
    initialized: bool,
    runs: AtomicU64,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            prove_time: Duration::ZERO,
            initialized: false,
            runs: AtomicU64::new(0),
        }
    }

    /// Create with simulated proving time (for testing)
    pub fn with_prove_time(ms: u64) -> Self {
        Self {
            prove_time: Duration::from_millis(ms),
            ..Self::new()
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ProofBackend for MockBackend {
    fn init(&mut self) -> anyhow::Result<()> {
        self.initialized = true;
        Ok(())
    }

    fn setup_params(&self, k: u32) -> anyhow::Result<Vec<u8>> {
        anyhow::ensure!(self.initialized, "backend not initialized");

        // Fresh parameters on every call: a proof must only verify against
        // the generation it was created from.
        let nonce = self.runs.fetch_add(1, Ordering::Relaxed);
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();

        let mut hasher = blake3::Hasher::new();
        hasher.update(PARAMS_DOMAIN);
        hasher.update(&k.to_le_bytes());
        hasher.update(&nonce.to_le_bytes());
        hasher.update(&now.as_nanos().to_le_bytes());

        let mut params = vec![0u8; PARAMS_LEN];
        hasher.finalize_xof().fill(&mut params);
        Ok(params)
    }

    fn prove(&self, a: &BitVector, b: &BitVector, params: &[u8]) -> Vec<u8> {
        // Empty output is the failure sentinel at this boundary
        if !self.initialized || params.is_empty() {
            return Vec::new();
        }

        if !self.prove_time.is_zero() {
            std::thread::sleep(self.prove_time);
        }

        commitment(params, hamming_distance(a, b))
    }

    fn verify(&self, params: &[u8], claimed_distance: u32, proof: &[u8]) -> anyhow::Result<bool> {
        anyhow::ensure!(!params.is_empty(), "setup parameters are empty");
        anyhow::ensure!(
            proof.len() == PROOF_LEN,
            "malformed proof: expected {} bytes, got {}",
            PROOF_LEN,
            proof.len()
        );

        Ok(commitment(params, claimed_distance) == proof)
    }
}

fn commitment(params: &[u8], distance: u32) -> Vec<u8> {
    let mut hasher = blake3::Hasher::new();
    hasher.update(PROOF_DOMAIN);
    hasher.update(params);
    hasher.update(&distance.to_le_bytes());
    hasher.finalize().as_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode;

    fn ready() -> MockBackend {
        let mut backend = MockBackend::new();
        backend.init().unwrap();
        backend
    }

    #[test]
    fn proof_verifies_for_true_distance_only() {
        let backend = ready();
        let a = encode("101").unwrap();
        let b = encode("011").unwrap();

        let params = backend.setup_params(8).unwrap();
        let proof = backend.prove(&a, &b, &params);
        assert_eq!(proof.len(), PROOF_LEN);

        assert!(backend.verify(&params, 2, &proof).unwrap());
        assert!(!backend.verify(&params, 3, &proof).unwrap());
        assert!(!backend.verify(&params, 0, &proof).unwrap());
    }

    #[test]
    fn params_are_fresh_per_call() {
        let backend = ready();
        let first = backend.setup_params(8).unwrap();
        let second = backend.setup_params(8).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn stale_params_reject_proof() {
        let backend = ready();
        let a = encode("101").unwrap();
        let b = encode("011").unwrap();

        let old_params = backend.setup_params(8).unwrap();
        let proof = backend.prove(&a, &b, &old_params);

        let new_params = backend.setup_params(8).unwrap();
        assert!(!backend.verify(&new_params, 2, &proof).unwrap());
    }

    #[test]
    fn prove_returns_sentinel_on_bad_state() {
        let a = encode("101").unwrap();
        let b = encode("011").unwrap();

        let uninitialized = MockBackend::new();
        assert!(uninitialized.prove(&a, &b, &[1, 2, 3]).is_empty());

        let backend = ready();
        assert!(backend.prove(&a, &b, &[]).is_empty());
    }

    #[test]
    fn verify_errors_on_structurally_invalid_bytes() {
        let backend = ready();
        let params = backend.setup_params(8).unwrap();

        assert!(backend.verify(&params, 2, &[1, 2, 3]).is_err());
        assert!(backend.verify(&[], 2, &[0u8; PROOF_LEN]).is_err());
    }
}
