//! Verify-side workflow.
//!
//! Loads the persisted artifacts, validates the claimed distance, and asks
//! the backend whether the proof supports the claim. Runs independently of
//! the generate workflow; the artifact store is the only shared state.

use tracing::{info, warn};

use crate::codec::{self, MAX_DISTANCE};
use crate::error::{LifecycleError, Result};
use crate::session::ProofSession;
use crate::store::{KEY_PROOF, KEY_SETUP_PARAMS};

/// Result of checking a distance claim against the persisted artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The proof attests the committed vectors are exactly the claimed
    /// distance apart.
    Verified,
    /// The proof is sound but does not support the claim.
    Rejected,
}

/// Re-validates a distance claim against the most recently persisted run.
pub struct VerificationCoordinator {
    session: ProofSession,
}

impl VerificationCoordinator {
    pub fn new(session: ProofSession) -> Self {
        Self { session }
    }

    /// Parses and verifies a raw decimal claim as typed by the user.
    pub async fn verify_raw(&self, raw_claim: &str) -> Result<Verdict> {
        self.verify(codec::parse_claim(raw_claim)?).await
    }

    /// Verifies `claim` against the persisted setup parameters and proof.
    ///
    /// `Rejected` is a legitimate negative outcome, not an error; errors
    /// mean the claim could not be checked at all.
    pub async fn verify(&self, claim: i64) -> Result<Verdict> {
        // Claim validation is purely local; it runs before any storage read
        if claim < 0 || claim > MAX_DISTANCE as i64 {
            return Err(LifecycleError::ClaimOutOfRange {
                claim,
                max: MAX_DISTANCE,
            });
        }
        let claim = claim as u32;

        // Either artifact may be absent: never generated, or a previous run
        // failed between its two writes. Both surface before the backend is
        // involved.
        let params = self.session.store().load(KEY_SETUP_PARAMS)?;
        let proof = self.session.store().load(KEY_PROOF)?;

        info!(
            claim,
            params_len = params.len(),
            proof_len = proof.len(),
            "verifying distance claim"
        );

        if self.session.backend().verify(params, claim, proof).await? {
            Ok(Verdict::Verified)
        } else {
            warn!(claim, "distance claim rejected");
            Ok(Verdict::Rejected)
        }
    }
}
