//! Generate-side workflow.
//!
//! Drives encode → request params → persist params → generate proof →
//! persist proof against the injected session. The two persisted artifacts
//! are only ever read back by the verify workflow.

use tracing::{error, info};

use crate::codec::{self, VECTOR_BITS};
use crate::distance::hamming_distance;
use crate::error::{LifecycleError, Result};
use crate::session::ProofSession;
use crate::store::{KEY_PROOF, KEY_SETUP_PARAMS};

/// Progress of a generate run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratePhase {
    Idle,
    ParamsRequested,
    ParamsPersisted,
    ProofRequested,
    Complete,
    /// Terminal failure, recording the step that failed and why.
    Failed {
        at: &'static str,
        error: String,
    },
}

/// Outcome of a completed generate run.
#[derive(Debug, Clone)]
pub struct GenerateReceipt {
    /// Plaintext distance between the two inputs, for the user to carry
    /// into the verify step by hand. Never persisted.
    pub distance: u32,
    pub params_len: usize,
    pub proof_len: usize,
}

/// Drives the generate workflow and tracks its phase.
pub struct ProofLifecycleOrchestrator {
    session: ProofSession,
    phase: GeneratePhase,
}

impl ProofLifecycleOrchestrator {
    pub fn new(session: ProofSession) -> Self {
        Self {
            session,
            phase: GeneratePhase::Idle,
        }
    }

    /// Phase of the most recent run; `Complete` only after both artifacts
    /// were durably recorded.
    pub fn phase(&self) -> &GeneratePhase {
        &self.phase
    }

    /// Runs the full generate workflow for two raw binary strings.
    ///
    /// Setup parameters are regenerated on every run; a later verification
    /// always targets the most recently completed run, never an older one.
    pub async fn generate_and_persist(
        &mut self,
        raw_a: &str,
        raw_b: &str,
    ) -> Result<GenerateReceipt> {
        // Input validation failures abort before any state change
        let a = codec::encode(raw_a)?;
        let b = codec::encode(raw_b)?;
        let distance = hamming_distance(&a, &b);

        self.phase = GeneratePhase::ParamsRequested;
        info!(k = VECTOR_BITS, "requesting setup parameters");
        let setup = self.session.backend().setup_params(VECTOR_BITS as u32).await;
        let params = match setup {
            Ok(params) => params,
            Err(e) => return Err(self.fail("setup-params", e)),
        };

        // A proof generated against unrecorded params could never be
        // verified later, so a failed write stops the run before proving.
        let saved = self.session.store().save(KEY_SETUP_PARAMS, &params);
        if let Err(e) = saved {
            return Err(self.fail("persist-params", e));
        }
        self.phase = GeneratePhase::ParamsPersisted;

        self.phase = GeneratePhase::ProofRequested;
        info!("generating proof");
        let proved = self.session.backend().prove(a, b, params.clone()).await;
        let proof = match proved {
            Ok(proof) => proof,
            Err(e) => return Err(self.fail("prove", e)),
        };
        if proof.is_empty() {
            // The backend has no error channel for proving; empty output is
            // its failure sentinel, not a zero-length proof.
            let e = LifecycleError::Backend("proving failed (backend returned no proof)".into());
            return Err(self.fail("prove", e));
        }

        // The params persisted above stay in place if this write fails; the
        // verify workflow reports the absent proof as a missing artifact.
        let saved = self.session.store().save(KEY_PROOF, &proof);
        if let Err(e) = saved {
            return Err(self.fail("persist-proof", e));
        }

        self.phase = GeneratePhase::Complete;
        info!(
            distance,
            params_len = params.len(),
            proof_len = proof.len(),
            proof_head = %hex::encode(&proof[..proof.len().min(8)]),
            "proof artifacts persisted"
        );

        Ok(GenerateReceipt {
            distance,
            params_len: params.len(),
            proof_len: proof.len(),
        })
    }

    fn fail(&mut self, at: &'static str, err: LifecycleError) -> LifecycleError {
        error!(at, error = %err, "generate run failed");
        self.phase = GeneratePhase::Failed {
            at,
            error: err.to_string(),
        };
        err
    }
}
