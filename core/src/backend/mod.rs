//! Opaque proving backend boundary.
//!
//! The proving system is a capability injected at session start; it can be a
//! native library, an RPC client, or a wasm binding without the lifecycle
//! noticing. The core never interprets the bytes it forwards.

pub mod mock;

pub use mock::MockBackend;

use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::info;

use crate::codec::BitVector;
use crate::error::{LifecycleError, Result};

/// The cryptographic capability the lifecycle drives.
///
/// Implementations own all proving-system arithmetic. `init` runs exactly
/// once, before any other method is called.
pub trait ProofBackend: Send + 'static {
    /// One-time resource load (module instantiation, key material, ...).
    fn init(&mut self) -> anyhow::Result<()>;

    /// Produces fresh setup parameters for circuit size `k`.
    fn setup_params(&self, k: u32) -> anyhow::Result<Vec<u8>>;

    /// Proves that `a` and `b` are their Hamming distance apart.
    ///
    /// This boundary has no error channel: an empty return value is the
    /// backend's failure sentinel.
    fn prove(&self, a: &BitVector, b: &BitVector, params: &[u8]) -> Vec<u8>;

    /// Checks `proof` against `params` and the claimed distance.
    ///
    /// `Err` means the call itself failed on structurally invalid bytes;
    /// `Ok(false)` is a clean negative verification.
    fn verify(&self, params: &[u8], claimed_distance: u32, proof: &[u8]) -> anyhow::Result<bool>;
}

/// Configuration for backend dispatch.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Ceiling for a single backend call (default: 5 minutes). Proof
    /// generation is CPU-bound and legitimately slow.
    pub call_timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(300),
        }
    }
}

enum BackendRequest {
    SetupParams {
        k: u32,
        reply: oneshot::Sender<anyhow::Result<Vec<u8>>>,
    },
    Prove {
        a: BitVector,
        b: BitVector,
        params: Vec<u8>,
        reply: oneshot::Sender<Vec<u8>>,
    },
    Verify {
        params: Vec<u8>,
        claimed_distance: u32,
        proof: Vec<u8>,
        reply: oneshot::Sender<anyhow::Result<bool>>,
    },
}

/// Dispatches backend calls onto a dedicated thread, one at a time.
///
/// The request channel holds a single slot, so at most one backend call is
/// ever in flight; callers queue behind it. There is no cancellation: a
/// call that outlives its timeout keeps running on the backend thread,
/// only the caller stops waiting.
#[derive(Clone)]
pub struct BackendService {
    request_tx: mpsc::Sender<BackendRequest>,
    config: BackendConfig,
}

impl BackendService {
    /// Loads `backend` on a dedicated thread and waits for its one-time
    /// initialization to finish before returning.
    pub async fn start<B: ProofBackend>(mut backend: B, config: BackendConfig) -> Result<Self> {
        let (request_tx, mut request_rx) = mpsc::channel::<BackendRequest>(1);
        let (init_tx, init_rx) = oneshot::channel();

        // CPU-bound proving work stays off the async runtime
        std::thread::spawn(move || {
            let init = backend.init();
            let failed = init.is_err();
            let _ = init_tx.send(init);
            if failed {
                return;
            }

            while let Some(request) = request_rx.blocking_recv() {
                match request {
                    BackendRequest::SetupParams { k, reply } => {
                        let _ = reply.send(backend.setup_params(k));
                    }
                    BackendRequest::Prove {
                        a,
                        b,
                        params,
                        reply,
                    } => {
                        let _ = reply.send(backend.prove(&a, &b, &params));
                    }
                    BackendRequest::Verify {
                        params,
                        claimed_distance,
                        proof,
                        reply,
                    } => {
                        let _ = reply.send(backend.verify(&params, claimed_distance, &proof));
                    }
                }
            }
        });

        match init_rx.await {
            Ok(Ok(())) => {
                info!("proving backend initialized");
                Ok(Self { request_tx, config })
            }
            Ok(Err(e)) => Err(LifecycleError::Backend(format!(
                "backend initialization failed: {e}"
            ))),
            Err(_) => Err(LifecycleError::Backend(
                "backend thread exited during initialization".into(),
            )),
        }
    }

    /// Requests fresh setup parameters for circuit size `k`.
    pub async fn setup_params(&self, k: u32) -> Result<Vec<u8>> {
        let result = self
            .dispatch(|reply| BackendRequest::SetupParams { k, reply })
            .await?;
        result.map_err(|e| LifecycleError::Backend(e.to_string()))
    }

    /// Requests a proof for the two vectors against `params`.
    ///
    /// Returns the backend's raw output; an empty vector is the failure
    /// sentinel, left to the workflow to interpret.
    pub async fn prove(&self, a: BitVector, b: BitVector, params: Vec<u8>) -> Result<Vec<u8>> {
        self.dispatch(|reply| BackendRequest::Prove {
            a,
            b,
            params,
            reply,
        })
        .await
    }

    /// Checks `proof` against `params` and the claimed distance.
    pub async fn verify(
        &self,
        params: Vec<u8>,
        claimed_distance: u32,
        proof: Vec<u8>,
    ) -> Result<bool> {
        let result = self
            .dispatch(|reply| BackendRequest::Verify {
                params,
                claimed_distance,
                proof,
                reply,
            })
            .await?;
        result.map_err(|e| LifecycleError::Backend(e.to_string()))
    }

    async fn dispatch<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> BackendRequest,
    ) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let request = build(reply_tx);

        let call = async {
            self.request_tx
                .send(request)
                .await
                .map_err(|_| LifecycleError::Backend("backend unavailable".into()))?;
            reply_rx
                .await
                .map_err(|_| LifecycleError::Backend("backend crashed".into()))
        };

        match timeout(self.config.call_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(LifecycleError::BackendTimeout(
                self.config.call_timeout.as_secs(),
            )),
        }
    }
}
