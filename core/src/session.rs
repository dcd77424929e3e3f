//! Session-scoped wiring shared by the generate and verify workflows.
//!
//! The two workflows run decoupled in time and share nothing but the
//! artifact store. Holding both dependencies in one explicit context keeps
//! that coupling visible instead of hiding it in globals.

use std::sync::Arc;

use crate::backend::{BackendConfig, BackendService, ProofBackend};
use crate::error::Result;
use crate::store::{ArtifactStore, KvStore};

/// Everything one user session needs to prove and verify.
///
/// Cheap to clone; clones share the same store and backend dispatch.
#[derive(Clone)]
pub struct ProofSession {
    store: ArtifactStore,
    backend: BackendService,
}

impl ProofSession {
    /// Brings the backend up and binds it to `kv` for artifact persistence.
    ///
    /// Waits for the backend's one-time initialization; no backend call can
    /// be issued before this returns.
    pub async fn open<B: ProofBackend>(
        kv: Arc<dyn KvStore>,
        backend: B,
        config: BackendConfig,
    ) -> Result<Self> {
        let backend = BackendService::start(backend, config).await?;
        Ok(Self {
            store: ArtifactStore::new(kv),
            backend,
        })
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    pub fn backend(&self) -> &BackendService {
        &self.backend
    }
}
