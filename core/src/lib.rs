//! Zero-knowledge proofs of Hamming distance between two committed bit
//! vectors.
//!
//! The crate drives the full proof lifecycle: validating and encoding user
//! input, obtaining setup parameters and a proof from a pluggable proving
//! backend, persisting both artifacts, and later re-checking a claimed
//! distance against them. Proving-system arithmetic stays behind the
//! [`backend::ProofBackend`] capability; this crate never interprets the
//! bytes it moves.

pub mod backend;
pub mod codec;
pub mod distance;
pub mod error;
pub mod lifecycle;
pub mod session;
pub mod store;

pub use backend::{BackendConfig, BackendService, MockBackend, ProofBackend};
pub use codec::{BitVector, MAX_DISTANCE, VECTOR_BITS};
pub use distance::hamming_distance;
pub use error::{ErrorKind, LifecycleError};
pub use lifecycle::{
    GeneratePhase, GenerateReceipt, ProofLifecycleOrchestrator, Verdict, VerificationCoordinator,
};
pub use session::ProofSession;
pub use store::{ArtifactStore, KvStore, MemoryStore, RocksStore};
