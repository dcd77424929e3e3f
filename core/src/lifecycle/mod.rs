pub mod coordinator;
pub mod orchestrator;

pub use coordinator::{Verdict, VerificationCoordinator};
pub use orchestrator::{GeneratePhase, GenerateReceipt, ProofLifecycleOrchestrator};
