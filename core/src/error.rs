//! Error taxonomy for the proof lifecycle.
//!
//! Four failure domains cross the core: user input, the proving backend,
//! durable storage, and missing-artifact preconditions. Variants stay
//! specific so messages carry the offending value; `kind()` collapses them
//! onto the coarse domain when a caller only needs to pick a reaction.
use thiserror::Error;

/// Errors surfaced by the generate and verify workflows
#[derive(Error, Debug)]
pub enum LifecycleError {
    /// Input contained a character other than '0' or '1'
    #[error("invalid character {found:?} in binary input (only '0' and '1' are accepted)")]
    InvalidBit { found: char },

    /// Input longer than the fixed vector length
    #[error("binary input is {len} characters long, maximum is {max}")]
    InputTooLong { len: usize, max: usize },

    /// Claimed distance did not parse as an integer
    #[error("claimed distance {0:?} is not an integer")]
    ClaimNotInteger(String),

    /// Claimed distance outside the provable range
    #[error("claimed distance {claim} is outside [0, {max}]")]
    ClaimOutOfRange { claim: i64, max: u32 },

    /// The proving backend failed or returned its failure sentinel
    #[error("proving backend error: {0}")]
    Backend(String),

    /// A backend call exceeded the configured ceiling
    #[error("proving backend call timed out after {0} seconds")]
    BackendTimeout(u64),

    /// The underlying key-value store failed to read or write
    #[error("artifact storage error: {0}")]
    Storage(anyhow::Error),

    /// A persisted artifact could not be decoded back into bytes
    #[error("artifact {key:?} is corrupt: {reason}")]
    CorruptArtifact { key: &'static str, reason: String },

    /// A required artifact has not been persisted yet
    #[error("artifact {0:?} not found; run the generate workflow first")]
    MissingArtifact(&'static str),
}

/// Coarse failure domain, for callers that branch on category rather than
/// on the concrete variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or out-of-range user input. Local and recoverable.
    Validation,
    /// Cryptographic operation failed. Terminal for the current call.
    Backend,
    /// Persistence read/write failed. Aborts the in-flight workflow.
    Storage,
    /// Operation invoked before the artifacts it needs exist.
    Precondition,
}

impl LifecycleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LifecycleError::InvalidBit { .. }
            | LifecycleError::InputTooLong { .. }
            | LifecycleError::ClaimNotInteger(_)
            | LifecycleError::ClaimOutOfRange { .. } => ErrorKind::Validation,
            LifecycleError::Backend(_) | LifecycleError::BackendTimeout(_) => ErrorKind::Backend,
            LifecycleError::Storage(_) | LifecycleError::CorruptArtifact { .. } => {
                ErrorKind::Storage
            }
            LifecycleError::MissingArtifact(_) => ErrorKind::Precondition,
        }
    }
}

/// Result type for lifecycle operations
pub type Result<T> = std::result::Result<T, LifecycleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LifecycleError::InvalidBit { found: '7' };
        assert_eq!(
            err.to_string(),
            "invalid character '7' in binary input (only '0' and '1' are accepted)"
        );

        let err = LifecycleError::ClaimOutOfRange { claim: 9, max: 8 };
        assert_eq!(err.to_string(), "claimed distance 9 is outside [0, 8]");

        let err = LifecycleError::MissingArtifact("proof");
        assert_eq!(
            err.to_string(),
            "artifact \"proof\" not found; run the generate workflow first"
        );
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            LifecycleError::InputTooLong { len: 9, max: 8 }.kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            LifecycleError::Backend("no proof".into()).kind(),
            ErrorKind::Backend
        );
        assert_eq!(
            LifecycleError::BackendTimeout(300).kind(),
            ErrorKind::Backend
        );
        assert_eq!(
            LifecycleError::Storage(anyhow::anyhow!("quota exceeded")).kind(),
            ErrorKind::Storage
        );
        assert_eq!(
            LifecycleError::CorruptArtifact {
                key: "proof",
                reason: "bad token".into()
            }
            .kind(),
            ErrorKind::Storage
        );
        assert_eq!(
            LifecycleError::MissingArtifact("setupParams").kind(),
            ErrorKind::Precondition
        );
    }
}
