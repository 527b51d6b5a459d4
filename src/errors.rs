use thiserror::Error;
use uuid::Uuid;

/// Error type that captures the ledger engine's failure modes.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("no record with id {0}")]
    NotFound(Uuid),
    #[error("category `{0}` is referenced by existing transactions")]
    CategoryInUse(String),
    #[error("parent-sum invariant violated: {0}")]
    InvariantViolation(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
