use thiserror::Error;

use crate::ClauseId;
use crate::ClauseStoreError;

/// The reasons for which a trace cannot be turned into a refutation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProofError {
    #[error(transparent)]
    Store(#[from] ClauseStoreError),
    #[error("assuming the negation of clause {clause} is conflicting")]
    AssumptionConflict { clause: ClauseId },
    #[error("clause {clause} does not follow from the preceding clauses by unit propagation")]
    UnprovenClause { clause: ClauseId },
    #[error("the resolution chain of clause {clause} does not derive it: {reason}")]
    ProofMismatch { clause: ClauseId, reason: String },
    #[error("the trace does not derive the empty clause")]
    MissingRefutation,
    #[error("the resource budget ran out after {processed_clauses} learned clauses")]
    ResourceExhausted { processed_clauses: usize },
    #[error("{count} global variables exceed the limit of {limit} for truth tables")]
    TooManyGlobalVariables { count: usize, limit: usize },
}

impl ProofError {
    /// Whether the same trace might still be proven with a larger budget.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ProofError::ResourceExhausted { .. })
    }
}
