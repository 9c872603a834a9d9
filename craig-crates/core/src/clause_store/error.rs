use thiserror::Error;

use crate::ClauseId;
use crate::Variable;

/// The errors which signal malformed input to a [`ClauseStore`](crate::ClauseStore).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseStoreError {
    #[error("the clause contains variable {variable} more than once")]
    DuplicateVariable { variable: Variable },
    #[error("the store already contains the empty clause {existing}")]
    MultipleEmptyClauses { existing: ClauseId },
    #[error("inconsistent partition at clause {clause}: {reason}")]
    InconsistentPartition {
        clause: ClauseId,
        reason: &'static str,
    },
}
