use craig::core::trace::TraceError;
use craig::core::ProofError;
use thiserror::Error;

pub(crate) type CraigResult<T> = Result<T, CraigError>;

#[derive(Error, Debug)]
pub(crate) enum CraigError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Failed to load the trace, more details: {0}")]
    InvalidTrace(#[from] TraceError),
    #[error("The trace could not be replayed, more details: {0}")]
    Proof(#[from] ProofError),
}
