//! The replay of clause traces.
mod error;
mod proof_manager;
mod proof_statistics;
mod propagator;
mod resolvent;

pub use error::ProofError;
pub use proof_manager::ProofManager;
pub use proof_manager::Refutation;
pub use proof_statistics::ProofCounters;
pub use proof_statistics::ProofStatistics;
