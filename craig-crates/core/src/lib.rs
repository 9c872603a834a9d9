//! Replays the clause trace of a SAT refutation and reconstructs the resolution chain of every
//! learned clause. Along these chains, a Craig interpolant of the A and B roots of the trace is
//! computed (as a truth table or as an and-inverter graph), or the unsat core of the refutation is
//! collected.
//!
//! The clauses are kept in a [`ClauseStore`], which can be filled clause by clause or loaded from
//! a trace with [`trace::load_trace`]. A [`ProofManager`] replays the store with one of the
//! [`interpolation`] backends; [`run_proof`] selects the backend from [`ProofOptions`].
pub mod asserts;
pub(crate) mod basic_types;
pub(crate) mod clause_store;
pub(crate) mod engine;

pub mod aig;
pub mod classification;
pub mod containers;
pub mod interpolation;
pub mod proof;
pub mod statistics;
pub mod termination;
pub mod trace;

pub use convert_case;

// The options and outputs are exported from the root of the crate.
mod api;

pub use api::*;

pub use crate::basic_types::ClauseId;
pub use crate::basic_types::Literal;
pub use crate::basic_types::Variable;
pub use crate::clause_store::Clause;
pub use crate::clause_store::ClauseOrigin;
pub use crate::clause_store::ClauseStore;
pub use crate::clause_store::ClauseStoreError;
pub use crate::clause_store::Side;
pub use crate::engine::ProofCounters;
pub use crate::engine::ProofError;
pub use crate::engine::ProofManager;
pub use crate::engine::ProofStatistics;
pub use crate::engine::Refutation;
