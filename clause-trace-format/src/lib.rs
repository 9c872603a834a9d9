//! This crate contains abstractions for dealing with clause traces: the sequence of root and
//! learned clauses a SAT solver produced while refuting a formula, split into an A part and a B
//! part. It also contains a writer for the resolution proof log which can be emitted while such a
//! trace is replayed.
//!
//! To read traces see [`reader::TraceReader`], to write them see [`writer::TraceWriter`]. Proof
//! logs are written with [`writer::ResolutionLogWriter`].
//!
//! All literals are given in the DIMACS convention: a non-zero signed integer whose absolute value
//! is the (1-based) variable and whose sign is the polarity.

mod header;

pub mod reader;
pub mod writer;

pub use header::*;

/// The identifier of a step in a resolution proof log.
pub type StepId = std::num::NonZeroU64;
