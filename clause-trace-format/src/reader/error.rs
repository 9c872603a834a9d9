use std::io;
use std::num::NonZero;

#[cfg(doc)]
use super::TraceReader;

/// The errors that can be encountered by the [`TraceReader`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read from source: {0}")]
    IoError(#[from] io::Error),

    #[error("failed to parse trace line {line_nr} {span:?}: {reason}")]
    ParseError {
        line_nr: usize,
        reason: String,
        span: (usize, usize),
    },

    #[error("expected the header 'p <vars> <clauses> <roots> <clauses in A>' on line {line_nr}")]
    MissingHeader { line_nr: usize },

    #[error("the header announces {expected} clauses but the trace contains {actual}")]
    ClauseCount { expected: usize, actual: usize },

    #[error("literal {literal} on line {line_nr} exceeds the {num_variables} declared variables")]
    VariableOutOfRange {
        line_nr: usize,
        literal: NonZero<i32>,
        num_variables: u32,
    },
}
