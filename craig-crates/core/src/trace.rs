//! Loading a [`ClauseStore`] from a clause trace, and dumping it back.
use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use clause_trace_format::reader;
use clause_trace_format::reader::TraceReader;
use clause_trace_format::writer::TraceWriter;
use clause_trace_format::TraceHeader;
use thiserror::Error;

use crate::ClauseOrigin;
use crate::ClauseStore;
use crate::ClauseStoreError;
use crate::Literal;
use crate::Side;

#[derive(Error, Debug)]
pub enum TraceError {
    #[error("failed to parse the trace: {0}")]
    Format(#[from] reader::Error),
    #[error("the trace is malformed: {0}")]
    Store(#[from] ClauseStoreError),
    #[error("failed to open the trace: {0}")]
    Io(#[from] std::io::Error),
}

/// Read a clause trace into a new [`ClauseStore`].
///
/// The first `num_clauses_a` clauses of the trace become roots of A, the following ones up to
/// `num_roots` roots of B, and the rest are learned.
pub fn load_trace(source: impl Read) -> Result<ClauseStore, TraceError> {
    let mut reader = TraceReader::new(source)?;
    let header = reader.header();

    let mut store = ClauseStore::default();
    store.declare_variables(header.num_variables);

    let mut position = 0;
    while let Some(clause) = reader.next_clause()? {
        let origin = if position < header.num_clauses_a {
            ClauseOrigin::Root(Side::A)
        } else if position < header.num_roots {
            ClauseOrigin::Root(Side::B)
        } else {
            ClauseOrigin::Derived
        };

        let _ = store.add_clause_with_origin(clause.into_iter().map(Literal::from_dimacs), origin)?;
        position += 1;
    }

    Ok(store)
}

/// Read the clause trace in the file at `path`.
pub fn load_trace_file(path: &Path) -> Result<ClauseStore, TraceError> {
    load_trace(File::open(path)?)
}

/// Write the clauses of `store` as a clause trace, in id order.
pub fn dump_trace(store: &ClauseStore, sink: impl Write) -> std::io::Result<()> {
    let header = TraceHeader {
        num_variables: store.num_variables(),
        num_clauses: store.len(),
        num_roots: store.num_roots(),
        num_clauses_a: store.num_clauses_a(),
    };

    let mut writer = TraceWriter::new(sink, header)?;
    for (_, clause) in store.iter() {
        writer.write_clause(clause.literals().iter().map(|literal| literal.to_dimacs()))?;
    }

    writer.finish()
}
