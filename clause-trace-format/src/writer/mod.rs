//! Implements the writing of clause traces and resolution logs.
//!
//! See [`TraceWriter`] and [`ResolutionLogWriter`].

mod resolution_log;

use std::io::BufWriter;
use std::io::Write;
use std::num::NonZero;

pub use resolution_log::ResolutionLogWriter;

use crate::TraceHeader;

/// Writes a clause trace in the text format understood by
/// [`TraceReader`](crate::reader::TraceReader).
///
/// # Example
/// ```
/// # use std::num::NonZero;
/// # use clause_trace_format::TraceHeader;
/// # use clause_trace_format::writer::TraceWriter;
/// let header = TraceHeader {
///     num_variables: 1,
///     num_clauses: 3,
///     num_roots: 2,
///     num_clauses_a: 1,
/// };
///
/// let mut trace: Vec<u8> = Vec::new();
/// let mut writer = TraceWriter::new(&mut trace, header).unwrap();
///
/// let lit = |num: i32| NonZero::new(num).unwrap();
/// writer.write_clause([lit(1)]).unwrap();
/// writer.write_clause([lit(-1)]).unwrap();
/// writer.write_clause([]).unwrap();
/// writer.finish().unwrap();
///
/// assert_eq!("p 1 3 2 1\n1 0\n-1 0\n0\n", std::str::from_utf8(&trace).unwrap());
/// ```
#[derive(Debug)]
pub struct TraceWriter<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> TraceWriter<W> {
    /// Create a new trace writer and immediately write the `header` to `writer`.
    pub fn new(writer: W, header: TraceHeader) -> std::io::Result<Self> {
        let mut writer = BufWriter::new(writer);
        writeln!(writer, "{header}")?;

        Ok(TraceWriter { writer })
    }

    /// Write a single clause, terminated by `0`.
    pub fn write_clause(
        &mut self,
        literals: impl IntoIterator<Item = NonZero<i32>>,
    ) -> std::io::Result<()> {
        for literal in literals {
            write!(self.writer, "{literal} ")?;
        }

        writeln!(self.writer, "0")
    }

    /// Flush all buffered output to the underlying sink.
    pub fn finish(mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}
