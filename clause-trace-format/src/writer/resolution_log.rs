use std::io::BufWriter;
use std::io::Write;
use std::num::NonZero;

use crate::StepId;

/// Writes the resolution log of a proof.
///
/// Every root clause is written as `<id> <literals> 0 0`, and every resolution step as
/// `<new id> * <previous id> <reason id> 0 0`, where the ids are the proof numbers assigned to
/// the clauses and intermediate results.
///
/// # Example
/// ```
/// # use std::num::NonZero;
/// # use clause_trace_format::writer::ResolutionLogWriter;
/// let mut log: Vec<u8> = Vec::new();
/// let mut writer = ResolutionLogWriter::new(&mut log);
///
/// let id = |num: u64| NonZero::new(num).unwrap();
/// let lit = |num: i32| NonZero::new(num).unwrap();
/// writer.log_root(id(1), [lit(1), lit(-2)]).unwrap();
/// writer.log_root(id(2), [lit(2)]).unwrap();
/// writer.log_resolution(id(3), id(1), id(2)).unwrap();
/// writer.flush().unwrap();
/// drop(writer);
///
/// assert_eq!("1 1 -2 0 0\n2 2 0 0\n3 * 1 2 0 0\n", std::str::from_utf8(&log).unwrap());
/// ```
#[derive(Debug)]
pub struct ResolutionLogWriter<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> ResolutionLogWriter<W> {
    pub fn new(writer: W) -> Self {
        ResolutionLogWriter {
            writer: BufWriter::new(writer),
        }
    }

    /// Log a root clause with the given proof number.
    pub fn log_root(
        &mut self,
        id: StepId,
        literals: impl IntoIterator<Item = NonZero<i32>>,
    ) -> std::io::Result<()> {
        write!(self.writer, "{id} ")?;

        for literal in literals {
            write!(self.writer, "{literal} ")?;
        }

        writeln!(self.writer, "0 0")
    }

    /// Log that `new` is the resolvent of `previous` and the clause with proof number `reason`.
    pub fn log_resolution(
        &mut self,
        new: StepId,
        previous: StepId,
        reason: StepId,
    ) -> std::io::Result<()> {
        writeln!(self.writer, "{new} * {previous} {reason} 0 0")
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}
