//! While a trace is replayed, the engine can write a resolution proof log: every root clause with
//! its proof number, and every resolution step as `<new> * <previous> <reason> 0 0`. The log is a
//! pure side effect; failing to write it never changes the result of a proof.
use std::fmt::Debug;
use std::fmt::Formatter;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use clause_trace_format::writer::ResolutionLogWriter;
use clause_trace_format::StepId;
use log::warn;

use crate::Clause;

/// The sink of the resolution proof log.
///
/// When no log should be written, use the implementation of [`Default`].
#[derive(Default)]
pub struct ProofLog {
    writer: Option<ResolutionLogWriter<Box<dyn Write>>>,
}

impl Debug for ProofLog {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProofLog")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl ProofLog {
    /// Log to the file at `file_path`.
    ///
    /// If the path ends in `.gz` (and the `gzipped-proofs` feature is enabled), the log is
    /// gzip-compressed.
    pub fn file(file_path: &Path) -> std::io::Result<ProofLog> {
        let file = File::create(file_path)?;

        Ok(ProofLog {
            writer: Some(ResolutionLogWriter::new(file_sink(file, file_path))),
        })
    }

    /// Log to an arbitrary sink.
    pub fn writer(writer: impl Write + 'static) -> ProofLog {
        let writer: Box<dyn Write> = Box::new(writer);

        ProofLog {
            writer: Some(ResolutionLogWriter::new(writer)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }

    pub(crate) fn log_root(&mut self, id: StepId, clause: &Clause) {
        let Some(writer) = self.writer.as_mut() else {
            return;
        };

        let result = writer.log_root(id, clause.literals().iter().map(|literal| literal.to_dimacs()));
        self.handle(result);
    }

    pub(crate) fn log_resolution(&mut self, new: StepId, previous: StepId, reason: StepId) {
        let Some(writer) = self.writer.as_mut() else {
            return;
        };

        let result = writer.log_resolution(new, previous, reason);
        self.handle(result);
    }

    /// Flush the log and close the sink.
    pub(crate) fn finish(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            if let Err(error) = writer.flush() {
                warn!("Failed to finish the proof log: {error}");
            }
        }
    }

    fn handle(&mut self, result: std::io::Result<()>) {
        if let Err(error) = result {
            warn!("Failed to write to the proof log, no further steps are logged: {error}");
            self.writer = None;
        }
    }
}

#[cfg(feature = "gzipped-proofs")]
fn file_sink(file: File, file_path: &Path) -> Box<dyn Write> {
    if file_path.extension().is_some_and(|extension| extension == "gz") {
        Box::new(flate2::write::GzEncoder::new(
            file,
            flate2::Compression::fast(),
        ))
    } else {
        Box::new(file)
    }
}

#[cfg(not(feature = "gzipped-proofs"))]
fn file_sink(file: File, _: &Path) -> Box<dyn Write> {
    Box::new(file)
}
