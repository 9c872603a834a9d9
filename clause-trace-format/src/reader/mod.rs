//! Implements the parsing of clause traces.
//!
//! See [`TraceReader`] for information on how to parse a trace.

mod error;
mod parser;

use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::num::NonZero;

pub use error::Error;
use parser::LineParser;
use parser::TraceLine;

use crate::TraceHeader;

/// Used to read and parse clause traces.
///
/// The reader consumes the header eagerly when it is constructed, and then yields the clauses
/// of the trace one at a time through [`TraceReader::next_clause`]. Lines that are empty or
/// start with `c` are skipped.
///
/// Besides the syntax, the reader validates that every literal refers to a declared variable
/// and that the number of clauses matches the header. Whether the trace is a valid refutation
/// is not checked here.
///
/// # Example
/// ```
/// use clause_trace_format::reader::TraceReader;
///
/// let source = r#"
/// c a tiny trace
/// p 1 3 2 1
/// 1 0
/// -1 0
/// 0
/// "#;
///
/// let mut reader = TraceReader::new(source.as_bytes()).expect("valid header");
/// assert_eq!(2, reader.header().num_roots);
///
/// let first = reader.next_clause().expect("valid clause").expect("three clauses");
/// assert_eq!(vec![1], first.iter().map(|lit| lit.get()).collect::<Vec<_>>());
///
/// let _ = reader.next_clause().expect("valid clause");
/// let empty = reader.next_clause().expect("valid clause").expect("three clauses");
/// assert!(empty.is_empty());
///
/// assert_eq!(None, reader.next_clause().expect("finished reading source"));
/// ```
#[derive(Debug)]
pub struct TraceReader<R> {
    source: BufReader<R>,
    buffer: Vec<u8>,
    line_nr: usize,
    header: TraceHeader,
    clauses_read: usize,
}

impl<R: Read> TraceReader<R> {
    /// Construct a new trace reader which reads from `source`.
    ///
    /// The header is read immediately; a source which does not start (after comments) with a
    /// header results in [`Error::MissingHeader`].
    pub fn new(source: R) -> Result<TraceReader<R>, Error> {
        let mut reader = TraceReader {
            source: BufReader::new(source),
            buffer: Vec::new(),
            line_nr: 0,
            header: TraceHeader::default(),
            clauses_read: 0,
        };

        match reader.next_line()? {
            Some(TraceLine::Header(header)) => reader.header = header,
            _ => {
                return Err(Error::MissingHeader {
                    line_nr: reader.line_nr,
                })
            }
        }

        Ok(reader)
    }

    /// The header of the trace.
    pub fn header(&self) -> TraceHeader {
        self.header
    }

    /// Read the next clause of the trace.
    ///
    /// Returns `Ok(None)` once the end of the source is reached, provided exactly as many
    /// clauses were read as the header announced.
    pub fn next_clause(&mut self) -> Result<Option<Vec<NonZero<i32>>>, Error> {
        let literals = match self.next_line()? {
            None => {
                if self.clauses_read != self.header.num_clauses {
                    return Err(Error::ClauseCount {
                        expected: self.header.num_clauses,
                        actual: self.clauses_read,
                    });
                }

                return Ok(None);
            }

            Some(TraceLine::Header(_)) => {
                return Err(Error::ParseError {
                    line_nr: self.line_nr,
                    reason: "a trace has exactly one header".to_owned(),
                    span: (0, 1),
                })
            }

            Some(TraceLine::Clause(literals)) => literals,

            Some(TraceLine::Nothing) => unreachable!("next_line skips empty lines"),
        };

        self.clauses_read += 1;
        if self.clauses_read > self.header.num_clauses {
            return Err(Error::ClauseCount {
                expected: self.header.num_clauses,
                actual: self.clauses_read,
            });
        }

        if let Some(&literal) = literals
            .iter()
            .find(|literal| literal.unsigned_abs().get() > self.header.num_variables)
        {
            return Err(Error::VariableOutOfRange {
                line_nr: self.line_nr,
                literal,
                num_variables: self.header.num_variables,
            });
        }

        Ok(Some(literals))
    }

    /// Reads lines until one with content is found, or the source is exhausted.
    fn next_line(&mut self) -> Result<Option<TraceLine>, Error> {
        loop {
            self.buffer.clear();
            let read_bytes = self.source.read_until(b'\n', &mut self.buffer)?;

            if read_bytes == 0 {
                return Ok(None);
            }

            self.line_nr += 1;

            match LineParser::new(&self.buffer, self.line_nr).parse()? {
                TraceLine::Nothing => continue,
                line => return Ok(Some(line)),
            }
        }
    }
}

impl<R: Read> Iterator for TraceReader<R> {
    type Item = Result<Vec<NonZero<i32>>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_clause().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(literals: Vec<NonZero<i32>>) -> Vec<i32> {
        literals.into_iter().map(NonZero::get).collect()
    }

    #[test]
    fn reads_all_clauses_of_a_trace() {
        let source = "p 2 4 3 2\n1 2 0\n-1 0\nc a comment\n\n-2 0\n0\n";
        let mut reader = TraceReader::new(source.as_bytes()).expect("valid header");

        assert_eq!(
            TraceHeader {
                num_variables: 2,
                num_clauses: 4,
                num_roots: 3,
                num_clauses_a: 2,
            },
            reader.header()
        );

        let clauses = reader
            .by_ref()
            .map(|clause| clause.map(codes))
            .collect::<Result<Vec<_>, _>>()
            .expect("valid trace");

        assert_eq!(vec![vec![1, 2], vec![-1], vec![-2], vec![]], clauses);
    }

    #[test]
    fn missing_header_is_reported() {
        let error = TraceReader::new("c only a comment\n1 0\n".as_bytes())
            .expect_err("no header before clauses");

        assert!(matches!(error, Error::MissingHeader { line_nr: 2 }));
    }

    #[test]
    fn too_few_clauses_are_reported() {
        let mut reader = TraceReader::new("p 1 3 1 1\n1 0\n0\n".as_bytes()).unwrap();

        assert!(reader.next_clause().unwrap().is_some());
        assert!(reader.next_clause().unwrap().is_some());
        assert!(matches!(
            reader.next_clause(),
            Err(Error::ClauseCount {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn too_many_clauses_are_reported() {
        let mut reader = TraceReader::new("p 1 1 1 0\n1 0\n0\n".as_bytes()).unwrap();

        assert!(reader.next_clause().unwrap().is_some());
        assert!(matches!(
            reader.next_clause(),
            Err(Error::ClauseCount {
                expected: 1,
                actual: 2
            })
        ));
    }

    #[test]
    fn oversized_literals_are_parse_errors() {
        let mut reader =
            TraceReader::new("p 2 1 1 1\n18446744073709551615 0\n".as_bytes()).unwrap();

        assert!(matches!(
            reader.next_clause(),
            Err(Error::ParseError { line_nr: 2, .. })
        ));

        let mut reader =
            TraceReader::new("p 2 1 1 1\n-9223372036854775808 0\n".as_bytes()).unwrap();

        assert!(matches!(
            reader.next_clause(),
            Err(Error::ParseError { line_nr: 2, .. })
        ));
    }

    #[test]
    fn smallest_i32_literal_exceeds_every_header() {
        let mut reader =
            TraceReader::new("p 2147483647 1 1 1\n-2147483648 0\n".as_bytes()).unwrap();

        assert!(matches!(
            reader.next_clause(),
            Err(Error::VariableOutOfRange { line_nr: 2, .. })
        ));
    }

    #[test]
    fn undeclared_variables_are_reported() {
        let mut reader = TraceReader::new("p 2 1 1 1\n1 -3 0\n".as_bytes()).unwrap();

        let error = reader.next_clause().expect_err("variable 3 is not declared");
        assert!(matches!(
            error,
            Error::VariableOutOfRange {
                line_nr: 2,
                num_variables: 2,
                ..
            }
        ));
    }
}
