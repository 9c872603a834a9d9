use std::iter::Copied;
use std::iter::Peekable;
use std::num::NonZero;
use std::slice::Iter;

use crate::reader::Error;
use crate::TraceHeader;

/// The content of a single line of a trace.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum TraceLine {
    /// A blank line or a comment line.
    Nothing,
    Header(TraceHeader),
    /// A clause, given by its literals without the terminating zero.
    Clause(Vec<NonZero<i32>>),
}

/// Parses a single line of a trace.
///
/// See [`LineParser::parse`] for more information.
pub(super) struct LineParser<'src> {
    bytes: Peekable<Copied<Iter<'src, u8>>>,
    position: usize,
    line_nr: usize,
}

impl<'src> LineParser<'src> {
    pub(super) fn new(line: &'src [u8], line_nr: usize) -> Self {
        let stripped_line = line
            .strip_suffix(b"\n")
            .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
            .unwrap_or(line);

        LineParser {
            bytes: stripped_line.iter().copied().peekable(),
            position: 0,
            line_nr,
        }
    }

    /// Parses a single line from a trace.
    ///
    /// Lines that are empty, or that start with `c`, produce [`TraceLine::Nothing`]. A line
    /// starting with `p` is a header, and anything else must be a zero-terminated clause.
    pub(super) fn parse(mut self) -> Result<TraceLine, Error> {
        self.skip_whitespace();

        match self.peek() {
            None | Some(b'c') => Ok(TraceLine::Nothing),
            Some(b'p') => {
                let _ = self.next();
                self.parse_header().map(TraceLine::Header)
            }
            Some(byte) if is_start_of_signed_number(byte) => {
                self.parse_clause().map(TraceLine::Clause)
            }
            Some(byte) => Err(self.error(if byte.is_ascii() {
                format!("expected p, c, or a literal. got '{}'", byte as char)
            } else {
                "expected p, c, or a literal".to_owned()
            })),
        }
    }

    /// Parses the remainder of a line in the following shape:
    /// ```ignored
    /// "p" <u32> <usize> <usize> <usize>
    /// ```
    fn parse_header(&mut self) -> Result<TraceHeader, Error> {
        self.consume_separator()?;
        let num_variables = self.consume_unsigned()?;
        self.consume_separator()?;
        let num_clauses = self.consume_unsigned()?;
        self.consume_separator()?;
        let num_roots = self.consume_unsigned()?;
        self.consume_separator()?;
        let num_clauses_a = self.consume_unsigned()?;
        self.expect_end_of_line()?;

        // Every variable must have a DIMACS code, so at most `i32::MAX` variables.
        let num_variables = i32::try_from(num_variables)
            .ok()
            .and_then(|num_variables| u32::try_from(num_variables).ok())
            .ok_or_else(|| self.error("the number of variables exceeds i32::MAX"))?;

        if num_roots > num_clauses || num_clauses_a > num_roots {
            return Err(self.error(format!(
                "expected clauses in A ({num_clauses_a}) <= roots ({num_roots}) <= clauses ({num_clauses})"
            )));
        }

        Ok(TraceHeader {
            num_variables,
            num_clauses: num_clauses as usize,
            num_roots: num_roots as usize,
            num_clauses_a: num_clauses_a as usize,
        })
    }

    /// Parses a line in the following shape:
    /// ```ignored
    /// (<signed non-zero i32>)* "0"
    /// ```
    fn parse_clause(&mut self) -> Result<Vec<NonZero<i32>>, Error> {
        let mut literals = vec![];

        loop {
            self.skip_whitespace();

            if !self.peek().is_some_and(is_start_of_signed_number) {
                return Err(self.error("expected the clause to be terminated by 0"));
            }

            let code = self.consume_signed_integer()?;

            match NonZero::new(code) {
                Some(literal) => literals.push(literal),
                None => break,
            }
        }

        self.expect_end_of_line()?;

        Ok(literals)
    }

    fn consume_separator(&mut self) -> Result<(), Error> {
        if !self.peek().is_some_and(|byte| byte.is_ascii_whitespace()) {
            return Err(self.error("expected whitespace"));
        }

        self.skip_whitespace();
        Ok(())
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|byte| byte.is_ascii_whitespace()) {
            let _ = self.next();
        }
    }

    fn expect_end_of_line(&mut self) -> Result<(), Error> {
        self.skip_whitespace();

        match self.peek() {
            None => Ok(()),
            Some(_) => Err(self.error("unexpected trailing content")),
        }
    }

    fn consume_unsigned(&mut self) -> Result<u64, Error> {
        let start = self.position;
        let mut value: u64 = 0;

        while let Some(byte) = self.peek().filter(u8::is_ascii_digit) {
            let _ = self.next();
            value = value
                .checked_mul(10)
                .and_then(|value| value.checked_add(u64::from(byte - b'0')))
                .ok_or_else(|| self.error_at(start, "integer overflow"))?;
        }

        if start == self.position {
            return Err(self.error("expected an unsigned integer"));
        }

        Ok(value)
    }

    fn consume_signed_integer(&mut self) -> Result<i32, Error> {
        let start = self.position;
        let is_negative = if self.peek() == Some(b'-') {
            let _ = self.next();
            true
        } else {
            false
        };

        let magnitude = self.consume_unsigned()?;
        let signed = i64::try_from(magnitude)
            .ok()
            .and_then(|value| if is_negative { value.checked_neg() } else { Some(value) })
            .and_then(|value| i32::try_from(value).ok());

        signed.ok_or_else(|| self.error_at(start, "literal does not fit in 32 bits"))
    }

    fn peek(&mut self) -> Option<u8> {
        self.bytes.peek().copied()
    }

    fn next(&mut self) -> Option<u8> {
        let byte = self.bytes.next()?;
        self.position += 1;
        Some(byte)
    }

    fn error(&self, reason: impl Into<String>) -> Error {
        self.error_at(self.position, reason)
    }

    fn error_at(&self, start: usize, reason: impl Into<String>) -> Error {
        Error::ParseError {
            line_nr: self.line_nr,
            reason: reason.into(),
            span: (start, self.position.max(start + 1)),
        }
    }
}

fn is_start_of_signed_number(byte: u8) -> bool {
    byte == b'-' || byte.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<TraceLine, Error> {
        LineParser::new(line.as_bytes(), 1).parse()
    }

    fn lits(codes: &[i32]) -> Vec<NonZero<i32>> {
        codes.iter().map(|&code| NonZero::new(code).unwrap()).collect()
    }

    #[test]
    fn header_line() {
        let line = parse("p 5 7 4 2\n").expect("valid header");

        assert_eq!(
            TraceLine::Header(TraceHeader {
                num_variables: 5,
                num_clauses: 7,
                num_roots: 4,
                num_clauses_a: 2,
            }),
            line
        );
    }

    #[test]
    fn header_with_more_roots_than_clauses_is_rejected() {
        assert!(matches!(
            parse("p 5 3 4 2"),
            Err(Error::ParseError { line_nr: 1, .. })
        ));
    }

    #[test]
    fn clause_line() {
        let line = parse("1 -3 5 0\n").expect("valid clause");
        assert_eq!(TraceLine::Clause(lits(&[1, -3, 5])), line);
    }

    #[test]
    fn empty_clause_line() {
        let line = parse("0").expect("valid clause");
        assert_eq!(TraceLine::Clause(vec![]), line);
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        assert_eq!(TraceLine::Nothing, parse("c some comment 1 2 0\n").unwrap());
        assert_eq!(TraceLine::Nothing, parse("   \r\n").unwrap());
    }

    #[test]
    fn unterminated_clause_is_rejected() {
        assert!(matches!(parse("1 2"), Err(Error::ParseError { .. })));
    }

    #[test]
    fn literal_beyond_u64_range_is_rejected() {
        assert!(matches!(
            parse("18446744073709551616 0"),
            Err(Error::ParseError { .. })
        ));
    }

    #[test]
    fn literal_which_wraps_as_i64_is_rejected() {
        assert!(matches!(
            parse("18446744073709551615 0"),
            Err(Error::ParseError { .. })
        ));
    }

    #[test]
    fn negated_i64_minimum_is_rejected() {
        let error = parse("-9223372036854775808 0").expect_err("does not fit in 32 bits");

        let Error::ParseError { span, .. } = error else {
            panic!("expected a parse error");
        };
        assert_eq!((0, 20), span);
    }

    #[test]
    fn extreme_32_bit_literals_are_accepted() {
        assert_eq!(
            TraceLine::Clause(lits(&[i32::MAX, -i32::MAX])),
            parse("2147483647 -2147483647 0").expect("valid clause")
        );
    }

    #[test]
    fn header_with_too_many_variables_is_rejected() {
        assert!(matches!(
            parse("p 2147483648 1 1 1"),
            Err(Error::ParseError { .. })
        ));
        assert!(parse("p 2147483647 1 1 1").is_ok());
    }

    #[test]
    fn trailing_garbage_after_zero_is_rejected() {
        let error = parse("1 2 0 x").expect_err("garbage after zero");

        let Error::ParseError { span, .. } = error else {
            panic!("expected a parse error");
        };
        assert_eq!((6, 7), span);
    }
}
