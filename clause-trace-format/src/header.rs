use std::fmt::Display;
use std::fmt::Formatter;

/// The header line of a clause trace.
///
/// In the file it has the shape `p <num_variables> <num_clauses> <num_roots> <num_clauses_a>`. The
/// first `num_clauses_a` clauses belong to partition A, the following clauses up to `num_roots`
/// belong to partition B, and the remaining clauses were derived by the solver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TraceHeader {
    pub num_variables: u32,
    pub num_clauses: usize,
    pub num_roots: usize,
    pub num_clauses_a: usize,
}

impl TraceHeader {
    /// The number of derived (learned) clauses described by this header.
    pub fn num_learned(&self) -> usize {
        self.num_clauses.saturating_sub(self.num_roots)
    }
}

impl Display for TraceHeader {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "p {} {} {} {}",
            self.num_variables, self.num_clauses, self.num_roots, self.num_clauses_a
        )
    }
}
