use crate::Literal;

/// Which partition a root clause belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

/// Whether a clause was part of the input, and if so on which [`Side`], or whether it was derived
/// by the solver which produced the trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClauseOrigin {
    Root(Side),
    Derived,
}

impl ClauseOrigin {
    pub fn is_root(self) -> bool {
        matches!(self, ClauseOrigin::Root(_))
    }
}

/// A disjunction of literals over distinct variables.
///
/// While a trace is replayed, the first two literals of a clause with at least two literals are
/// its watched literals, and the literal a clause propagates is moved to the front.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub(super) fn new(literals: Vec<Literal>) -> Clause {
        Clause { literals }
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn contains(&self, literal: Literal) -> bool {
        self.literals.contains(&literal)
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.literals.swap(a, b);
    }

    /// Drop every literal for which `keep` returns false, preserving the order of the others.
    pub(crate) fn retain(&mut self, keep: impl FnMut(&Literal) -> bool) {
        self.literals.retain(keep);
    }
}

impl std::ops::Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Literal {
        &self.literals[index]
    }
}
