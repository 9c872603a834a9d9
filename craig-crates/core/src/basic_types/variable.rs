use std::fmt::Display;
use std::fmt::Formatter;

use crate::containers::StorageKey;
use crate::craig_assert_simple;
use crate::Literal;

/// A propositional variable, identified by its 0-based index.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    index: u32,
}

impl Variable {
    /// The largest index whose DIMACS code still fits in an `i32`.
    pub const MAX_INDEX: u32 = i32::MAX as u32 - 1;

    pub fn new(index: u32) -> Variable {
        craig_assert_simple!(index <= Variable::MAX_INDEX);
        Variable { index }
    }

    pub fn positive(self) -> Literal {
        Literal::new(self, true)
    }

    pub fn negative(self) -> Literal {
        Literal::new(self, false)
    }

    /// The number under which this variable appears in DIMACS files.
    pub fn dimacs_code(self) -> u32 {
        self.index + 1
    }
}

impl StorageKey for Variable {
    fn index(&self) -> usize {
        self.index as usize
    }

    fn create_from_index(index: usize) -> Self {
        Variable::new(index as u32)
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.dimacs_code())
    }
}
