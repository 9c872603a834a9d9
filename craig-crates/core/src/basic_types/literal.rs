use std::fmt::Display;
use std::fmt::Formatter;
use std::num::NonZero;
use std::ops::Not;

use crate::containers::StorageKey;
use crate::Variable;

/// A [`Variable`] together with a polarity.
///
/// Literals are stored as `2 * variable + is_positive`, which makes them usable as keys into
/// per-literal tables such as the watch lists.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    code: u32,
}

impl Literal {
    pub fn new(variable: Variable, is_positive: bool) -> Literal {
        Literal {
            code: variable.index() as u32 * 2 + u32::from(is_positive),
        }
    }

    /// Convert a literal in the DIMACS convention (1-based variable, sign is polarity).
    pub fn from_dimacs(code: NonZero<i32>) -> Literal {
        let variable = Variable::new(code.unsigned_abs().get() - 1);
        Literal::new(variable, code.get() > 0)
    }

    pub fn to_dimacs(self) -> NonZero<i32> {
        let code = i32::try_from(self.variable().dimacs_code())
            .expect("variable indices are at most Variable::MAX_INDEX");
        let signed = if self.is_positive() { code } else { -code };

        NonZero::new(signed).expect("dimacs codes are offset by one and never zero")
    }

    pub fn variable(self) -> Variable {
        Variable::new(self.code / 2)
    }

    pub fn is_positive(self) -> bool {
        (self.code & 1) == 1
    }

    pub fn is_negative(self) -> bool {
        !self.is_positive()
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Literal {
        Literal {
            code: self.code ^ 1,
        }
    }
}

impl StorageKey for Literal {
    fn index(&self) -> usize {
        self.code as usize
    }

    fn create_from_index(index: usize) -> Self {
        Literal { code: index as u32 }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimacs_conversion_keeps_variable_and_polarity() {
        let literal = Literal::from_dimacs(NonZero::new(-3).unwrap());

        assert_eq!(Variable::new(2), literal.variable());
        assert!(literal.is_negative());
        assert_eq!(-3, literal.to_dimacs().get());
    }

    #[test]
    fn largest_variable_has_the_largest_dimacs_code() {
        let variable = Variable::new(Variable::MAX_INDEX);

        assert_eq!(i32::MAX, variable.positive().to_dimacs().get());
        assert_eq!(-i32::MAX, variable.negative().to_dimacs().get());
        assert_eq!(
            variable.negative(),
            Literal::from_dimacs(variable.negative().to_dimacs())
        );
    }

    #[test]
    fn negation_flips_only_the_polarity() {
        let literal = Variable::new(5).positive();

        assert_eq!(Variable::new(5).negative(), !literal);
        assert_eq!(literal, !!literal);
        assert_eq!(literal.variable(), (!literal).variable());
    }

    #[test]
    fn literals_of_one_variable_are_adjacent_keys() {
        let variable = Variable::new(4);

        assert_eq!(8, variable.negative().index());
        assert_eq!(9, variable.positive().index());
    }
}
