use crate::containers::KeyedVec;
use crate::Literal;
use crate::Variable;

/// The clause obtained so far while resolving backwards along the trail.
///
/// Membership is tracked per variable, so each operation is linear in the number of literals it
/// receives rather than in the size of the resolvent.
#[derive(Debug, Default)]
pub(crate) struct Resolvent {
    members: KeyedVec<Variable, Option<Literal>>,
    literals: Vec<Literal>,
}

impl Resolvent {
    pub(crate) fn new(num_variables: u32) -> Resolvent {
        let mut resolvent = Resolvent::default();
        resolvent.members.resize(num_variables as usize, None);
        resolvent
    }

    pub(crate) fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub(crate) fn len(&self) -> usize {
        self.literals.len()
    }

    pub(crate) fn contains(&self, literal: Literal) -> bool {
        self.members[literal.variable()] == Some(literal)
    }

    /// Start over from the literals of a conflicting clause.
    pub(crate) fn reset(&mut self, literals: &[Literal]) {
        for literal in self.literals.drain(..) {
            self.members[literal.variable()] = None;
        }

        for &literal in literals {
            self.members[literal.variable()] = Some(literal);
            self.literals.push(literal);
        }
    }

    /// Resolve with a reason clause whose first literal is `pivot`.
    ///
    /// The resolvent has to contain `!pivot`, and none of the `others` may occur in the opposite
    /// polarity. On failure the reason is described, but the resolution is still carried out as
    /// far as possible.
    pub(crate) fn resolve(&mut self, pivot: Literal, others: &[Literal]) -> Result<(), String> {
        let mut outcome = Ok(());

        match self.members[pivot.variable()] {
            Some(literal) if literal == !pivot => self.remove(pivot.variable()),
            Some(_) => {
                outcome = Err(format!(
                    "the resolved variable {} is in the wrong polarity",
                    pivot.variable()
                ));
                self.remove(pivot.variable());
            }
            None => {
                outcome = Err(format!(
                    "the resolved variable {} is not in the resolvent",
                    pivot.variable()
                ));
            }
        }

        for &literal in others {
            match self.members[literal.variable()] {
                None => {
                    self.members[literal.variable()] = Some(literal);
                    self.literals.push(literal);
                }
                Some(present) if present == literal => {}
                Some(_) => {
                    if outcome.is_ok() {
                        outcome = Err(format!(
                            "resolving on {} and on {} at once",
                            pivot.variable(),
                            literal.variable()
                        ));
                    }
                }
            }
        }

        outcome
    }

    fn remove(&mut self, variable: Variable) {
        self.members[variable] = None;
        if let Some(position) = self
            .literals
            .iter()
            .position(|literal| literal.variable() == variable)
        {
            let _ = self.literals.swap_remove(position);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use super::*;

    fn lit(code: i32) -> Literal {
        Literal::from_dimacs(NonZero::new(code).unwrap())
    }

    fn sorted(resolvent: &Resolvent) -> Vec<i32> {
        let mut codes: Vec<_> = resolvent
            .literals()
            .iter()
            .map(|literal| literal.to_dimacs().get())
            .collect();
        codes.sort();
        codes
    }

    #[test]
    fn resolution_removes_the_pivot_and_merges_the_rest() {
        let mut resolvent = Resolvent::new(4);
        resolvent.reset(&[lit(-1), lit(2)]);

        assert_eq!(Ok(()), resolvent.resolve(lit(1), &[lit(3), lit(2)]));

        assert_eq!(vec![2, 3], sorted(&resolvent));
        assert!(resolvent.contains(lit(3)));
        assert!(!resolvent.contains(lit(-1)));
    }

    #[test]
    fn wrong_pivot_polarity_is_reported() {
        let mut resolvent = Resolvent::new(2);
        resolvent.reset(&[lit(1)]);

        assert!(resolvent.resolve(lit(1), &[]).is_err());
    }

    #[test]
    fn second_clashing_variable_is_reported() {
        let mut resolvent = Resolvent::new(3);
        resolvent.reset(&[lit(-1), lit(2)]);

        assert!(resolvent.resolve(lit(1), &[lit(-2)]).is_err());
    }

    #[test]
    fn reset_forgets_earlier_literals() {
        let mut resolvent = Resolvent::new(3);
        resolvent.reset(&[lit(1), lit(2)]);
        resolvent.reset(&[lit(-3)]);

        assert_eq!(vec![-3], sorted(&resolvent));
        assert!(!resolvent.contains(lit(1)));
        assert_eq!(1, resolvent.len());
    }
}
