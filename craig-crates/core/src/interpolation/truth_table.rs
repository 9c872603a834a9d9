use std::fmt::Display;
use std::fmt::Formatter;

use super::ClauseValues;
use super::InterpolantBackend;
use super::ResolutionStep;
use crate::classification::VariableClass;
use crate::classification::VariableClassification;
use crate::craig_assert_eq_simple;
use crate::craig_assert_simple;
use crate::Clause;
use crate::ClauseId;
use crate::ClauseStore;
use crate::ProofError;
use crate::Side;

/// The largest number of global variables supported by [`TruthTableBackend`].
pub const MAX_TRUTH_TABLE_VARIABLES: usize = 16;

/// The patterns of the first six variables within a single word.
const VARIABLE_MASKS: [u64; 6] = [
    0xAAAA_AAAA_AAAA_AAAA,
    0xCCCC_CCCC_CCCC_CCCC,
    0xF0F0_F0F0_F0F0_F0F0,
    0xFF00_FF00_FF00_FF00,
    0xFFFF_0000_FFFF_0000,
    0xFFFF_FFFF_0000_0000,
];

/// A boolean function over `num_variables` inputs, given by its `2^num_variables` values.
///
/// Bit `i` holds the value of the function at the assignment whose binary encoding is `i`, where
/// variable 0 is the least significant bit. Tables over fewer than six variables occupy a single
/// word in which the pattern is repeated.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TruthTable {
    num_variables: u32,
    words: Vec<u64>,
}

impl TruthTable {
    pub fn constant(num_variables: u32, value: bool) -> TruthTable {
        let word = if value { u64::MAX } else { 0 };

        TruthTable {
            num_variables,
            words: vec![word; Self::words_for(num_variables)],
        }
    }

    /// The projection on variable `index`.
    pub fn variable(num_variables: u32, index: u32) -> TruthTable {
        craig_assert_simple!(index < num_variables);

        let words = (0..Self::words_for(num_variables))
            .map(|word_index| {
                if index < 6 {
                    VARIABLE_MASKS[index as usize]
                } else if (word_index >> (index - 6)) & 1 == 1 {
                    u64::MAX
                } else {
                    0
                }
            })
            .collect();

        TruthTable {
            num_variables,
            words,
        }
    }

    fn words_for(num_variables: u32) -> usize {
        if num_variables <= 6 {
            1
        } else {
            1 << (num_variables - 6)
        }
    }

    pub fn num_variables(&self) -> u32 {
        self.num_variables
    }

    /// The number of assignments, i.e. the number of meaningful bits.
    pub fn num_bits(&self) -> usize {
        1 << self.num_variables
    }

    /// The value at the assignment whose binary encoding is `assignment`.
    pub fn evaluate(&self, assignment: usize) -> bool {
        craig_assert_simple!(assignment < self.num_bits());
        (self.words[assignment / 64] >> (assignment % 64)) & 1 == 1
    }

    pub fn is_constant(&self, value: bool) -> bool {
        (0..self.num_bits()).all(|assignment| self.evaluate(assignment) == value)
    }

    pub fn and_assign(&mut self, other: &TruthTable) {
        craig_assert_eq_simple!(self.num_variables, other.num_variables);
        for (word, other) in self.words.iter_mut().zip(other.words.iter()) {
            *word &= other;
        }
    }

    pub fn or_assign(&mut self, other: &TruthTable) {
        craig_assert_eq_simple!(self.num_variables, other.num_variables);
        for (word, other) in self.words.iter_mut().zip(other.words.iter()) {
            *word |= other;
        }
    }

    pub fn negate(&mut self) {
        for word in self.words.iter_mut() {
            *word = !*word;
        }
    }

    /// Replace this table by `select ? then : self`, where `select` is a projection.
    pub fn select_assign(&mut self, select: &TruthTable, then: &TruthTable) {
        for ((word, select), then) in self
            .words
            .iter_mut()
            .zip(select.words.iter())
            .zip(then.words.iter())
        {
            *word = (select & then) | (!select & *word);
        }
    }
}

impl Display for TruthTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for assignment in 0..self.num_bits() {
            write!(f, "{}", u8::from(self.evaluate(assignment)))?;
        }

        Ok(())
    }
}

/// Computes the interpolant as a [`TruthTable`] over the global variables.
#[derive(Clone, Debug, Default)]
pub struct TruthTableBackend {
    num_variables: u32,
    projections: Vec<TruthTable>,
}

impl InterpolantBackend for TruthTableBackend {
    type Value = TruthTable;
    type Output = TruthTable;

    fn prepare(&mut self, classification: &VariableClassification) -> Result<(), ProofError> {
        let count = classification.num_global_variables();
        if count > MAX_TRUTH_TABLE_VARIABLES {
            return Err(ProofError::TooManyGlobalVariables {
                count,
                limit: MAX_TRUTH_TABLE_VARIABLES,
            });
        }

        self.num_variables = count as u32;
        self.projections = (0..self.num_variables)
            .map(|index| TruthTable::variable(self.num_variables, index))
            .collect();

        Ok(())
    }

    fn init_root(
        &mut self,
        _: ClauseId,
        clause: &Clause,
        side: Side,
        classification: &VariableClassification,
    ) -> TruthTable {
        if side == Side::B {
            return TruthTable::constant(self.num_variables, true);
        }

        let mut value = TruthTable::constant(self.num_variables, false);
        for &literal in clause.literals() {
            if let Some(index) = classification.global_index(literal.variable()) {
                let mut projection = self.projections[index as usize].clone();
                if literal.is_negative() {
                    projection.negate();
                }
                value.or_assign(&projection);
            }
        }

        value
    }

    fn start_chain(&mut self, _: ClauseId, conflict_value: &TruthTable) -> TruthTable {
        conflict_value.clone()
    }

    fn combine(&mut self, accumulated: &mut TruthTable, step: ResolutionStep<'_, TruthTable>) {
        match step.pivot_class {
            VariableClass::AOnly => accumulated.or_assign(step.reason_value),
            VariableClass::BOnly | VariableClass::Unused => {
                accumulated.and_assign(step.reason_value)
            }
            VariableClass::Global(index) => {
                let projection = &self.projections[index as usize];

                if step.reason_literal.is_negative() {
                    // The reason contains the negative literal, it decides when the variable is true.
                    accumulated.select_assign(projection, step.reason_value);
                } else {
                    let mut inverse = projection.clone();
                    inverse.negate();
                    accumulated.select_assign(&inverse, step.reason_value);
                }
            }
        }
    }

    fn finalize(
        self,
        refutation: TruthTable,
        _: &ClauseValues<TruthTable>,
        _: &ClauseStore,
    ) -> TruthTable {
        refutation
    }
}
