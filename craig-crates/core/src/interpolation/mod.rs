//! The values which are threaded through the resolution steps of a replayed trace.
//!
//! An [`InterpolantBackend`] decides what is accumulated per clause. The proof engine performs
//! exactly the same resolution steps, in the same order, regardless of the backend; only the
//! payload differs:
//! - [`TruthTableBackend`] computes the interpolant as a truth table over the global variables,
//! - [`CircuitBackend`] builds the interpolant as an and-inverter graph,
//! - [`UnsatCoreBackend`] records antecedents and extracts the root clauses the refutation uses.
mod circuit;
mod truth_table;
mod unsat_core;

pub use circuit::CircuitBackend;
pub use truth_table::TruthTable;
pub use truth_table::TruthTableBackend;
pub use truth_table::MAX_TRUTH_TABLE_VARIABLES;
pub use unsat_core::UnsatCore;
pub use unsat_core::UnsatCoreBackend;

use crate::classification::VariableClass;
use crate::classification::VariableClassification;
use crate::containers::KeyedVec;
use crate::Clause;
use crate::ClauseId;
use crate::ClauseStore;
use crate::Literal;
use crate::ProofError;
use crate::Side;
use crate::Variable;

/// The value of each clause, indexed by clause id. Clauses which were skipped during the replay
/// have no value.
pub type ClauseValues<Value> = KeyedVec<ClauseId, Option<Value>>;

/// One resolution step of the backward walk along the trail.
#[derive(Debug)]
pub struct ResolutionStep<'a, Value> {
    /// The variable which is resolved away.
    pub pivot: Variable,
    pub pivot_class: VariableClass,
    /// The literal of the pivot as it occurs in the reason clause.
    pub reason_literal: Literal,
    pub reason: ClauseId,
    pub reason_value: &'a Value,
}

/// The strategy which determines the value accumulated over the resolution steps.
///
/// For interpolation, the rules are those of the symmetric interpolation system: roots of B
/// start as true, roots of A as the disjunction of their global literals, and a resolution on a
/// variable local to A is a disjunction, on a variable local to B a conjunction, and on a global
/// variable a selection on the value of that variable.
pub trait InterpolantBackend {
    /// The value attached to every clause.
    type Value;
    /// The result derived from the value of the refutation.
    type Output;

    /// Called once with the classification of the variables, before any root is initialised.
    fn prepare(&mut self, classification: &VariableClassification) -> Result<(), ProofError> {
        let _ = classification;
        Ok(())
    }

    /// The value of a root clause of the given side.
    fn init_root(
        &mut self,
        id: ClauseId,
        clause: &Clause,
        side: Side,
        classification: &VariableClassification,
    ) -> Self::Value;

    /// The initial value of a resolution chain which starts at the conflicting clause `conflict`.
    fn start_chain(&mut self, conflict: ClauseId, conflict_value: &Self::Value) -> Self::Value;

    /// Fold the reason of a resolution step into the accumulated value.
    fn combine(&mut self, accumulated: &mut Self::Value, step: ResolutionStep<'_, Self::Value>);

    /// Turn the value of the refutation into the output.
    fn finalize(
        self,
        refutation: Self::Value,
        values: &ClauseValues<Self::Value>,
        store: &ClauseStore,
    ) -> Self::Output;
}
