use super::ClauseValues;
use super::InterpolantBackend;
use super::ResolutionStep;
use crate::aig::Aig;
use crate::aig::AigLiteral;
use crate::classification::VariableClass;
use crate::classification::VariableClassification;
use crate::Clause;
use crate::ClauseId;
use crate::ClauseStore;
use crate::ProofError;
use crate::Side;

/// Builds the interpolant as an and-inverter graph in which input `i` is the `i`-th global
/// variable.
///
/// The output is the cone of the refutation, compacted into a fresh [`Aig`].
#[derive(Debug, Default)]
pub struct CircuitBackend {
    aig: Aig,
}

impl InterpolantBackend for CircuitBackend {
    type Value = AigLiteral;
    type Output = Aig;

    fn prepare(&mut self, classification: &VariableClassification) -> Result<(), ProofError> {
        self.aig = Aig::with_inputs(classification.num_global_variables() as u32);
        Ok(())
    }

    fn init_root(
        &mut self,
        _: ClauseId,
        clause: &Clause,
        side: Side,
        classification: &VariableClassification,
    ) -> AigLiteral {
        if side == Side::B {
            return AigLiteral::TRUE;
        }

        clause
            .literals()
            .iter()
            .filter_map(|&literal| {
                classification
                    .global_index(literal.variable())
                    .map(|index| (index, literal.is_positive()))
            })
            .fold(AigLiteral::FALSE, |value, (index, is_positive)| {
                let input = self.aig.input(index);
                let input = if is_positive { input } else { !input };
                self.aig.or(value, input)
            })
    }

    fn start_chain(&mut self, _: ClauseId, conflict_value: &AigLiteral) -> AigLiteral {
        *conflict_value
    }

    fn combine(&mut self, accumulated: &mut AigLiteral, step: ResolutionStep<'_, AigLiteral>) {
        let reason = *step.reason_value;

        *accumulated = match step.pivot_class {
            VariableClass::AOnly => self.aig.or(*accumulated, reason),
            VariableClass::BOnly | VariableClass::Unused => self.aig.and(*accumulated, reason),
            VariableClass::Global(index) => {
                let select = self.aig.input(index);

                if step.reason_literal.is_negative() {
                    self.aig.mux(select, reason, *accumulated)
                } else {
                    self.aig.mux(select, *accumulated, reason)
                }
            }
        };
    }

    fn finalize(self, refutation: AigLiteral, _: &ClauseValues<AigLiteral>, _: &ClauseStore) -> Aig {
        self.aig.cleanup(refutation)
    }
}
