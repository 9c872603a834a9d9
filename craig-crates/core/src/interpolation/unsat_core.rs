use super::ClauseValues;
use super::InterpolantBackend;
use super::ResolutionStep;
use crate::classification::VariableClassification;
use crate::containers::HashSet;
use crate::Clause;
use crate::ClauseId;
use crate::ClauseStore;
use crate::Side;

/// The root clauses which take part in a refutation, in ascending order of their ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnsatCore {
    clauses: Vec<ClauseId>,
}

impl UnsatCore {
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn contains(&self, clause: ClauseId) -> bool {
        self.clauses.binary_search(&clause).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = ClauseId> + '_ {
        self.clauses.iter().copied()
    }
}

/// Records, for every traced clause, the clauses it was derived from. The refutation is then
/// followed back to the roots.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnsatCoreBackend;

impl InterpolantBackend for UnsatCoreBackend {
    /// The antecedents of the clause; empty for roots.
    type Value = Vec<ClauseId>;
    type Output = UnsatCore;

    fn init_root(
        &mut self,
        _: ClauseId,
        _: &Clause,
        _: Side,
        _: &VariableClassification,
    ) -> Vec<ClauseId> {
        vec![]
    }

    fn start_chain(&mut self, conflict: ClauseId, _: &Vec<ClauseId>) -> Vec<ClauseId> {
        vec![conflict]
    }

    fn combine(&mut self, accumulated: &mut Vec<ClauseId>, step: ResolutionStep<'_, Vec<ClauseId>>) {
        accumulated.push(step.reason);
    }

    fn finalize(
        self,
        refutation: Vec<ClauseId>,
        values: &ClauseValues<Vec<ClauseId>>,
        store: &ClauseStore,
    ) -> UnsatCore {
        let mut visited: HashSet<_> = HashSet::default();
        let mut core = vec![];
        let mut stack = refutation;

        while let Some(clause) = stack.pop() {
            if !visited.insert(clause) {
                continue;
            }

            if store.is_root(clause) {
                core.push(clause);
            } else if let Some(antecedents) = values.get(clause).and_then(Option::as_ref) {
                stack.extend(antecedents.iter().copied());
            }
        }

        core.sort_unstable();
        UnsatCore { clauses: core }
    }
}
