use std::mem;

use crate::containers::KeyedVec;
use crate::craig_assert_eq_simple;
use crate::craig_assert_simple;
use crate::ClauseId;
use crate::ClauseStore;
use crate::Literal;
use crate::Variable;

/// Unit propagation over a [`ClauseStore`] using two watched literals per clause.
///
/// The watched literals of a clause are its first two literals. The watch list of a literal `l`
/// holds the clauses watching `!l`, i.e. the clauses which have to be visited once `l` becomes
/// true. A clause which propagates has its implied literal moved to the front, so the reason of an
/// assigned literal always starts with that literal.
///
/// The propagator is used to replay a trace, never to search: there are no decision levels, only
/// trail positions to which it can be reset.
#[derive(Debug, Default)]
pub(crate) struct Propagator {
    /// The literal of each variable which is currently true.
    assignments: KeyedVec<Variable, Option<Literal>>,
    reasons: KeyedVec<Variable, Option<ClauseId>>,
    trail: Vec<Literal>,
    watch_lists: KeyedVec<Literal, Vec<ClauseId>>,
}

impl Propagator {
    pub(crate) fn new(num_variables: u32) -> Propagator {
        let mut propagator = Propagator::default();
        propagator
            .assignments
            .resize(num_variables as usize, None);
        propagator.reasons.resize(num_variables as usize, None);
        propagator
            .watch_lists
            .resize(2 * num_variables as usize, vec![]);
        propagator
    }

    pub(crate) fn trail(&self) -> &[Literal] {
        &self.trail
    }

    pub(crate) fn trail_len(&self) -> usize {
        self.trail.len()
    }

    pub(crate) fn reason(&self, variable: Variable) -> Option<ClauseId> {
        self.reasons[variable]
    }

    pub(crate) fn is_true(&self, literal: Literal) -> bool {
        self.assignments[literal.variable()] == Some(literal)
    }

    pub(crate) fn is_false(&self, literal: Literal) -> bool {
        self.assignments[literal.variable()] == Some(!literal)
    }

    /// Start watching the first two literals of the clause.
    pub(crate) fn watch_clause(&mut self, store: &ClauseStore, id: ClauseId) {
        let clause = &store[id];
        craig_assert_simple!(clause.len() >= 2, "only clauses with two literals are watched");

        self.watch_lists[!clause[0]].push(id);
        self.watch_lists[!clause[1]].push(id);
    }

    /// Make `literal` true with the given reason.
    ///
    /// Returns false, without touching the trail, if the literal is already false. Enqueueing a
    /// literal which is already true is a no-op.
    pub(crate) fn enqueue(&mut self, literal: Literal, reason: Option<ClauseId>) -> bool {
        let variable = literal.variable();

        if let Some(assigned) = self.assignments[variable] {
            return assigned == literal;
        }

        self.assignments[variable] = Some(literal);
        self.reasons[variable] = reason;
        self.trail.push(literal);

        true
    }

    /// Propagate every literal on the trail from position `start` onwards, in trail order.
    ///
    /// Returns the first clause which became conflicting, or `None` when a fixpoint is reached.
    pub(crate) fn propagate(&mut self, store: &mut ClauseStore, start: usize) -> Option<ClauseId> {
        let mut index = start;

        while index < self.trail.len() {
            let literal = self.trail[index];
            if let Some(conflict) = self.propagate_literal(store, literal) {
                return Some(conflict);
            }
            index += 1;
        }

        None
    }

    /// Visit the clauses watching `!literal`, which has just become false.
    fn propagate_literal(&mut self, store: &mut ClauseStore, literal: Literal) -> Option<ClauseId> {
        let false_literal = !literal;
        let mut watchers = mem::take(&mut self.watch_lists[literal]);

        let mut conflict = None;
        let mut kept = 0;
        let mut current = 0;

        while current < watchers.len() {
            let id = watchers[current];
            current += 1;

            let clause = store.clause_mut(id);
            if clause[0] == false_literal {
                clause.swap(0, 1);
            }
            craig_assert_eq_simple!(clause[1], false_literal);

            if self.is_true(clause[0]) {
                watchers[kept] = id;
                kept += 1;
                continue;
            }

            if let Some(position) = (2..clause.len()).find(|&position| !self.is_false(clause[position])) {
                clause.swap(1, position);
                // The new watch is not false, so it cannot be the negation of `literal`.
                self.watch_lists[!clause[1]].push(id);
                continue;
            }

            watchers[kept] = id;
            kept += 1;

            if !self.enqueue(clause[0], Some(id)) {
                conflict = Some(id);
                break;
            }
        }

        while current < watchers.len() {
            watchers[kept] = watchers[current];
            kept += 1;
            current += 1;
        }
        watchers.truncate(kept);

        let added_while_visiting = mem::replace(&mut self.watch_lists[literal], watchers);
        craig_assert_simple!(added_while_visiting.is_empty());

        conflict
    }

    /// Undo the assignments from trail position `trail_index` onwards.
    pub(crate) fn cancel_until(&mut self, trail_index: usize) {
        for literal in self.trail.drain(trail_index..) {
            let variable = literal.variable();
            self.assignments[variable] = None;
            self.reasons[variable] = None;
        }
    }

    /// The ids of the clauses in the watch list of `literal`, in visiting order.
    #[cfg(test)]
    pub(crate) fn watchers(&self, literal: Literal) -> &[ClauseId] {
        &self.watch_lists[literal]
    }

    #[cfg(test)]
    fn assigned_literals(&self) -> Vec<Literal> {
        self.assignments.iter().filter_map(|&literal| literal).collect()
    }

    /// Whether each of the `clauses` has a literal which is true or unassigned.
    #[cfg(test)]
    pub(crate) fn no_clause_is_falsified<'a>(
        &self,
        clauses: impl IntoIterator<Item = &'a crate::Clause>,
    ) -> bool {
        clauses.into_iter().all(|clause| {
            clause
                .literals()
                .iter()
                .any(|&literal| !self.is_false(literal))
        })
    }
}
