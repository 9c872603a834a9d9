//! The append-only database of root and derived clauses.
mod clause;
mod error;

pub use clause::*;
pub use error::ClauseStoreError;

use crate::containers::HashSet;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::craig_assert_simple;
use crate::ClauseId;
use crate::Literal;

/// Owns all clauses of a trace in insertion order.
///
/// The store maintains two prefixes: the first [`ClauseStore::num_roots`] clauses are roots, and
/// the first [`ClauseStore::num_clauses_a`] of those belong to [`Side::A`]. Every other root
/// belongs to [`Side::B`] and every clause after the roots is derived.
///
/// Clauses are never removed. At most one clause may be added empty; a derived clause can later
/// be strengthened to the empty clause, which then takes over as [`ClauseStore::empty_clause`].
///
/// # Example
/// ```
/// # use craig_core::ClauseStore;
/// # use craig_core::Variable;
/// let x = Variable::new(0);
/// let y = Variable::new(1);
///
/// let mut store = ClauseStore::default();
/// let _ = store.add_clause([x.positive(), y.positive()]).unwrap();
/// let _ = store.add_clause([x.negative()]).unwrap();
/// let _ = store.add_clause([y.negative()]).unwrap();
/// let _ = store.add_clause([]).unwrap();
///
/// store.mark_roots_up_to(3).unwrap();
/// store.mark_side_a_up_to(1).unwrap();
///
/// assert_eq!(1, store.num_learned());
/// assert_eq!(2, store.num_variables());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ClauseStore {
    clauses: KeyedVec<ClauseId, Clause>,
    num_roots: usize,
    num_clauses_a: usize,
    num_variables: u32,
    empty_clause: Option<ClauseId>,
}

impl ClauseStore {
    /// Add a clause to the store, without changing the root and side prefixes.
    ///
    /// Unless [`ClauseStore::mark_roots_up_to`] later includes it, the clause is derived.
    pub fn add_clause(
        &mut self,
        literals: impl IntoIterator<Item = Literal>,
    ) -> Result<ClauseId, ClauseStoreError> {
        self.add_clause_with_origin(literals, ClauseOrigin::Derived)
    }

    /// Add a clause with the given origin.
    ///
    /// The prefix invariants are enforced immediately: a root can only be added while no
    /// derived clause is present, and an A-root only while no B-root is present. On failure
    /// nothing is inserted.
    pub fn add_clause_with_origin(
        &mut self,
        literals: impl IntoIterator<Item = Literal>,
        origin: ClauseOrigin,
    ) -> Result<ClauseId, ClauseStoreError> {
        let literals: Vec<Literal> = literals.into_iter().collect();
        let next_id = ClauseId::create_from_index(self.clauses.len());

        let mut variables: HashSet<_> = HashSet::default();
        for literal in literals.iter() {
            if !variables.insert(literal.variable()) {
                return Err(ClauseStoreError::DuplicateVariable {
                    variable: literal.variable(),
                });
            }
        }

        if literals.is_empty() {
            if let Some(existing) = self.empty_clause {
                return Err(ClauseStoreError::MultipleEmptyClauses { existing });
            }
        }

        match origin {
            ClauseOrigin::Root(_) if self.num_roots != self.clauses.len() => {
                return Err(ClauseStoreError::InconsistentPartition {
                    clause: next_id,
                    reason: "a root clause cannot follow a derived clause",
                });
            }
            ClauseOrigin::Root(Side::A) if self.num_clauses_a != self.num_roots => {
                return Err(ClauseStoreError::InconsistentPartition {
                    clause: next_id,
                    reason: "a clause of A cannot follow a clause of B",
                });
            }
            _ => {}
        }

        if let Some(max_variable) = literals.iter().map(|literal| literal.variable()).max() {
            self.num_variables = self.num_variables.max(max_variable.dimacs_code());
        }

        let id = self.clauses.push(Clause::new(literals));

        if self.clauses[id].is_empty() {
            self.empty_clause = Some(id);
        }

        match origin {
            ClauseOrigin::Root(Side::A) => {
                self.num_roots += 1;
                self.num_clauses_a += 1;
            }
            ClauseOrigin::Root(Side::B) => self.num_roots += 1,
            ClauseOrigin::Derived => {}
        }

        Ok(id)
    }

    /// Make the first `end` clauses the roots of the store.
    pub fn mark_roots_up_to(&mut self, end: usize) -> Result<(), ClauseStoreError> {
        if end > self.clauses.len() {
            return Err(ClauseStoreError::InconsistentPartition {
                clause: ClauseId::create_from_index(end),
                reason: "the root prefix extends past the last clause",
            });
        }

        if end < self.num_clauses_a {
            return Err(ClauseStoreError::InconsistentPartition {
                clause: ClauseId::create_from_index(end),
                reason: "the clauses of A would extend past the roots",
            });
        }

        self.num_roots = end;
        Ok(())
    }

    /// Make the first `end` clauses the clauses of [`Side::A`]. They all have to be roots.
    pub fn mark_side_a_up_to(&mut self, end: usize) -> Result<(), ClauseStoreError> {
        if end > self.num_roots {
            return Err(ClauseStoreError::InconsistentPartition {
                clause: ClauseId::create_from_index(end),
                reason: "the clauses of A would extend past the roots",
            });
        }

        self.num_clauses_a = end;
        Ok(())
    }

    /// Declare that the store uses at least `num_variables` variables, even if not all of them
    /// occur in a clause.
    pub fn declare_variables(&mut self, num_variables: u32) {
        self.num_variables = self.num_variables.max(num_variables);
    }

    /// Check that the root and side prefixes describe a partition of the clauses.
    pub fn validate_partition(&self) -> Result<(), ClauseStoreError> {
        if self.num_roots > self.clauses.len() {
            return Err(ClauseStoreError::InconsistentPartition {
                clause: ClauseId::create_from_index(self.num_roots),
                reason: "the root prefix extends past the last clause",
            });
        }

        if self.num_clauses_a > self.num_roots {
            return Err(ClauseStoreError::InconsistentPartition {
                clause: ClauseId::create_from_index(self.num_clauses_a),
                reason: "the clauses of A would extend past the roots",
            });
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn num_roots(&self) -> usize {
        self.num_roots
    }

    pub fn num_clauses_a(&self) -> usize {
        self.num_clauses_a
    }

    pub fn num_learned(&self) -> usize {
        self.clauses.len() - self.num_roots
    }

    pub fn num_variables(&self) -> u32 {
        self.num_variables
    }

    /// The empty clause, if one has been added.
    pub fn empty_clause(&self) -> Option<ClauseId> {
        self.empty_clause
    }

    pub fn origin(&self, id: ClauseId) -> ClauseOrigin {
        if id.position() < self.num_clauses_a {
            ClauseOrigin::Root(Side::A)
        } else if id.position() < self.num_roots {
            ClauseOrigin::Root(Side::B)
        } else {
            ClauseOrigin::Derived
        }
    }

    pub fn is_root(&self, id: ClauseId) -> bool {
        id.position() < self.num_roots
    }

    /// Iterate over all clauses in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ClauseId, &Clause)> + '_ {
        self.clauses.keyed_iter()
    }

    /// Iterate over the root clauses, the clauses of A first.
    pub fn roots(&self) -> impl Iterator<Item = (ClauseId, &Clause)> + '_ {
        self.iter().take(self.num_roots)
    }

    /// Iterate over the root clauses of one side.
    pub fn roots_of(&self, side: Side) -> impl Iterator<Item = (ClauseId, &Clause)> + '_ {
        let range = match side {
            Side::A => 0..self.num_clauses_a,
            Side::B => self.num_clauses_a..self.num_roots,
        };

        self.iter().skip(range.start).take(range.len())
    }

    /// The ids of the derived clauses, in replay order.
    pub fn learned_ids(&self) -> impl Iterator<Item = ClauseId> {
        (self.num_roots..self.clauses.len()).map(ClauseId::create_from_index)
    }

    pub(crate) fn clause_mut(&mut self, id: ClauseId) -> &mut Clause {
        &mut self.clauses[id]
    }

    /// Keep only the literals of the derived clause `id` for which `keep` holds.
    ///
    /// A clause strengthened to no literals becomes the empty clause of the store. It precedes
    /// the empty clause of the trace, which is then no longer reached by a replay.
    pub(crate) fn strengthen(&mut self, id: ClauseId, keep: impl FnMut(&Literal) -> bool) {
        craig_assert_simple!(!self.is_root(id), "roots are never strengthened");

        self.clauses[id].retain(keep);

        if self.clauses[id].is_empty() {
            craig_assert_simple!(self.empty_clause.map_or(true, |existing| id <= existing));
            self.empty_clause = Some(id);
        }
    }
}

impl std::ops::Index<ClauseId> for ClauseStore {
    type Output = Clause;

    fn index(&self, id: ClauseId) -> &Clause {
        &self.clauses[id]
    }
}
