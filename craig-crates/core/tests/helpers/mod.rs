//! Shared functionality for the integration tests of the proof engine.
#![allow(
    dead_code,
    reason = "is used in integration tests but unable to find a way to silence these warnings"
)]

use std::cell::RefCell;
use std::io::Write;
use std::num::NonZero;
use std::rc::Rc;

use craig_core::ClauseOrigin;
use craig_core::ClauseStore;
use craig_core::Literal;
use craig_core::Side;
use craig_core::Variable;
use rand::rngs::SmallRng;
use rand::Rng;

pub(crate) fn lit(code: i32) -> Literal {
    Literal::from_dimacs(NonZero::new(code).expect("literals are non-zero"))
}

pub(crate) fn clause(codes: &[i32]) -> Vec<Literal> {
    codes.iter().map(|&code| lit(code)).collect()
}

/// Build a store from DIMACS clauses: the roots of A, the roots of B and the learned clauses.
pub(crate) fn store_from(a: &[&[i32]], b: &[&[i32]], learned: &[&[i32]]) -> ClauseStore {
    let mut store = ClauseStore::default();

    for codes in a {
        let _ = store
            .add_clause_with_origin(clause(codes), ClauseOrigin::Root(Side::A))
            .expect("valid root of A");
    }
    for codes in b {
        let _ = store
            .add_clause_with_origin(clause(codes), ClauseOrigin::Root(Side::B))
            .expect("valid root of B");
    }
    for codes in learned {
        let _ = store.add_clause(clause(codes)).expect("valid learned clause");
    }

    store
}

/// Whether `clause` is satisfied when variable `i` takes the value of bit `i` of `assignment`.
pub(crate) fn is_satisfied(clause: &[Literal], assignment: u32) -> bool {
    clause.iter().any(|literal| {
        let bit = literal.variable().dimacs_code() - 1;
        ((assignment >> bit) & 1 == 1) == literal.is_positive()
    })
}

pub(crate) fn all_satisfied<'a>(
    clauses: impl IntoIterator<Item = &'a [Literal]>,
    assignment: u32,
) -> bool {
    clauses
        .into_iter()
        .all(|clause| is_satisfied(clause, assignment))
}

pub(crate) fn is_satisfiable(clauses: &[&[Literal]], num_variables: u32) -> bool {
    (0..1_u32 << num_variables).any(|assignment| all_satisfied(clauses.iter().copied(), assignment))
}

/// An unsatisfiable formula split into the parts A and B.
#[derive(Clone, Debug)]
pub(crate) struct Instance {
    pub(crate) a: Vec<Vec<Literal>>,
    pub(crate) b: Vec<Vec<Literal>>,
    pub(crate) num_variables: u32,
}

impl Instance {
    pub(crate) fn roots(&self) -> impl Iterator<Item = &[Literal]> + '_ {
        self.a.iter().chain(self.b.iter()).map(Vec::as_slice)
    }
}

/// Draw random formulas until one is unsatisfiable, and split it at a random point.
pub(crate) fn random_unsatisfiable_instance(rng: &mut SmallRng, num_variables: u32) -> Instance {
    loop {
        let num_clauses = rng.gen_range(12..28);
        let clauses: Vec<Vec<Literal>> = (0..num_clauses)
            .map(|_| random_clause(rng, num_variables))
            .collect();

        let slices: Vec<&[Literal]> = clauses.iter().map(Vec::as_slice).collect();
        if is_satisfiable(&slices, num_variables) {
            continue;
        }

        let split = rng.gen_range(1..clauses.len());
        let mut a = clauses;
        let b = a.split_off(split);

        return Instance {
            a,
            b,
            num_variables,
        };
    }
}

fn random_clause(rng: &mut SmallRng, num_variables: u32) -> Vec<Literal> {
    let width = rng.gen_range(1..=3);

    rand::seq::index::sample(rng, num_variables as usize, width)
        .into_iter()
        .map(|index| Literal::new(Variable::new(index as u32), rng.gen_bool(0.5)))
        .collect()
}

/// Turn an unsatisfiable instance into a clause trace, by refuting it along a decision tree.
///
/// Every node of the tree derives a clause made of negated decisions of its path, by resolving
/// the clauses of its two children on the decision of the node. Each derived clause follows from
/// the clauses before it by unit propagation, and the root of the tree derives the empty clause.
pub(crate) fn refutation_trace(instance: &Instance) -> ClauseStore {
    let mut builder = RefutationBuilder {
        roots: instance.roots().map(<[Literal]>::to_vec).collect(),
        num_variables: instance.num_variables,
        learned: vec![],
    };
    let derived = builder.refute(&mut vec![]);
    assert!(derived.is_empty(), "the root of the tree is refuted");

    let mut store = ClauseStore::default();
    for root in &instance.a {
        let _ = store
            .add_clause_with_origin(root.clone(), ClauseOrigin::Root(Side::A))
            .expect("valid root of A");
    }
    for root in &instance.b {
        let _ = store
            .add_clause_with_origin(root.clone(), ClauseOrigin::Root(Side::B))
            .expect("valid root of B");
    }
    for learned in builder.learned {
        let _ = store.add_clause(learned).expect("valid learned clause");
    }
    store.declare_variables(instance.num_variables);

    store
}

struct RefutationBuilder {
    roots: Vec<Vec<Literal>>,
    num_variables: u32,
    learned: Vec<Vec<Literal>>,
}

impl RefutationBuilder {
    /// Returns a clause which is falsified by `path`.
    fn refute(&mut self, path: &mut Vec<Literal>) -> Vec<Literal> {
        if let Some(falsified) = self
            .roots
            .iter()
            .find(|root| root.iter().all(|literal| path.contains(&!*literal)))
        {
            return falsified.clone();
        }

        let decision = (0..self.num_variables)
            .map(Variable::new)
            .find(|&variable| path.iter().all(|literal| literal.variable() != variable))
            .expect("a total assignment falsifies a root of an unsatisfiable formula");

        path.push(decision.positive());
        let positive = self.refute(path);
        let _ = path.pop();
        if !positive.contains(&decision.negative()) {
            return positive;
        }

        path.push(decision.negative());
        let negative = self.refute(path);
        let _ = path.pop();
        if !negative.contains(&decision.positive()) {
            return negative;
        }

        let mut resolvent: Vec<Literal> = positive
            .into_iter()
            .filter(|&literal| literal != decision.negative())
            .collect();
        for literal in negative {
            if literal != decision.positive() && !resolvent.contains(&literal) {
                resolvent.push(literal);
            }
        }

        self.learned.push(resolvent.clone());
        resolvent
    }
}

/// A sink which can be inspected after it has been handed to a proof log.
#[derive(Clone, Debug, Default)]
pub(crate) struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).expect("the log is ASCII")
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
