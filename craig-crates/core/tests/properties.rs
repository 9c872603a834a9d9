#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

mod helpers;

use craig_core::classification::classify;
use craig_core::interpolation::CircuitBackend;
use craig_core::interpolation::TruthTableBackend;
use craig_core::interpolation::UnsatCoreBackend;
use craig_core::proof::ProofLog;
use craig_core::termination::Indefinite;
use craig_core::trace::dump_trace;
use craig_core::trace::load_trace;
use craig_core::ClauseStore;
use craig_core::ProofManager;
use craig_core::Side;
use helpers::all_satisfied;
use helpers::is_satisfiable;
use helpers::random_unsatisfiable_instance;
use helpers::refutation_trace;
use helpers::Instance;
use rand::rngs::SmallRng;
use rand::SeedableRng;

const NUM_INSTANCES: u64 = 40;

fn instances() -> impl Iterator<Item = Instance> {
    (0..NUM_INSTANCES).map(|seed| {
        let mut rng = SmallRng::seed_from_u64(seed);
        let num_variables = if seed % 2 == 0 { 5 } else { 6 };
        random_unsatisfiable_instance(&mut rng, num_variables)
    })
}

/// The index of the truth table entry for the values the global variables take in `assignment`.
fn global_assignment(store: &ClauseStore, assignment: u32) -> usize {
    let classification = classify(store).expect("valid store");

    classification
        .global_variables()
        .iter()
        .enumerate()
        .map(|(index, variable)| {
            let bit = (assignment >> (variable.dimacs_code() - 1)) & 1;
            (bit as usize) << index
        })
        .sum()
}

#[test]
fn truth_table_interpolants_separate_a_from_b() {
    for instance in instances() {
        let store = refutation_trace(&instance);
        let table = ProofManager::new(
            store.clone(),
            TruthTableBackend::default(),
            true,
            ProofLog::default(),
        )
        .expect("valid store")
        .prove(&mut Indefinite)
        .expect("valid refutation")
        .output;

        let a: Vec<&[_]> = store.roots_of(Side::A).map(|(_, root)| root.literals()).collect();
        let b: Vec<&[_]> = store.roots_of(Side::B).map(|(_, root)| root.literals()).collect();

        for assignment in 0..1_u32 << instance.num_variables {
            let value = table.evaluate(global_assignment(&store, assignment));

            if all_satisfied(a.iter().copied(), assignment) {
                assert!(value, "A implies the interpolant: {instance:?}");
            }
            if all_satisfied(b.iter().copied(), assignment) {
                assert!(!value, "the interpolant contradicts B: {instance:?}");
            }
        }
    }
}

#[test]
fn circuit_and_truth_table_interpolants_agree() {
    for instance in instances() {
        let store = refutation_trace(&instance);
        let num_globals = classify(&store)
            .expect("valid store")
            .num_global_variables();

        let table = ProofManager::new(
            store.clone(),
            TruthTableBackend::default(),
            true,
            ProofLog::default(),
        )
        .expect("valid store")
        .prove(&mut Indefinite)
        .expect("valid refutation")
        .output;
        let aig = ProofManager::new(store, CircuitBackend::default(), true, ProofLog::default())
            .expect("valid store")
            .prove(&mut Indefinite)
            .expect("valid refutation")
            .output;
        let output = aig.output().expect("the interpolant is the output");

        assert_eq!(num_globals, aig.num_inputs());
        for assignment in 0..1_usize << num_globals {
            let inputs: Vec<bool> = (0..num_globals)
                .map(|index| (assignment >> index) & 1 == 1)
                .collect();
            assert_eq!(table.evaluate(assignment), aig.evaluate(output, &inputs));
        }
    }
}

#[test]
fn unsat_cores_are_unsatisfiable() {
    for instance in instances() {
        let store = refutation_trace(&instance);
        let core = ProofManager::new(
            store.clone(),
            UnsatCoreBackend,
            true,
            ProofLog::default(),
        )
        .expect("valid store")
        .prove(&mut Indefinite)
        .expect("valid refutation")
        .output;

        assert!(core.iter().all(|id| store.is_root(id)));
        let clauses: Vec<&[_]> = core.iter().map(|id| store[id].literals()).collect();
        assert!(!is_satisfiable(&clauses, instance.num_variables));
    }
}

#[test]
fn replaying_twice_gives_identical_results() {
    for instance in instances() {
        let store = refutation_trace(&instance);

        let prove_table = |store: ClauseStore| {
            ProofManager::new(store, TruthTableBackend::default(), true, ProofLog::default())
                .expect("valid store")
                .prove(&mut Indefinite)
                .expect("valid refutation")
                .output
        };
        let prove_circuit = |store: ClauseStore| {
            ProofManager::new(store, CircuitBackend::default(), true, ProofLog::default())
                .expect("valid store")
                .prove(&mut Indefinite)
                .expect("valid refutation")
                .output
                .to_aag_string()
        };
        let prove_core = |store: ClauseStore| {
            ProofManager::new(store, UnsatCoreBackend, true, ProofLog::default())
                .expect("valid store")
                .prove(&mut Indefinite)
                .expect("valid refutation")
                .output
        };

        assert_eq!(prove_table(store.clone()), prove_table(store.clone()));
        assert_eq!(prove_circuit(store.clone()), prove_circuit(store.clone()));
        assert_eq!(prove_core(store.clone()), prove_core(store));
    }
}

#[test]
fn dumped_traces_load_back_identically() {
    for instance in instances() {
        let store = refutation_trace(&instance);

        let mut dumped = Vec::new();
        dump_trace(&store, &mut dumped).expect("writing to a vector");
        let loaded = load_trace(dumped.as_slice()).expect("dumped traces are valid");
        let mut dumped_again = Vec::new();
        dump_trace(&loaded, &mut dumped_again).expect("writing to a vector");

        assert_eq!(
            String::from_utf8(dumped).unwrap(),
            String::from_utf8(dumped_again).unwrap()
        );
        assert_eq!(store.num_roots(), loaded.num_roots());
        assert_eq!(store.num_clauses_a(), loaded.num_clauses_a());
    }
}
