//! The entry point for proving a [`ClauseStore`] with the options chosen at runtime.
mod options;
mod outputs;

pub use options::BackendKind;
pub use options::ProofOptions;
pub use options::ResourceBudget;
pub use outputs::ProofProduct;

use crate::interpolation::CircuitBackend;
use crate::interpolation::TruthTableBackend;
use crate::interpolation::UnsatCoreBackend;
use crate::termination::Combinator;
use crate::termination::TerminationCondition;
use crate::ClauseStore;
use crate::ProofError;
use crate::ProofManager;
use crate::Refutation;

/// Replay `store` with the backend and budget of `options`.
///
/// The proof stops early when either the budget of `options` or `termination` says so.
pub fn run_proof(
    store: ClauseStore,
    options: ProofOptions,
    termination: &mut impl TerminationCondition,
) -> Result<Refutation<ProofProduct>, ProofError> {
    let ProofOptions {
        verify_proof,
        proof_log,
        resource_budget,
        backend,
    } = options;

    let (time_budget, conflict_budget) = resource_budget
        .map(|budget| budget.split())
        .unwrap_or_default();
    let mut termination = Combinator::new(Combinator::new(time_budget, conflict_budget), termination);

    match backend {
        BackendKind::TruthTable => {
            ProofManager::new(store, TruthTableBackend::default(), verify_proof, proof_log)?
                .prove(&mut termination)
                .map(|refutation| refutation.map(ProofProduct::TruthTable))
        }
        BackendKind::Circuit => {
            ProofManager::new(store, CircuitBackend::default(), verify_proof, proof_log)?
                .prove(&mut termination)
                .map(|refutation| refutation.map(ProofProduct::Circuit))
        }
        BackendKind::UnsatCore => {
            ProofManager::new(store, UnsatCoreBackend, verify_proof, proof_log)?
                .prove(&mut termination)
                .map(|refutation| refutation.map(ProofProduct::UnsatCore))
        }
    }
}
