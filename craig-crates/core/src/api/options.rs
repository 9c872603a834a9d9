use std::time::Duration;

use crate::proof::ProofLog;
use crate::termination::ConflictBudget;
use crate::termination::TimeBudget;

/// Options for [`run_proof`](super::run_proof).
#[derive(Debug)]
pub struct ProofOptions {
    /// Check that every reconstructed resolution chain derives its clause.
    pub verify_proof: bool,
    pub proof_log: ProofLog,
    /// Give up once the budget is used up, in addition to the termination condition of the
    /// caller.
    pub resource_budget: Option<ResourceBudget>,
    pub backend: BackendKind,
}

impl Default for ProofOptions {
    fn default() -> Self {
        ProofOptions {
            verify_proof: true,
            proof_log: ProofLog::default(),
            resource_budget: None,
            backend: BackendKind::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceBudget {
    /// Wall-clock time, measured from the start of the proof.
    Time(Duration),
    /// The number of learned clauses whose assumptions end in a conflict.
    Conflicts(u64),
}

impl ResourceBudget {
    pub(crate) fn split(self) -> (Option<TimeBudget>, Option<ConflictBudget>) {
        match self {
            ResourceBudget::Time(duration) => (Some(TimeBudget::starting_now(duration)), None),
            ResourceBudget::Conflicts(budget) => (None, Some(ConflictBudget::new(budget))),
        }
    }
}

/// Which value is computed along the resolution chains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum BackendKind {
    /// The interpolant as a truth table over the global variables.
    #[default]
    TruthTable,
    /// The interpolant as an and-inverter graph.
    Circuit,
    /// The root clauses used by the refutation.
    UnsatCore,
}
