use crate::aig::Aig;
use crate::interpolation::TruthTable;
use crate::interpolation::UnsatCore;

/// The output of the backend selected by [`BackendKind`](super::BackendKind).
#[derive(Clone, Debug)]
pub enum ProofProduct {
    TruthTable(TruthTable),
    Circuit(Aig),
    UnsatCore(UnsatCore),
}
