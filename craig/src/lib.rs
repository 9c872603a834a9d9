//! # Craig
//! Craig replays the clause trace of a SAT refutation and extracts information from the
//! resolution proof hidden in it: a Craig interpolant (as a truth table or as an and-inverter
//! graph) or an unsatisfiable core.
//!
//! The trace is a sequence of clauses. The leading clauses are the roots, split into the A-part
//! and the B-part of the formula; every following clause must follow from the clauses before it
//! by unit propagation, and one of them is the empty clause.
//!
//! ```rust
//! # use craig::core::termination::Indefinite;
//! # use craig::core::trace::load_trace;
//! # use craig::core::run_proof;
//! # use craig::core::BackendKind;
//! # use craig::core::ProofOptions;
//! # use craig::core::ProofProduct;
//! let trace = "p 2 4 3 1\n1 2 0\n-1 0\n-2 0\n0\n";
//! let store = load_trace(trace.as_bytes()).expect("the trace is well-formed");
//!
//! let options = ProofOptions {
//!     backend: BackendKind::UnsatCore,
//!     ..Default::default()
//! };
//! let refutation = run_proof(store, options, &mut Indefinite).expect("the trace is a refutation");
//!
//! let ProofProduct::UnsatCore(core) = refutation.output else {
//!     unreachable!()
//! };
//! assert_eq!(core.len(), 3);
//! ```
pub use craig_core as core;
