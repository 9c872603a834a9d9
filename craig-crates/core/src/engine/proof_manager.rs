use std::fmt::Debug;
use std::fmt::Formatter;
use std::time::Instant;

use clause_trace_format::StepId;
use log::debug;
use log::info;
use log::trace;

use super::propagator::Propagator;
use super::resolvent::Resolvent;
use super::ProofCounters;
use super::ProofError;
use super::ProofStatistics;
use crate::classification::classify;
use crate::classification::VariableClassification;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::craig_assert_eq_simple;
use crate::craig_assert_ne_moderate;
use crate::craig_assert_simple;
use crate::interpolation::ClauseValues;
use crate::interpolation::InterpolantBackend;
use crate::interpolation::ResolutionStep;
use crate::proof::ProofLog;
use crate::termination::TerminationCondition;
use crate::ClauseId;
use crate::ClauseOrigin;
use crate::ClauseStore;
use crate::Literal;
use crate::Variable;

/// The result of a successful proof: the output of the backend for the refutation, together with
/// the statistics of the replay.
#[derive(Clone, Debug)]
pub struct Refutation<Output> {
    pub output: Output,
    pub statistics: ProofStatistics,
}

impl<Output> Refutation<Output> {
    pub fn map<Other>(self, f: impl FnOnce(Output) -> Other) -> Refutation<Other> {
        Refutation {
            output: f(self.output),
            statistics: self.statistics,
        }
    }
}

/// The clause which a resolution chain derives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ChainTarget {
    Clause(ClauseId),
    /// The empty clause, whether or not the trace contains it.
    Refutation,
}

/// Replays the clauses of a [`ClauseStore`] and reconstructs the resolution chain of every
/// learned clause, threading the values of an [`InterpolantBackend`] through each chain.
///
/// Every learned clause is proven in id order: its literals are assumed false, propagation has to
/// end in a conflict, and walking the trail backwards from that conflict yields the resolution
/// steps. Learned units are added to the root level, and the replay ends as soon as the root
/// level is conflicting.
///
/// # Example
/// ```
/// # use craig_core::ClauseStore;
/// # use craig_core::ProofManager;
/// # use craig_core::Variable;
/// # use craig_core::interpolation::TruthTableBackend;
/// # use craig_core::proof::ProofLog;
/// # use craig_core::termination::Indefinite;
/// let x = Variable::new(0);
/// let y = Variable::new(1);
///
/// let mut store = ClauseStore::default();
/// let _ = store.add_clause([x.positive(), y.positive()]).unwrap();
/// let _ = store.add_clause([x.negative()]).unwrap();
/// let _ = store.add_clause([y.negative()]).unwrap();
/// let _ = store.add_clause([]).unwrap();
/// store.mark_roots_up_to(3).unwrap();
/// store.mark_side_a_up_to(1).unwrap();
///
/// let manager =
///     ProofManager::new(store, TruthTableBackend::default(), true, ProofLog::default()).unwrap();
/// let refutation = manager.prove(&mut Indefinite).unwrap();
///
/// // The interpolant is `x | y`.
/// assert_eq!("0111", refutation.output.to_string());
/// ```
pub struct ProofManager<Backend: InterpolantBackend> {
    store: ClauseStore,
    classification: VariableClassification,
    propagator: Propagator,
    backend: Backend,
    values: ClauseValues<Backend::Value>,
    proof_numbers: KeyedVec<ClauseId, Option<StepId>>,
    step_counter: u64,
    /// The length of the trail which holds at the root level.
    root_level: usize,
    seen: KeyedVec<Variable, bool>,
    resolvent: Resolvent,
    marked_literals: KeyedVec<Literal, bool>,
    verify_proof: bool,
    proof_log: ProofLog,
    counters: ProofCounters,
    statistics: ProofStatistics,
}

impl<Backend: InterpolantBackend + Debug> Debug for ProofManager<Backend> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProofManager")
            .field("store", &self.store)
            .field("backend", &self.backend)
            .field("step_counter", &self.step_counter)
            .field("root_level", &self.root_level)
            .field("verify_proof", &self.verify_proof)
            .field("proof_log", &self.proof_log)
            .finish_non_exhaustive()
    }
}

impl<Backend: InterpolantBackend> ProofManager<Backend> {
    /// Prepare the replay of `store`.
    ///
    /// With `verify_proof`, every reconstructed resolution chain is checked to derive its clause.
    pub fn new(
        store: ClauseStore,
        mut backend: Backend,
        verify_proof: bool,
        proof_log: ProofLog,
    ) -> Result<ProofManager<Backend>, ProofError> {
        let classification = classify(&store)?;
        backend.prepare(&classification)?;

        let num_variables = store.num_variables();

        let mut values = KeyedVec::default();
        values.resize_with(store.len(), || None);
        let mut proof_numbers = KeyedVec::default();
        proof_numbers.resize(store.len(), None);
        let mut seen = KeyedVec::default();
        seen.resize(num_variables as usize, false);
        let mut marked_literals = KeyedVec::default();
        marked_literals.resize(2 * num_variables as usize, false);

        let counters = ProofCounters {
            num_variables,
            num_global_variables: classification.num_global_variables(),
            num_roots: store.num_roots(),
            num_learned: store.num_learned(),
            ..Default::default()
        };

        Ok(ProofManager {
            propagator: Propagator::new(num_variables),
            resolvent: Resolvent::new(num_variables),
            store,
            classification,
            backend,
            values,
            proof_numbers,
            step_counter: 0,
            root_level: 0,
            seen,
            marked_literals,
            verify_proof,
            proof_log,
            counters,
            statistics: ProofStatistics::default(),
        })
    }

    pub fn classification(&self) -> &VariableClassification {
        &self.classification
    }

    /// Replay the trace until the empty clause is derived.
    ///
    /// Before every learned clause, `termination` is asked whether to give up, in which case
    /// [`ProofError::ResourceExhausted`] is returned. It is notified of every conflict.
    pub fn prove(
        mut self,
        termination: &mut impl TerminationCondition,
    ) -> Result<Refutation<Backend::Output>, ProofError> {
        let start = Instant::now();

        self.initialise_roots();

        let result = match self.process_roots() {
            Ok(Some(refutation)) => Ok(refutation),
            Ok(None) => self.process_learned_clauses(termination),
            Err(error) => Err(error),
        };

        let ProofManager {
            store,
            backend,
            values,
            mut proof_log,
            counters,
            mut statistics,
            ..
        } = self;

        proof_log.finish();
        let refutation = result?;

        statistics.counters = counters;
        statistics.time_total = start.elapsed();

        info!(
            "Proof: {} variables, {} roots, {} learned, {} resolution steps, {:.2} steps per learned clause",
            counters.num_variables,
            counters.num_roots,
            counters.num_learned,
            counters.num_resolution_steps,
            statistics.average_steps_per_learned(),
        );

        Ok(Refutation {
            output: backend.finalize(refutation, &values, &store),
            statistics,
        })
    }

    /// Assign the first proof numbers and the initial values to the roots.
    fn initialise_roots(&mut self) {
        for (id, clause) in self.store.roots() {
            let ClauseOrigin::Root(side) = self.store.origin(id) else {
                unreachable!("roots have a side");
            };

            let step = next_step(&mut self.step_counter);
            self.proof_numbers[id] = Some(step);
            self.proof_log.log_root(step, clause);

            let value = self
                .backend
                .init_root(id, clause, side, &self.classification);
            self.values[id] = Some(value);
        }
    }

    /// Watch the roots and propagate the root units.
    ///
    /// Returns the value of the refutation if the roots are conflicting by themselves.
    fn process_roots(&mut self) -> Result<Option<Backend::Value>, ProofError> {
        for index in 0..self.store.num_roots() {
            let id = ClauseId::create_from_index(index);

            match self.store[id].len() {
                0 => {
                    debug!("Root {id} is the empty clause");
                    let value = self.values[id]
                        .as_ref()
                        .expect("roots are initialised before they are processed");
                    return Ok(Some(self.backend.start_chain(id, value)));
                }
                1 => {
                    let literal = self.store[id][0];
                    if !self.propagator.enqueue(literal, Some(id)) {
                        debug!("Root unit {id} is conflicting");
                        return self.trace(id, ChainTarget::Refutation).map(Some);
                    }
                }
                _ => self.propagator.watch_clause(&self.store, id),
            }
        }

        if let Some(conflict) = self.propagate() {
            debug!("Propagating the roots is conflicting");
            return self.trace(conflict, ChainTarget::Refutation).map(Some);
        }

        self.root_level = self.propagator.trail_len();
        Ok(None)
    }

    fn process_learned_clauses(
        &mut self,
        termination: &mut impl TerminationCondition,
    ) -> Result<Backend::Value, ProofError> {
        let learned: Vec<ClauseId> = self.store.learned_ids().collect();

        for (processed_clauses, id) in learned.into_iter().enumerate() {
            if termination.should_stop() {
                return Err(ProofError::ResourceExhausted { processed_clauses });
            }

            if let Some(refutation) = self.record_clause(id, termination)? {
                return Ok(refutation);
            }
        }

        Err(ProofError::MissingRefutation)
    }

    /// Prove the learned clause `id` from the clauses before it.
    ///
    /// Returns the value of the refutation if the clause completes it.
    fn record_clause(
        &mut self,
        id: ClauseId,
        termination: &mut impl TerminationCondition,
    ) -> Result<Option<Backend::Value>, ProofError> {
        craig_assert_eq_simple!(self.root_level, self.propagator.trail_len());

        if self.store[id]
            .literals()
            .iter()
            .any(|&literal| self.propagator.is_true(literal))
        {
            debug!("Clause {id} is satisfied at the root level");
            self.counters.num_redundant_clauses += 1;
            return Ok(None);
        }

        for index in 0..self.store[id].len() {
            let literal = self.store[id][index];
            if !self.propagator.enqueue(!literal, None) {
                self.propagator.cancel_until(self.root_level);
                return Err(ProofError::AssumptionConflict { clause: id });
            }
        }

        let Some(conflict) = self.propagate() else {
            self.propagator.cancel_until(self.root_level);
            return Err(ProofError::UnprovenClause { clause: id });
        };
        self.counters.num_conflicts += 1;
        termination.conflict_has_been_found();

        if self.is_weaker_or_equal(id, conflict) {
            debug!("Clause {id} contains the conflicting clause {conflict}");
            self.counters.num_subsumed_clauses += 1;
            self.propagator.cancel_until(self.root_level);
            return Ok(None);
        }

        let value = self.trace(conflict, ChainTarget::Clause(id));
        self.propagator.cancel_until(self.root_level);
        self.values[id] = Some(value?);

        match self.store[id].len() {
            0 => {
                debug!("Clause {id} is strengthened to the empty clause");
                let value = self.values[id]
                    .take()
                    .expect("the value of the clause was just stored");
                Ok(Some(value))
            }
            1 => {
                let literal = self.store[id][0];
                if !self.propagator.enqueue(literal, Some(id)) {
                    debug!("Unit {id} is false at the root level");
                    return self.trace(id, ChainTarget::Refutation).map(Some);
                }

                if let Some(conflict) = self.propagate() {
                    debug!("Adding unit {id} to the root level is conflicting");
                    return self.trace(conflict, ChainTarget::Refutation).map(Some);
                }

                self.root_level = self.propagator.trail_len();
                Ok(None)
            }
            _ => {
                self.propagator.watch_clause(&self.store, id);
                Ok(None)
            }
        }
    }

    fn propagate(&mut self) -> Option<ClauseId> {
        let start = Instant::now();
        let conflict = self.propagator.propagate(&mut self.store, self.root_level);
        self.statistics.time_propagation += start.elapsed();
        conflict
    }

    /// Whether every literal of `conflict` occurs in `target`, in which case the conflicting
    /// clause already proves the target.
    fn is_weaker_or_equal(&mut self, target: ClauseId, conflict: ClauseId) -> bool {
        let target = &self.store[target];
        let conflict = &self.store[conflict];

        if target.len() < conflict.len() {
            return false;
        }

        for &literal in target.literals() {
            self.marked_literals[literal] = true;
        }
        let is_contained = conflict
            .literals()
            .iter()
            .all(|&literal| self.marked_literals[literal]);
        for &literal in target.literals() {
            self.marked_literals[literal] = false;
        }

        is_contained
    }

    /// Resolve backwards along the trail, starting at the clause `conflict`, and return the value
    /// of the derived clause.
    ///
    /// The derived clause replaces `target` when it is stronger.
    fn trace(
        &mut self,
        conflict: ClauseId,
        target: ChainTarget,
    ) -> Result<Backend::Value, ProofError> {
        let start = Instant::now();

        let conflict_clause = &self.store[conflict];
        self.resolvent.reset(conflict_clause.literals());
        for &literal in conflict_clause.literals() {
            self.seen[literal.variable()] = true;
        }

        let conflict_value = self.values[conflict]
            .as_ref()
            .expect("only roots and proven clauses can be conflicting");
        let mut accumulated = self.backend.start_chain(conflict, conflict_value);
        let mut previous = self.proof_numbers[conflict]
            .expect("only roots and proven clauses can be conflicting");
        let mut mismatch = None;

        for &literal in self.propagator.trail().iter().rev() {
            let variable = literal.variable();
            if !self.seen[variable] {
                continue;
            }
            self.seen[variable] = false;

            // Assumptions end up in the derived clause.
            let Some(reason) = self.propagator.reason(variable) else {
                continue;
            };

            let reason_clause = &self.store[reason];
            craig_assert_eq_simple!(literal, reason_clause[0]);
            for &other in &reason_clause.literals()[1..] {
                self.seen[other.variable()] = true;
            }

            let step = next_step(&mut self.step_counter);
            let reason_number = self.proof_numbers[reason]
                .expect("only roots and proven clauses can be reasons");
            trace!("Step {step}: resolve {previous} with clause {reason} on {variable}");
            self.proof_log.log_resolution(step, previous, reason_number);
            previous = step;
            self.counters.num_resolution_steps += 1;

            let reason_value = self.values[reason]
                .as_ref()
                .expect("only roots and proven clauses can be reasons");
            self.backend.combine(
                &mut accumulated,
                ResolutionStep {
                    pivot: variable,
                    pivot_class: self.classification.class(variable),
                    reason_literal: literal,
                    reason,
                    reason_value,
                },
            );

            if let Err(error) = self
                .resolvent
                .resolve(literal, &reason_clause.literals()[1..])
            {
                let _ = mismatch.get_or_insert(error);
            }
        }

        let (target_id, target_literals) = match target {
            ChainTarget::Clause(id) => (id, self.store[id].literals()),
            ChainTarget::Refutation => (self.store.empty_clause().unwrap_or(conflict), &[][..]),
        };

        if mismatch.is_none() {
            mismatch = self
                .resolvent
                .literals()
                .iter()
                .find(|literal| !target_literals.contains(literal))
                .map(|literal| format!("the derived clause contains {literal}"));
        }

        if let Some(reason) = mismatch {
            if self.verify_proof {
                return Err(ProofError::ProofMismatch {
                    clause: target_id,
                    reason,
                });
            }
            debug!("The resolution chain of clause {target_id} does not derive it: {reason}");
        }

        match target {
            ChainTarget::Clause(id) => {
                if self.resolvent.len() < self.store[id].len() {
                    let resolvent = &self.resolvent;
                    self.store
                        .strengthen(id, |&literal| resolvent.contains(literal));
                    debug!(
                        "Clause {id} is strengthened to {} literals",
                        self.store[id].len()
                    );
                    self.counters.num_strengthened_clauses += 1;
                }

                if self.verify_proof {
                    craig_assert_simple!(self.resolvent.len() == self.store[id].len());
                }

                self.proof_numbers[id] = Some(previous);
                if id.index() > 0 {
                    let preceding = ClauseId::create_from_index(id.index() - 1);
                    craig_assert_ne_moderate!(
                        self.proof_numbers[preceding],
                        Some(previous),
                        "consecutive clauses are derived by different steps"
                    );
                }
            }
            ChainTarget::Refutation => {
                if let Some(empty_clause) = self.store.empty_clause() {
                    self.proof_numbers[empty_clause] = Some(previous);
                }
            }
        }

        self.statistics.time_tracing += start.elapsed();

        Ok(accumulated)
    }
}

fn next_step(step_counter: &mut u64) -> StepId {
    *step_counter += 1;
    StepId::new(*step_counter).expect("the step counter starts at one")
}
