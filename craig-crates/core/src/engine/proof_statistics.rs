use std::time::Duration;

use crate::create_statistics_struct;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

create_statistics_struct!(
    /// The counters of a single proof.
    ProofCounters {
        num_variables: u32,
        num_global_variables: usize,
        num_roots: usize,
        num_learned: usize,
        num_resolution_steps: u64,
        /// Learned clauses which were already satisfied at the root level.
        num_redundant_clauses: u64,
        /// Learned clauses which contain the clause that conflicted under their assumptions.
        num_subsumed_clauses: u64,
        /// Learned clauses from which literals were removed because the resolution chain derives
        /// a stronger clause.
        num_strengthened_clauses: u64,
        num_conflicts: u64,
    }
);

/// The statistics of a single proof, returned with its result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProofStatistics {
    pub counters: ProofCounters,
    pub time_propagation: Duration,
    pub time_tracing: Duration,
    pub time_total: Duration,
}

impl ProofStatistics {
    /// The average number of resolution steps per learned clause.
    pub fn average_steps_per_learned(&self) -> f64 {
        if self.counters.num_learned == 0 {
            return 0.0;
        }

        self.counters.num_resolution_steps as f64 / self.counters.num_learned as f64
    }
}

impl Statistic for ProofStatistics {
    fn log(&self, statistic_logger: StatisticLogger) {
        self.counters.log(statistic_logger.clone());

        // `f64` has an inherent `log`, so the trait method is named explicitly.
        Statistic::log(
            &self.time_propagation.as_secs_f64(),
            statistic_logger.attach_to_prefix("time_propagation_seconds"),
        );
        Statistic::log(
            &self.time_tracing.as_secs_f64(),
            statistic_logger.attach_to_prefix("time_tracing_seconds"),
        );
        Statistic::log(
            &self.time_total.as_secs_f64(),
            statistic_logger.attach_to_prefix("time_total_seconds"),
        );
    }
}
