//! A [`TerminationCondition`] is polled by the proof engine before each derived clause is
//! replayed. It indicates when the engine should give up, even though the replay is not finished.
//! The most common example would be [`TimeBudget`], which gives the engine a certain time budget
//! to complete the proof.

mod combinator;
mod conflict_budget;
mod indefinite;
mod time_budget;

pub use combinator::Combinator;
pub use conflict_budget::ConflictBudget;
pub use indefinite::Indefinite;
pub use time_budget::TimeBudget;

/// The central trait that defines a termination condition.
pub trait TerminationCondition {
    /// Returns `true` when the engine should stop, `false` otherwise.
    fn should_stop(&mut self) -> bool;

    /// Notifies the condition that propagating the assumptions of a derived clause ended in a
    /// conflict.
    fn conflict_has_been_found(&mut self) {}
}

impl<T: TerminationCondition> TerminationCondition for Option<T> {
    fn should_stop(&mut self) -> bool {
        match self {
            Some(t) => t.should_stop(),
            None => false,
        }
    }

    fn conflict_has_been_found(&mut self) {
        if let Some(t) = self {
            t.conflict_has_been_found()
        }
    }
}

impl<T: TerminationCondition + ?Sized> TerminationCondition for &mut T {
    fn should_stop(&mut self) -> bool {
        (**self).should_stop()
    }

    fn conflict_has_been_found(&mut self) {
        (**self).conflict_has_been_found()
    }
}
