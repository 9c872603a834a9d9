use super::TerminationCondition;

/// A [`TerminationCondition`] which never triggers. The engine replays the whole trace.
#[derive(Clone, Copy, Debug, Default)]
pub struct Indefinite;

impl TerminationCondition for Indefinite {
    fn should_stop(&mut self) -> bool {
        false
    }
}
