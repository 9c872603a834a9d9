use std::fmt::Display;
use std::fmt::Formatter;

use crate::containers::StorageKey;

/// Identifies a clause in a [`ClauseStore`](crate::ClauseStore).
///
/// Ids are handed out in insertion order and are never reused, so they also define the order in
/// which clauses are replayed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClauseId {
    index: u32,
}

impl ClauseId {
    /// The position of the clause in the store (and in the trace), starting at zero.
    pub fn position(self) -> usize {
        self.index as usize
    }
}

impl StorageKey for ClauseId {
    fn index(&self) -> usize {
        self.index as usize
    }

    fn create_from_index(index: usize) -> Self {
        ClauseId {
            index: index as u32,
        }
    }
}

impl Display for ClauseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.index)
    }
}
