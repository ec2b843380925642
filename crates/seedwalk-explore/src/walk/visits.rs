use std::collections::HashMap;

use seedwalk_graph::StateId;

/// Per-walk revisit counters.
///
/// A state's first entry records 0; every later entry adds one, so the value is
/// the number of revisits since the first visit.
#[derive(Debug, Clone, Default)]
pub struct VisitCounts {
    counts: HashMap<StateId, u32>,
}

impl VisitCounts {
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }

    /// Count an entry into `state` and return its updated revisit count.
    pub fn enter(&mut self, state: &StateId) -> u32 {
        match self.counts.get_mut(state) {
            Some(count) => {
                *count += 1;
                *count
            }
            None => {
                self.counts.insert(state.clone(), 0);
                0
            }
        }
    }

    /// Revisit count of `state`, `None` if it has not been entered this walk.
    pub fn get(&self, state: &StateId) -> Option<u32> {
        self.counts.get(state).copied()
    }

    pub fn is_stuck(&self, state: &StateId, max_revisits: u32) -> bool {
        self.get(state).is_some_and(|count| count > max_revisits)
    }

    /// Number of distinct states entered this walk.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
