use std::collections::HashMap;

use seedwalk_graph::{EventId, EventRecord, GraphProvider, StateId};

/// How often each event has been fired across one generation call.
///
/// Unlike the per-walk bookkeeping this is shared by every seed test of the
/// call, so later walks are steered toward events earlier walks skipped.
#[derive(Debug, Clone, Default)]
pub struct SelectionHistory {
    counts: HashMap<EventId, u32>,
}

impl SelectionHistory {
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }

    /// Current count of `id`, registering it at zero if it was never offered.
    pub fn register(&mut self, id: EventId) -> u32 {
        *self.counts.entry(id).or_insert(0)
    }

    /// Count one selection of `id`.
    pub fn record(&mut self, id: EventId) -> u32 {
        let count = self.counts.entry(id).or_insert(0);
        *count += 1;
        *count
    }

    pub fn get(&self, id: EventId) -> Option<u32> {
        self.counts.get(&id).copied()
    }

    /// Events offered as candidates at least once.
    pub fn registered(&self) -> usize {
        self.counts.len()
    }

    /// Events actually fired at least once.
    pub fn selected(&self) -> usize {
        self.counts.values().filter(|&&c| c > 0).count()
    }
}

/// An event that can be fired from the current state.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'g> {
    pub event: &'g EventRecord,
    pub destination: &'g StateId,
    pub selection_count: u32,
}

/// Every named event on every out-edge of `state`, in graph order.
pub fn collect_candidates<'g, G>(
    graph: &'g G,
    state: &StateId,
    history: &mut SelectionHistory,
) -> Vec<Candidate<'g>>
where
    G: GraphProvider + ?Sized,
{
    let mut candidates = Vec::new();
    for transition in graph.transitions_from(state) {
        for named in &transition.events {
            candidates.push(Candidate {
                event: &named.record,
                destination: &transition.to,
                selection_count: history.register(named.record.id),
            });
        }
    }
    candidates
}

/// Index of the candidate to fire: the first one with the lowest selection
/// count. An unselected candidate ends the scan early.
pub fn select_least_selected(candidates: &[Candidate<'_>]) -> Option<usize> {
    let mut best = 0;
    for (index, candidate) in candidates.iter().enumerate() {
        if candidates[best].selection_count == 0 {
            break;
        }
        if candidate.selection_count < candidates[best].selection_count {
            best = index;
        }
    }
    (!candidates.is_empty()).then_some(best)
}
