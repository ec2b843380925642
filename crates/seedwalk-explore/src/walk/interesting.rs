use seedwalk_graph::{GraphProvider, StateId};

/// States remembered as rewind targets during one walk, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct InterestingStates {
    states: Vec<StateId>,
}

impl InterestingStates {
    pub fn new() -> Self {
        Self { states: Vec::new() }
    }

    /// True if `state` is not yet recorded and has at least `min_out_events`
    /// outgoing events. Does not record it.
    pub fn is_interesting<G>(&self, graph: &G, state: &StateId, min_out_events: usize) -> bool
    where
        G: GraphProvider + ?Sized,
    {
        !self.contains(state) && graph.out_event_count(state) >= min_out_events
    }

    /// Record `state`. Returns false if it was already recorded.
    pub fn insert(&mut self, state: StateId) -> bool {
        if self.contains(&state) {
            return false;
        }
        self.states.push(state);
        true
    }

    pub fn contains(&self, state: &StateId) -> bool {
        self.states.contains(state)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StateId> {
        self.states.iter()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedwalk_graph::{EventRecord, TransitionGraph};

    fn graph() -> TransitionGraph {
        let mut g = TransitionGraph::new("hub");
        for id in 0..5 {
            g.add_event("hub", format!("s{id}"), &format!("e{id}"), EventRecord::new(id));
        }
        g.add_event("s0", "hub", "back", EventRecord::new(10));
        g
    }

    #[test]
    fn test_out_degree_threshold() {
        let g = graph();
        let interesting = InterestingStates::new();
        assert!(interesting.is_interesting(&g, &"hub".into(), 5));
        assert!(!interesting.is_interesting(&g, &"hub".into(), 6));
        assert!(!interesting.is_interesting(&g, &"s0".into(), 5));
    }

    #[test]
    fn test_recorded_state_is_never_interesting_again() {
        let g = graph();
        let mut interesting = InterestingStates::new();
        let hub = StateId::new("hub");

        assert!(interesting.is_interesting(&g, &hub, 5));
        assert!(interesting.insert(hub.clone()));
        assert!(!interesting.is_interesting(&g, &hub, 5));
        assert!(!interesting.insert(hub));
        assert_eq!(interesting.len(), 1);
    }
}
