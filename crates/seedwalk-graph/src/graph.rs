use std::collections::{HashMap, HashSet};

use crate::types::{EventId, EventRecord, StateId, Transition};

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Start state must not be empty")]
    EmptyStartState,

    #[error("Start state '{0}' does not appear in the graph")]
    UnknownStartState(StateId),

    #[error("Declared effective event count {declared} is smaller than the {distinct} distinct event ids in the graph")]
    EffectiveCountTooSmall { declared: usize, distinct: usize },
}

/// Read-only view of a UI transition graph, as consumed by seed generation.
///
/// Implementations own the graph. Callers only borrow from it and clone the
/// event records they keep.
pub trait GraphProvider {
    /// The state every walk starts from.
    fn start_state(&self) -> &StateId;

    /// Outgoing transitions of `state`, in a stable order. Unknown states have none.
    fn transitions_from(&self, state: &StateId) -> &[Transition];

    /// Denominator of the edge-coverage ratio.
    fn effective_event_count(&self) -> usize;

    /// Number of (from, to) edges in the graph.
    fn edge_count(&self) -> usize;

    /// Number of named events across all out-edges of `state`.
    fn out_event_count(&self, state: &StateId) -> usize {
        self.transitions_from(state)
            .iter()
            .map(Transition::event_count)
            .sum()
    }
}

/// In-memory transition graph. Events on the same (from, to) pair share one
/// [`Transition`]; transitions and states keep their insertion order.
#[derive(Debug, Clone)]
pub struct TransitionGraph {
    start: StateId,
    states: Vec<StateId>,
    known: HashSet<StateId>,
    out_edges: HashMap<StateId, Vec<Transition>>,
    edge_count: usize,
    declared_event_count: Option<usize>,
}

impl TransitionGraph {
    pub fn new(start: impl Into<StateId>) -> Self {
        let start = start.into();
        let mut graph = TransitionGraph {
            start: start.clone(),
            states: Vec::new(),
            known: HashSet::new(),
            out_edges: HashMap::new(),
            edge_count: 0,
            declared_event_count: None,
        };
        graph.add_state(start);
        graph
    }

    /// Register a state. Returns false if it was already known.
    pub fn add_state(&mut self, state: impl Into<StateId>) -> bool {
        let state = state.into();
        if self.known.contains(&state) {
            return false;
        }
        self.known.insert(state.clone());
        self.states.push(state);
        true
    }

    /// Attach a named event to the (from, to) edge, creating states and the
    /// edge as needed.
    pub fn add_event(
        &mut self,
        from: impl Into<StateId>,
        to: impl Into<StateId>,
        name: &str,
        record: EventRecord,
    ) {
        let from = from.into();
        let to = to.into();
        self.add_state(from.clone());
        self.add_state(to.clone());

        let edges = self.out_edges.entry(from.clone()).or_default();
        match edges.iter_mut().find(|t| t.to == to) {
            Some(transition) => transition.upsert_event(name, record),
            None => {
                let mut transition = Transition::new(from, to);
                transition.upsert_event(name, record);
                edges.push(transition);
                self.edge_count += 1;
            }
        }
    }

    /// Override the coverage denominator. Checked by [`TransitionGraph::validate`].
    pub fn set_effective_event_count(&mut self, count: usize) {
        self.declared_event_count = Some(count);
    }

    pub fn states(&self) -> &[StateId] {
        &self.states
    }

    pub fn contains_state(&self, state: &StateId) -> bool {
        self.known.contains(state)
    }

    /// All transitions, grouped by source state in state insertion order.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> {
        self.states
            .iter()
            .flat_map(|s| self.out_edges.get(s).into_iter().flatten())
    }

    pub fn distinct_event_ids(&self) -> HashSet<EventId> {
        self.transitions()
            .flat_map(|t| t.events.iter().map(|e| e.record.id))
            .collect()
    }

    pub fn declared_event_count(&self) -> Option<usize> {
        self.declared_event_count
    }

    pub fn validate(&self) -> Result<(), GraphError> {
        if self.start.is_empty() {
            return Err(GraphError::EmptyStartState);
        }
        if let Some(declared) = self.declared_event_count {
            let distinct = self.distinct_event_ids().len();
            if declared < distinct {
                return Err(GraphError::EffectiveCountTooSmall { declared, distinct });
            }
        }
        Ok(())
    }
}

impl GraphProvider for TransitionGraph {
    fn start_state(&self) -> &StateId {
        &self.start
    }

    fn transitions_from(&self, state: &StateId) -> &[Transition] {
        self.out_edges.get(state).map(Vec::as_slice).unwrap_or(&[])
    }

    fn effective_event_count(&self) -> usize {
        self.declared_event_count
            .unwrap_or_else(|| self.distinct_event_ids().len())
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hub_graph() -> TransitionGraph {
        let mut g = TransitionGraph::new("home");
        g.add_event("home", "list", "open_list", EventRecord::new(1));
        g.add_event("home", "list", "swipe_left", EventRecord::new(2));
        g.add_event("home", "settings", "open_settings", EventRecord::new(3));
        g.add_event("list", "home", "back", EventRecord::new(4));
        g
    }

    #[test]
    fn test_new_graph_contains_start() {
        let g = TransitionGraph::new("home");
        assert_eq!(g.start_state(), &StateId::new("home"));
        assert_eq!(g.states().len(), 1);
        assert_eq!(g.edge_count(), 0);
        assert!(g.transitions_from(&"home".into()).is_empty());
    }

    #[test]
    fn test_events_on_same_pair_share_transition() {
        let g = hub_graph();
        let out = g.transitions_from(&"home".into());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].to, StateId::new("list"));
        assert_eq!(out[0].event_count(), 2);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn test_out_event_count_sums_named_events() {
        let g = hub_graph();
        assert_eq!(g.out_event_count(&"home".into()), 3);
        assert_eq!(g.out_event_count(&"settings".into()), 0);
        assert_eq!(g.out_event_count(&"nowhere".into()), 0);
    }

    #[test]
    fn test_effective_event_count_defaults_to_distinct_ids() {
        let mut g = hub_graph();
        g.add_event("settings", "home", "back", EventRecord::new(4));
        assert_eq!(g.effective_event_count(), 4);

        g.set_effective_event_count(10);
        assert_eq!(g.effective_event_count(), 10);
        assert!(g.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_undersized_declared_count() {
        let mut g = hub_graph();
        g.set_effective_event_count(2);
        assert!(matches!(
            g.validate(),
            Err(GraphError::EffectiveCountTooSmall {
                declared: 2,
                distinct: 4
            })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_start() {
        let g = TransitionGraph::new("");
        assert!(matches!(g.validate(), Err(GraphError::EmptyStartState)));
    }
}
