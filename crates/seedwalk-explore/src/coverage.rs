//! Edge coverage of a generated suite.

use std::fmt;

use seedwalk_graph::GraphProvider;
use serde::{Deserialize, Serialize};

use crate::walk::selection::SelectionHistory;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// Distinct events offered as candidates during generation.
    pub registered_events: usize,
    /// Distinct events fired at least once.
    pub selected_events: usize,
    pub effective_event_count: usize,
    pub edge_count: usize,
    /// `registered_events / effective_event_count`, within [0, 1].
    pub ratio: f64,
}

impl CoverageReport {
    pub fn compute<G>(graph: &G, selections: &SelectionHistory) -> Self
    where
        G: GraphProvider + ?Sized,
    {
        let registered_events = selections.registered();
        let effective_event_count = graph.effective_event_count();
        let ratio = if effective_event_count == 0 {
            0.0
        } else {
            (registered_events as f64 / effective_event_count as f64).min(1.0)
        };

        Self {
            registered_events,
            selected_events: selections.selected(),
            effective_event_count,
            edge_count: graph.edge_count(),
            ratio,
        }
    }
}

impl fmt::Display for CoverageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "the edge coverage: {:.6}(={}/{})",
            self.ratio, self.registered_events, self.edge_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedwalk_graph::{EventRecord, TransitionGraph};

    fn graph() -> TransitionGraph {
        let mut g = TransitionGraph::new("home");
        g.add_event("home", "a", "x", EventRecord::new(1));
        g.add_event("home", "a", "y", EventRecord::new(2));
        g.add_event("a", "home", "back", EventRecord::new(3));
        g.add_event("home", "b", "z", EventRecord::new(4));
        g
    }

    #[test]
    fn test_ratio_counts_registered_events() {
        let g = graph();
        let mut selections = SelectionHistory::new();
        selections.register(1);
        selections.register(2);
        selections.record(1);

        let report = CoverageReport::compute(&g, &selections);
        assert_eq!(report.registered_events, 2);
        assert_eq!(report.selected_events, 1);
        assert_eq!(report.effective_event_count, 4);
        assert_eq!(report.edge_count, 3);
        assert!((report.ratio - 0.5).abs() < f64::EPSILON);
        assert_eq!(report.to_string(), "the edge coverage: 0.500000(=2/3)");
    }

    #[test]
    fn test_empty_graph_has_zero_coverage() {
        let g = TransitionGraph::new("home");
        let report = CoverageReport::compute(&g, &SelectionHistory::new());
        assert_eq!(report.ratio, 0.0);
    }
}
