use serde::{Deserialize, Serialize};

use crate::graph::{GraphError, GraphProvider, TransitionGraph};
use crate::types::{StateId, Transition};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid graph: {0}")]
    Graph(#[from] GraphError),
}

/// Serialized form of a transition graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDocument {
    pub start_state: StateId,
    /// States without outgoing or incoming events must be listed here.
    #[serde(default)]
    pub states: Vec<StateId>,
    #[serde(default)]
    pub transitions: Vec<Transition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_event_count: Option<usize>,
}

impl GraphDocument {
    pub fn into_graph(self) -> Result<TransitionGraph, GraphError> {
        if self.start_state.is_empty() {
            return Err(GraphError::EmptyStartState);
        }
        let start_known = self.states.contains(&self.start_state)
            || self
                .transitions
                .iter()
                .any(|t| t.from == self.start_state || t.to == self.start_state);
        if !start_known {
            return Err(GraphError::UnknownStartState(self.start_state));
        }

        let mut graph = TransitionGraph::new(self.start_state);
        for state in self.states {
            graph.add_state(state);
        }
        for transition in self.transitions {
            // An edge listed with no events still names its endpoints.
            graph.add_state(transition.from.clone());
            graph.add_state(transition.to.clone());
            for event in transition.events {
                graph.add_event(
                    transition.from.clone(),
                    transition.to.clone(),
                    &event.name,
                    event.record,
                );
            }
        }
        if let Some(count) = self.effective_event_count {
            graph.set_effective_event_count(count);
        }

        graph.validate()?;
        Ok(graph)
    }
}

impl TransitionGraph {
    pub fn to_document(&self) -> GraphDocument {
        GraphDocument {
            start_state: self.start_state().clone(),
            states: self.states().to_vec(),
            transitions: self.transitions().cloned().collect(),
            effective_event_count: self.declared_event_count(),
        }
    }
}

pub fn parse_graph(json: &str) -> Result<TransitionGraph, ParseError> {
    let document: GraphDocument = serde_json::from_str(json)?;
    Ok(document.into_graph()?)
}
