use log::info;
use seedwalk_explore::{GenerationReport, PolicyConfig, SeedGenError, SeedGenerator};
use seedwalk_graph::{parse_graph, GraphProvider, ParseError, StateId, TransitionGraph};
use serde::{Deserialize, Serialize};

use crate::limits::{validate_session_limits, LimitViolation, SessionLimits};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Graph parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid request: {0}")]
    InvalidRequest(#[source] serde_json::Error),

    #[error("Report serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Generation error: {0}")]
    Generation(#[from] SeedGenError),

    #[error("Limit exceeded: {0}")]
    LimitExceeded(#[from] LimitViolation),
}

/// What to generate, and with which policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRequest {
    pub max_seed_test_length: usize,
    pub max_seed_test_suite_size: usize,
    #[serde(default)]
    pub policy: PolicyConfig,
}

impl SessionRequest {
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        serde_json::from_str(json).map_err(SessionError::InvalidRequest)
    }
}

/// Shape of the graph a session ran on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub start_state: StateId,
    pub states: usize,
    pub edges: usize,
    pub effective_event_count: usize,
}

impl GraphSummary {
    pub fn of(graph: &TransitionGraph) -> Self {
        Self {
            start_state: graph.start_state().clone(),
            states: graph.states().len(),
            edges: graph.edge_count(),
            effective_event_count: graph.effective_event_count(),
        }
    }
}

/// Result of one session, ready to hand to the mutation stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub graph: GraphSummary,
    pub request: SessionRequest,
    pub generation: GenerationReport,
}

/// Runs seed generation on graph documents under fixed size limits.
pub struct SeedSession {
    limits: SessionLimits,
}

impl SeedSession {
    pub fn new(limits: SessionLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &SessionLimits {
        &self.limits
    }

    /// Check limits, parse the graph document and generate a suite.
    pub fn run(
        &self,
        graph_json: &str,
        request: &SessionRequest,
    ) -> Result<SessionReport, SessionError> {
        validate_session_limits(
            &self.limits,
            graph_json.len(),
            request.max_seed_test_length,
            request.max_seed_test_suite_size,
        )?;

        let graph = parse_graph(graph_json)?;
        let summary = GraphSummary::of(&graph);
        info!(
            "Generating {} seed tests of up to {} events from '{}' ({} states, {} edges)",
            request.max_seed_test_suite_size,
            request.max_seed_test_length,
            summary.start_state,
            summary.states,
            summary.edges
        );

        let generation = SeedGenerator::new(&graph, request.policy.clone())
            .generate_with_report(
                request.max_seed_test_length,
                request.max_seed_test_suite_size,
            )?;

        Ok(SessionReport {
            graph: summary,
            request: request.clone(),
            generation,
        })
    }

    /// JSON in, JSON out: parse the request, run, and serialize the report.
    pub fn run_json(&self, graph_json: &str, request_json: &str) -> Result<String, SessionError> {
        let request = SessionRequest::from_json(request_json)?;
        let report = self.run(graph_json, &request)?;
        Ok(serde_json::to_string_pretty(&report)?)
    }
}

impl Default for SeedSession {
    fn default() -> Self {
        Self::new(SessionLimits::default())
    }
}
