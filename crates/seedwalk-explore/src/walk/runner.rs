use log::{info, warn};
use seedwalk_graph::GraphProvider;
use serde::{Deserialize, Serialize};

use super::engine::{Walk, WalkError, WalkOutcome, WalkSummary};
use super::selection::SelectionHistory;
use crate::config::{PolicyConfig, WalkFailureMode};
use crate::coverage::CoverageReport;
use crate::suite::SeedTestSuite;

#[derive(Debug, thiserror::Error)]
pub enum SeedGenError {
    #[error("{name} must be positive")]
    InvalidBound { name: &'static str },

    #[error("seed test {index}: {source}")]
    Walk {
        index: usize,
        #[source]
        source: WalkError,
    },
}

/// Everything produced by one generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub suite: SeedTestSuite,
    pub walks: Vec<WalkSummary>,
    pub coverage: CoverageReport,
}

impl GenerationReport {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// State that lives for a whole generation call, shared by all of its walks.
#[derive(Debug, Default)]
struct GenerationContext {
    selections: SelectionHistory,
    suite: SeedTestSuite,
    walks: Vec<WalkSummary>,
}

/// Builds seed-test suites from a transition graph.
pub struct SeedGenerator<'g, G: GraphProvider + ?Sized> {
    graph: &'g G,
    config: PolicyConfig,
}

impl<'g, G: GraphProvider + ?Sized> SeedGenerator<'g, G> {
    pub fn new(graph: &'g G, config: PolicyConfig) -> Self {
        Self { graph, config }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Generate exactly `max_seed_test_suite_size` seed tests of at most
    /// `max_seed_test_length` events each.
    pub fn generate(
        &self,
        max_seed_test_length: usize,
        max_seed_test_suite_size: usize,
    ) -> Result<SeedTestSuite, SeedGenError> {
        self.generate_with_report(max_seed_test_length, max_seed_test_suite_size)
            .map(|report| report.suite)
    }

    /// Like [`SeedGenerator::generate`], also returning per-walk summaries and
    /// the coverage report.
    pub fn generate_with_report(
        &self,
        max_seed_test_length: usize,
        max_seed_test_suite_size: usize,
    ) -> Result<GenerationReport, SeedGenError> {
        if max_seed_test_length == 0 {
            return Err(SeedGenError::InvalidBound {
                name: "max_seed_test_length",
            });
        }
        if max_seed_test_suite_size == 0 {
            return Err(SeedGenError::InvalidBound {
                name: "max_seed_test_suite_size",
            });
        }

        let mut context = GenerationContext::default();

        for index in 1..=max_seed_test_suite_size {
            let mut walk = Walk::new(self.graph, &self.config);
            let outcome = match walk.run(max_seed_test_length, &mut context.selections) {
                Ok(outcome) => outcome,
                Err(source) => match self.config.on_walk_failure {
                    WalkFailureMode::Abort => return Err(SeedGenError::Walk { index, source }),
                    WalkFailureMode::EndWalk => {
                        warn!("seed test [{}] ended early: {}", index, source);
                        WalkOutcome::Failed
                    }
                },
            };

            context.walks.push(walk.summary(index, outcome));
            let seed_test = walk.into_seed_test();
            info!("the seed test [{}]: {}", index, seed_test.trace());
            context.suite.push(seed_test);
        }

        let coverage = CoverageReport::compute(self.graph, &context.selections);
        info!("{}", coverage);

        Ok(GenerationReport {
            suite: context.suite,
            walks: context.walks,
            coverage,
        })
    }
}

/// Generate a suite with the default policy thresholds.
pub fn generate_seed_tests<G>(
    graph: &G,
    max_seed_test_length: usize,
    max_seed_test_suite_size: usize,
) -> Result<SeedTestSuite, SeedGenError>
where
    G: GraphProvider + ?Sized,
{
    SeedGenerator::new(graph, PolicyConfig::default())
        .generate(max_seed_test_length, max_seed_test_suite_size)
}
