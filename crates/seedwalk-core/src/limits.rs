//! Size limits for a seed-generation session.
//!
//! Checked before any parsing or generation happens, so an oversized graph
//! document or an absurd request is refused up front.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionLimits {
    /// Maximum graph document size in bytes.
    pub max_graph_json_bytes: u64,
    /// Largest accepted `max_seed_test_length`.
    pub max_seed_test_length: usize,
    /// Largest accepted `max_seed_test_suite_size`.
    pub max_seed_test_suite_size: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            max_graph_json_bytes: 16 * 1024 * 1024, // 16 MB
            max_seed_test_length: 10_000,
            max_seed_test_suite_size: 10_000,
        }
    }
}

/// Validate a request against the session limits.
pub fn validate_session_limits(
    limits: &SessionLimits,
    graph_json_size: usize,
    max_seed_test_length: usize,
    max_seed_test_suite_size: usize,
) -> Result<(), LimitViolation> {
    if graph_json_size as u64 > limits.max_graph_json_bytes {
        return Err(LimitViolation::GraphTooLarge {
            size: graph_json_size as u64,
            max: limits.max_graph_json_bytes,
        });
    }
    if max_seed_test_length > limits.max_seed_test_length {
        return Err(LimitViolation::SeedTestTooLong {
            requested: max_seed_test_length,
            max: limits.max_seed_test_length,
        });
    }
    if max_seed_test_suite_size > limits.max_seed_test_suite_size {
        return Err(LimitViolation::SuiteTooLarge {
            requested: max_seed_test_suite_size,
            max: limits.max_seed_test_suite_size,
        });
    }
    Ok(())
}

/// A limit violation error.
#[derive(Debug, Clone, PartialEq)]
pub enum LimitViolation {
    GraphTooLarge { size: u64, max: u64 },
    SeedTestTooLong { requested: usize, max: usize },
    SuiteTooLarge { requested: usize, max: usize },
}

impl std::fmt::Display for LimitViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GraphTooLarge { size, max } => {
                write!(f, "Graph JSON too large ({size} bytes, max {max})")
            }
            Self::SeedTestTooLong { requested, max } => {
                write!(f, "Seed test length {requested} exceeds the limit of {max}")
            }
            Self::SuiteTooLarge { requested, max } => {
                write!(f, "Suite size {requested} exceeds the limit of {max}")
            }
        }
    }
}

impl std::error::Error for LimitViolation {}
