use serde::{Deserialize, Serialize};

/// Minimum number of out-events that makes a state a rewind target.
pub const DEFAULT_MIN_OUT_EVENTS: usize = 5;

/// Revisits of one state within a walk before the walk counts as stuck.
pub const DEFAULT_MAX_STATE_REVISITS: u32 = 10;

/// Rewinds a walk may perform before it only accepts rewind targets that still
/// offer an untried event.
pub const DEFAULT_MAX_REWINDS_PER_WALK: u32 = 16;

/// What a walk failure (no eligible rewind target, or a target that is no
/// longer on the walk) does to the generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkFailureMode {
    /// Return the error from the whole generation call.
    #[default]
    Abort,
    /// Keep the seed test built so far and continue with the next one.
    EndWalk,
}

/// Tunable thresholds of the exploration policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub min_out_events: usize,
    pub max_state_revisits: u32,
    pub max_rewinds_per_walk: u32,
    pub on_walk_failure: WalkFailureMode,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            min_out_events: DEFAULT_MIN_OUT_EVENTS,
            max_state_revisits: DEFAULT_MAX_STATE_REVISITS,
            max_rewinds_per_walk: DEFAULT_MAX_REWINDS_PER_WALK,
            on_walk_failure: WalkFailureMode::Abort,
        }
    }
}
