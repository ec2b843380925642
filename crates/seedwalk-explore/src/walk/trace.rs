use seedwalk_graph::{EventRecord, StateId};
use serde::{Deserialize, Serialize};

use crate::suite::{render_trace, SeedTest};

/// A single transition taken during a walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkStep {
    /// Owned copy of the fired event.
    pub event: EventRecord,
    /// The state the event led to.
    pub destination: StateId,
    /// Global selection count of the event at the moment it was chosen.
    pub selection_count: u32,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RewindError {
    #[error("rewind target '{goal}' is not on the current walk ({steps} steps)")]
    TargetNotFound { goal: StateId, steps: usize },
}

/// Step log of the walk in progress.
///
/// This is the only record of the walk: the seed test, its trace and its
/// length are all read off the steps, so a rewind truncates all of them at
/// once.
#[derive(Debug, Clone)]
pub struct WalkLog {
    origin: StateId,
    steps: Vec<WalkStep>,
}

impl WalkLog {
    pub fn new(origin: StateId) -> Self {
        Self {
            origin,
            steps: Vec::new(),
        }
    }

    pub fn record(&mut self, event: EventRecord, destination: StateId, selection_count: u32) {
        self.steps.push(WalkStep {
            event,
            destination,
            selection_count,
        });
    }

    pub fn origin(&self) -> &StateId {
        &self.origin
    }

    /// The state the walk currently stands on.
    pub fn position(&self) -> &StateId {
        self.steps
            .last()
            .map(|step| &step.destination)
            .unwrap_or(&self.origin)
    }

    pub fn steps(&self) -> &[WalkStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn trace(&self) -> String {
        render_trace(self.steps.iter().map(|s| s.event.id))
    }

    /// Travel back to the most recent point where the walk stood on `goal`.
    ///
    /// Drops every step after the last one ending in `goal`. If no step ends
    /// there but `goal` is the origin, the log is emptied. Otherwise nothing is
    /// removed and `TargetNotFound` is returned. Returns the number of steps
    /// dropped.
    pub fn rewind_to(&mut self, goal: &StateId) -> Result<usize, RewindError> {
        let keep = match self.steps.iter().rposition(|s| &s.destination == goal) {
            Some(index) => index + 1,
            None if &self.origin == goal => 0,
            None => {
                return Err(RewindError::TargetNotFound {
                    goal: goal.clone(),
                    steps: self.steps.len(),
                })
            }
        };
        let dropped = self.steps.len() - keep;
        self.steps.truncate(keep);
        Ok(dropped)
    }

    pub fn into_seed_test(self) -> SeedTest {
        SeedTest::new(self.steps.into_iter().map(|s| s.event).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// origin -(1)-> a -(2)-> b -(3)-> a -(4)-> c
    fn sample_log() -> WalkLog {
        let mut log = WalkLog::new("origin".into());
        log.record(EventRecord::new(1), "a".into(), 0);
        log.record(EventRecord::new(2), "b".into(), 0);
        log.record(EventRecord::new(3), "a".into(), 1);
        log.record(EventRecord::new(4), "c".into(), 0);
        log
    }

    #[test]
    fn test_position_follows_last_step() {
        let log = sample_log();
        assert_eq!(log.position(), &StateId::new("c"));
        assert_eq!(WalkLog::new("origin".into()).position(), &StateId::new("origin"));
    }

    #[test]
    fn test_rewind_stops_at_most_recent_occurrence() {
        let mut log = sample_log();
        let dropped = log.rewind_to(&"a".into()).unwrap();
        assert_eq!(dropped, 1);
        assert_eq!(log.len(), 3);
        assert_eq!(log.position(), &StateId::new("a"));
        assert_eq!(log.trace(), " -(1)->  -(2)->  -(3)-> ");
    }

    #[test]
    fn test_rewind_to_current_position_is_noop() {
        let mut log = sample_log();
        assert_eq!(log.rewind_to(&"c".into()).unwrap(), 0);
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn test_rewind_to_origin_empties_log() {
        let mut log = sample_log();
        assert_eq!(log.rewind_to(&"origin".into()).unwrap(), 4);
        assert!(log.is_empty());
        assert_eq!(log.position(), &StateId::new("origin"));
        assert_eq!(log.trace(), "");
    }

    #[test]
    fn test_rewind_to_unknown_state_leaves_log_intact() {
        let mut log = sample_log();
        let err = log.rewind_to(&"elsewhere".into()).unwrap_err();
        assert_eq!(
            err,
            RewindError::TargetNotFound {
                goal: "elsewhere".into(),
                steps: 4
            }
        );
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn test_rewind_on_empty_log_does_not_underflow() {
        let mut log = WalkLog::new("origin".into());
        assert!(log.rewind_to(&"a".into()).is_err());
        assert!(log.is_empty());
    }

    #[test]
    fn test_seed_test_matches_log() {
        let log = sample_log();
        let trace = log.trace();
        let len = log.len();
        let seed_test = log.into_seed_test();
        assert_eq!(seed_test.len(), len);
        assert_eq!(seed_test.trace(), trace);
        assert_eq!(seed_test.event_ids(), vec![1, 2, 3, 4]);
    }
}
