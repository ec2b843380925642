use std::collections::{HashMap, HashSet};

use log::debug;
use seedwalk_graph::{EventId, GraphProvider, StateId};
use serde::{Deserialize, Serialize};

use super::fitness::{select_fittest_state, Fitness};
use super::interesting::InterestingStates;
use super::selection::{collect_candidates, select_least_selected, SelectionHistory};
use super::trace::{RewindError, WalkLog};
use super::visits::VisitCounts;
use crate::config::PolicyConfig;
use crate::suite::SeedTest;

/// How a walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkOutcome {
    /// Reached the length bound.
    Done,
    /// The current state has no outgoing events.
    DeadEnd,
    /// Got stuck after spending the rewind budget, with no untried event left
    /// at the rewind target.
    RewindLimit,
    /// Ended by a [`WalkError`] under [`crate::WalkFailureMode::EndWalk`].
    Failed,
}

/// Per-walk statistics reported alongside the suite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkSummary {
    /// 1-based position of the seed test in the suite.
    pub index: usize,
    pub outcome: WalkOutcome,
    pub length: usize,
    pub rewinds: u32,
    pub interesting_states: usize,
    pub states_visited: usize,
}

/// Unrecoverable conditions for the current walk.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WalkError {
    /// Stuck, and there is no interesting state left to travel back to.
    #[error("stuck at '{stuck}' with no eligible interesting state to travel back to")]
    NoEligibleState { stuck: StateId },

    #[error(transparent)]
    Rewind(#[from] RewindError),
}

/// One walk through the graph, building one seed test.
///
/// Holds only walk-scoped state. The selection history it is driven with
/// belongs to the generation call and outlives the walk.
pub struct Walk<'g, G: GraphProvider + ?Sized> {
    graph: &'g G,
    config: &'g PolicyConfig,
    log: WalkLog,
    interesting: InterestingStates,
    visits: VisitCounts,
    /// Events fired from each state during this walk, including rewound ones.
    fired: HashMap<StateId, HashSet<EventId>>,
    rewinds: u32,
}

impl<'g, G: GraphProvider + ?Sized> Walk<'g, G> {
    pub fn new(graph: &'g G, config: &'g PolicyConfig) -> Self {
        Self {
            graph,
            config,
            log: WalkLog::new(graph.start_state().clone()),
            interesting: InterestingStates::new(),
            visits: VisitCounts::new(),
            fired: HashMap::new(),
            rewinds: 0,
        }
    }

    /// Walk until the seed test holds `max_length` events or the walk ends
    /// early.
    ///
    /// On error the log is left exactly as it was before the failing rewind.
    pub fn run(
        &mut self,
        max_length: usize,
        history: &mut SelectionHistory,
    ) -> Result<WalkOutcome, WalkError> {
        while self.log.len() < max_length {
            let current = self.log.position().clone();

            let revisits = self.visits.enter(&current);
            if self
                .interesting
                .is_interesting(self.graph, &current, self.config.min_out_events)
            {
                self.interesting.insert(current.clone());
            }

            if self.visits.is_stuck(&current, self.config.max_state_revisits)
                && !self.travel_back(&current, revisits)?
            {
                return Ok(WalkOutcome::RewindLimit);
            }

            let position = self.log.position();
            let candidates = collect_candidates(self.graph, position, history);
            let Some(index) = select_least_selected(&candidates) else {
                debug!("dead end at '{}' after {} events", position, self.log.len());
                return Ok(WalkOutcome::DeadEnd);
            };

            let chosen = candidates[index];
            self.fired
                .entry(position.clone())
                .or_default()
                .insert(chosen.event.id);
            history.record(chosen.event.id);
            self.log.record(
                chosen.event.clone(),
                chosen.destination.clone(),
                chosen.selection_count,
            );
        }

        Ok(WalkOutcome::Done)
    }

    /// Rewind to the fittest interesting state. Returns `false` when the walk
    /// should end instead: the rewind budget is spent and the target has no
    /// event this walk has not tried from it yet.
    fn travel_back(&mut self, stuck: &StateId, revisits: u32) -> Result<bool, WalkError> {
        let budget_spent = self.rewinds >= self.config.max_rewinds_per_walk;
        let goal = match select_fittest_state(
            &self.interesting,
            &self.visits,
            self.config.max_state_revisits,
        ) {
            Fitness::Found(state) => state,
            Fitness::NoEligibleState if budget_spent => {
                debug!(
                    "stuck at '{}' after {} revisits, rewind budget of {} spent",
                    stuck, revisits, self.config.max_rewinds_per_walk
                );
                return Ok(false);
            }
            Fitness::NoEligibleState => {
                return Err(WalkError::NoEligibleState {
                    stuck: stuck.clone(),
                })
            }
        };

        if budget_spent && !self.offers_untried_event(&goal) {
            debug!(
                "stuck at '{}' after {} revisits, rewind budget of {} spent and '{}' has nothing untried",
                stuck, revisits, self.config.max_rewinds_per_walk, goal
            );
            return Ok(false);
        }

        let dropped = self.log.rewind_to(&goal)?;
        self.rewinds += 1;
        debug!(
            "stuck at '{}' after {} revisits, traveled back to '{}' ({} events dropped)",
            stuck, revisits, goal, dropped
        );
        Ok(true)
    }

    /// Whether `state` still has an event this walk never fired from it. Past
    /// the budget, total rewinds are capped at the budget plus its out-event count.
    fn offers_untried_event(&self, state: &StateId) -> bool {
        let extra = u32::try_from(self.graph.out_event_count(state)).unwrap_or(u32::MAX);
        if self.rewinds >= self.config.max_rewinds_per_walk.saturating_add(extra) {
            return false;
        }
        let fired = self.fired.get(state);
        self.graph
            .transitions_from(state)
            .iter()
            .flat_map(|transition| &transition.events)
            .any(|named| fired.map_or(true, |ids| !ids.contains(&named.record.id)))
    }

    pub fn log(&self) -> &WalkLog {
        &self.log
    }

    pub fn interesting(&self) -> &InterestingStates {
        &self.interesting
    }

    pub fn visits(&self) -> &VisitCounts {
        &self.visits
    }

    pub fn rewinds(&self) -> u32 {
        self.rewinds
    }

    pub fn summary(&self, index: usize, outcome: WalkOutcome) -> WalkSummary {
        WalkSummary {
            index,
            outcome,
            length: self.log.len(),
            rewinds: self.rewinds,
            interesting_states: self.interesting.len(),
            states_visited: self.visits.len(),
        }
    }

    pub fn into_seed_test(self) -> SeedTest {
        self.log.into_seed_test()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedwalk_graph::{EventRecord, TransitionGraph};

    #[test]
    fn test_self_loop_counts_revisits() {
        let mut g = TransitionGraph::new("s");
        g.add_event("s", "s", "refresh", EventRecord::new(1));
        let config = PolicyConfig::default();
        let mut history = SelectionHistory::new();

        let mut walk = Walk::new(&g, &config);
        assert_eq!(walk.run(1, &mut history).unwrap(), WalkOutcome::Done);
        assert_eq!(walk.visits().get(&"s".into()), Some(0));

        let mut walk = Walk::new(&g, &config);
        assert_eq!(walk.run(2, &mut history).unwrap(), WalkOutcome::Done);
        assert_eq!(walk.visits().get(&"s".into()), Some(1));
    }

    #[test]
    fn test_dead_end_start_gives_empty_walk() {
        let g = TransitionGraph::new("splash");
        let config = PolicyConfig::default();
        let mut history = SelectionHistory::new();

        let mut walk = Walk::new(&g, &config);
        assert_eq!(walk.run(10, &mut history).unwrap(), WalkOutcome::DeadEnd);
        assert!(walk.log().is_empty());
        assert_eq!(walk.visits().get(&"splash".into()), Some(0));
    }

    #[test]
    fn test_stuck_without_interesting_state_fails() {
        let mut g = TransitionGraph::new("s");
        g.add_event("s", "s", "refresh", EventRecord::new(1));
        let config = PolicyConfig::default();
        let mut history = SelectionHistory::new();

        let mut walk = Walk::new(&g, &config);
        let err = walk.run(100, &mut history).unwrap_err();
        assert_eq!(err, WalkError::NoEligibleState { stuck: "s".into() });
        // Entered with revisit counts 0..=11; the twelfth entry is stuck.
        assert_eq!(walk.log().len(), 11);
    }

    #[test]
    fn test_stuck_hub_skips_itself_as_target() {
        let mut g = TransitionGraph::new("hub");
        for id in 0..5 {
            g.add_event("hub", "hub", &format!("e{id}"), EventRecord::new(id));
        }
        let config = PolicyConfig::default();
        let mut history = SelectionHistory::new();

        let mut walk = Walk::new(&g, &config);
        let err = walk.run(100, &mut history).unwrap_err();
        assert!(matches!(err, WalkError::NoEligibleState { .. }));
        assert_eq!(walk.interesting().len(), 1);
        assert_eq!(walk.rewinds(), 0);
    }

    #[test]
    fn test_rewind_to_start_hub_empties_walk() {
        // hub (5 events) -> loop <-> loop2; hub is the start state.
        let mut g = TransitionGraph::new("hub");
        for id in 0..5 {
            g.add_event("hub", "a", &format!("e{id}"), EventRecord::new(id));
        }
        g.add_event("a", "b", "next", EventRecord::new(10));
        g.add_event("b", "a", "prev", EventRecord::new(11));
        let config = PolicyConfig {
            max_state_revisits: 2,
            max_rewinds_per_walk: 1,
            ..Default::default()
        };
        let mut history = SelectionHistory::new();

        let mut walk = Walk::new(&g, &config);
        let outcome = walk.run(50, &mut history).unwrap();

        // a is entered with counts 0, 1, 2, 3 at lengths 1, 3, 5, 7. Each rewind
        // to the start state empties the log and hub fires its next event. Past
        // the budget of one, hub keeps being accepted until e4 is tried too.
        assert_eq!(outcome, WalkOutcome::RewindLimit);
        assert_eq!(walk.rewinds(), 4);
        assert_eq!(walk.log().trace(), " -(4)-> ");
    }

    #[test]
    fn test_spent_budget_still_rewinds_to_untried_exit() {
        // x has events 1..=19 into a y <-> z cycle and event 20 into a long chain.
        let mut g = TransitionGraph::new("x");
        for id in 1..=19 {
            g.add_event("x", "y", &format!("tap_{id}"), EventRecord::new(id));
        }
        g.add_event("y", "z", "forward", EventRecord::new(21));
        g.add_event("z", "y", "back", EventRecord::new(22));
        g.add_event("x", "c0", "exit", EventRecord::new(20));
        for step in 0..60u64 {
            g.add_event(
                format!("c{step}"),
                format!("c{}", step + 1),
                "next",
                EventRecord::new(100 + step),
            );
        }
        let config = PolicyConfig::default();
        let mut history = SelectionHistory::new();

        let mut walk = Walk::new(&g, &config);
        let outcome = walk.run(30, &mut history).unwrap();

        assert_eq!(outcome, WalkOutcome::Done);
        assert_eq!(walk.rewinds(), 19);
        assert_eq!(walk.log().len(), 30);
        assert_eq!(walk.log().steps()[0].event.id, 20);
    }
}
