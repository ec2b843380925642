use seedwalk_graph::StateId;

use super::interesting::InterestingStates;
use super::visits::VisitCounts;

/// Outcome of looking for a state to travel back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fitness {
    Found(StateId),
    /// No interesting state recorded, or all of them are stuck.
    NoEligibleState,
}

/// Pick the least-revisited interesting state that is not itself stuck.
///
/// Ties go to the state discovered first.
pub fn select_fittest_state(
    interesting: &InterestingStates,
    visits: &VisitCounts,
    max_revisits: u32,
) -> Fitness {
    let mut fittest: Option<(&StateId, u32)> = None;

    for state in interesting.iter() {
        if visits.is_stuck(state, max_revisits) {
            continue;
        }
        let count = visits.get(state).unwrap_or(0);
        match fittest {
            Some((_, best)) if count >= best => {}
            _ => fittest = Some((state, count)),
        }
    }

    match fittest {
        Some((state, _)) => Fitness::Found(state.clone()),
        None => Fitness::NoEligibleState,
    }
}
