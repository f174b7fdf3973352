use std::collections::VecDeque;

use log::debug;

use crate::error::ScheduleError;
use super::builder::RoundPlanner;
use super::history::SessionState;
use super::types::{Round, Team};

/// Rounds covered by the eight player table
pub const FIXED_ROUNDS: u32 = 14;

/// Slot indices per round: (slot0 + slot1) vs (slot2 + slot3).
/// Every slot plays exactly 7 rounds and never 3 in a row.
const EIGHT_PLAYER_TABLE: [[usize; 4]; FIXED_ROUNDS as usize] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [0, 2, 4, 6],
    [1, 3, 5, 7],
    [0, 4, 1, 5],
    [2, 6, 3, 7],
    [0, 3, 1, 7],
    [2, 6, 4, 5],
    [0, 7, 2, 1],
    [3, 4, 5, 6],
    [0, 5, 3, 6],
    [1, 7, 4, 2],
    [0, 6, 1, 4],
    [3, 5, 2, 7],
];

#[derive(Debug, Clone)]
enum Rotation {
    /// Eight players mapped to table slots in input order
    Table { slots: Vec<String> },
    /// Six or seven players; the front four play, then move to the back
    Queue { queue: VecDeque<String> },
}

/// Deterministic rotation for a single pool of 6, 7 or 8 players
#[derive(Debug, Clone)]
pub struct FixedRotationPlanner {
    rotation: Rotation,
}

impl FixedRotationPlanner {
    pub fn new(players: &[String], total_rounds: u32) -> Result<Self, ScheduleError> {
        let rotation = match players.len() {
            8 => {
                if total_rounds > FIXED_ROUNDS {
                    return Err(ScheduleError::InvalidConfig(format!(
                        "the eight player rotation covers at most {} rounds, {} requested",
                        FIXED_ROUNDS, total_rounds
                    )));
                }
                Rotation::Table { slots: players.to_vec() }
            }
            6 | 7 => Rotation::Queue {
                queue: players.iter().cloned().collect(),
            },
            count => {
                return Err(ScheduleError::UnsupportedPlayerCount {
                    strategy: "fixed",
                    expected: "6 to 8",
                    count,
                })
            }
        };
        Ok(Self { rotation })
    }

    /// True when the rotation guarantees nobody plays more than 2 rounds in a row
    pub fn is_streak_free(&self) -> bool {
        matches!(self.rotation, Rotation::Table { .. })
    }
}

impl RoundPlanner for FixedRotationPlanner {
    fn plan_round(&mut self, index: u32, _state: &SessionState) -> Result<Round, ScheduleError> {
        match &mut self.rotation {
            Rotation::Table { slots } => {
                let row = index
                    .checked_sub(1)
                    .and_then(|i| EIGHT_PLAYER_TABLE.get(i as usize))
                    .ok_or_else(|| {
                        ScheduleError::InvalidConfig(format!("round {} is outside the fixed table", index))
                    })?;

                let mut resting: Vec<String> = slots
                    .iter()
                    .enumerate()
                    .filter(|(slot, _)| !row.contains(slot))
                    .map(|(_, name)| name.clone())
                    .collect();
                resting.sort();

                Ok(Round {
                    index,
                    team1: Team::new(slots[row[0]].as_str(), slots[row[1]].as_str()),
                    team2: Team::new(slots[row[2]].as_str(), slots[row[3]].as_str()),
                    resting,
                    relaxed: false,
                })
            }
            Rotation::Queue { queue } => {
                let playing: Vec<String> = queue.iter().take(4).cloned().collect();
                let resting: Vec<String> = queue.iter().skip(4).cloned().collect();
                debug!("Round {}: rotating {:?} to the back of the queue", index, playing);

                // Players who just played go to the back to rest
                queue.rotate_left(4);

                Ok(Round {
                    index,
                    team1: Team::new(playing[0].as_str(), playing[1].as_str()),
                    team2: Team::new(playing[2].as_str(), playing[3].as_str()),
                    resting,
                    relaxed: false,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("P{}", i)).collect()
    }

    fn run(planner: &mut FixedRotationPlanner, players: &[String], rounds: u32) -> Vec<Round> {
        let refs: Vec<&str> = players.iter().map(String::as_str).collect();
        let mut state = SessionState::new(&refs);
        (1..=rounds)
            .map(|i| {
                let round = planner.plan_round(i, &state).unwrap();
                state.record_round(&round);
                round
            })
            .collect()
    }

    #[test]
    fn rejects_unsupported_sizes() {
        for n in [4, 5, 9] {
            assert!(matches!(
                FixedRotationPlanner::new(&names(n), 14),
                Err(ScheduleError::UnsupportedPlayerCount { count, .. }) if count == n
            ));
        }
        assert!(FixedRotationPlanner::new(&names(8), 15).is_err());
    }

    #[test]
    fn table_slots_are_balanced_and_streak_free() {
        let mut counts = [0u32; 8];
        let mut streaks = [0u32; 8];
        for row in EIGHT_PLAYER_TABLE.iter() {
            for slot in 0..8 {
                if row.contains(&slot) {
                    counts[slot] += 1;
                    streaks[slot] += 1;
                    assert!(streaks[slot] <= 2, "slot {} plays 3 in a row", slot);
                } else {
                    streaks[slot] = 0;
                }
            }
        }
        assert_eq!(counts, [7; 8]);
    }

    #[test]
    fn eight_player_round_five() {
        let players = names(8);
        let mut planner = FixedRotationPlanner::new(&players, 14).unwrap();
        assert!(planner.is_streak_free());
        let rounds = run(&mut planner, &players, 14);

        let fifth = &rounds[4];
        assert_eq!(fifth.index, 5);
        assert_eq!(fifth.team1, Team::new("P0", "P4"));
        assert_eq!(fifth.team2, Team::new("P1", "P5"));
        assert_eq!(fifth.resting, vec!["P2", "P3", "P6", "P7"]);
    }

    #[test]
    fn queue_rotates_in_fifo_order() {
        let players = names(6);
        let mut planner = FixedRotationPlanner::new(&players, 14).unwrap();
        assert!(!planner.is_streak_free());
        let rounds = run(&mut planner, &players, 3);

        assert_eq!(rounds[0].team1, Team::new("P0", "P1"));
        assert_eq!(rounds[0].team2, Team::new("P2", "P3"));
        assert_eq!(rounds[0].resting, vec!["P4", "P5"]);

        assert_eq!(rounds[1].team1, Team::new("P4", "P5"));
        assert_eq!(rounds[1].team2, Team::new("P0", "P1"));
        assert_eq!(rounds[1].resting, vec!["P2", "P3"]);

        assert_eq!(rounds[2].team1, Team::new("P2", "P3"));
        assert_eq!(rounds[2].team2, Team::new("P4", "P5"));
    }

    #[test]
    fn queue_spreads_games_within_one() {
        for n in [6, 7] {
            let players = names(n);
            let mut planner = FixedRotationPlanner::new(&players, 14).unwrap();
            let rounds = run(&mut planner, &players, 14);
            let counts: Vec<usize> = players
                .iter()
                .map(|p| rounds.iter().filter(|r| r.is_playing(p)).count())
                .collect();
            let max = counts.iter().max().unwrap();
            let min = counts.iter().min().unwrap();
            assert!(max - min <= 1, "{} players: {:?}", n, counts);
        }
    }
}
