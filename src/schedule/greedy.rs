use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::ScheduleError;
use super::builder::RoundPlanner;
use super::config::{EligibilityCaps, SessionConfig};
use super::history::{HistoryTracker, Matchup, SessionState};
use super::types::{Round, Team};

/// The three ways to split four players into two teams, as index
/// quadruples (a + b) vs (c + d). Ties go to the earliest entry.
const SPLITS: [[usize; 4]; 3] = [[0, 1, 2, 3], [0, 2, 1, 3], [0, 3, 1, 2]];

/// How candidates with equal games played are ordered before selection
#[derive(Debug, Clone)]
pub enum CandidateOrder {
    /// Each pool is shuffled every round
    Shuffled(StdRng),
    /// Each pool keeps its input order
    InputOrder,
}

impl CandidateOrder {
    pub fn seeded(seed: u64) -> Self {
        CandidateOrder::Shuffled(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        CandidateOrder::Shuffled(StdRng::from_entropy())
    }

    fn arrange(&mut self, names: &[String]) -> Vec<String> {
        let mut arranged = names.to_vec();
        if let CandidateOrder::Shuffled(rng) = self {
            arranged.shuffle(rng);
        }
        arranged
    }
}

/// Greedy round-by-round selection for a full-session pool and an
/// early-exit pool
#[derive(Debug, Clone)]
pub struct ConstrainedGreedyPlanner {
    full: Vec<String>,
    early: Vec<String>,
    exit_round: u32,
    caps: EligibilityCaps,
    matchup_penalty_weight: u32,
    order: CandidateOrder,
}

impl ConstrainedGreedyPlanner {
    pub fn new(
        full: Vec<String>,
        early: Vec<String>,
        config: &SessionConfig,
        order: CandidateOrder,
    ) -> Result<Self, ScheduleError> {
        if full.len() + early.len() < 4 {
            return Err(ScheduleError::NotEnoughPlayers {
                count: full.len() + early.len(),
            });
        }
        if config.has_post_exit_phase() && full.len() < 4 {
            return Err(ScheduleError::NotEnoughFullPlayers { count: full.len() });
        }

        Ok(Self {
            full,
            early,
            exit_round: config.exit_round,
            caps: config.caps,
            matchup_penalty_weight: config.matchup_penalty_weight,
            order,
        })
    }

    /// Players still at the venue for round `index`, early pool first
    fn available(&self, index: u32) -> Vec<String> {
        if index <= self.exit_round {
            self.early.iter().chain(self.full.iter()).cloned().collect()
        } else {
            self.full.clone()
        }
    }

    /// Candidates for round `index` in selection order, and whether the
    /// eligibility rules had to be dropped to find four
    fn candidates(&mut self, index: u32, state: &SessionState) -> (Vec<String>, bool) {
        let caps = self.caps;
        let full = self.order.arrange(&self.full);
        let early = if index <= self.exit_round {
            self.order.arrange(&self.early)
        } else {
            Vec::new()
        };

        let early_ok = |name: &String| {
            let s = state.streaks.get(name);
            s.games_played < caps.early_max_games && s.consecutive_games < caps.early_max_streak
        };
        let full_ok = |name: &String| state.streaks.get(name).consecutive_games < caps.full_max_streak;

        let mut candidates: Vec<String> = early
            .iter()
            .filter(|n| early_ok(n))
            .chain(full.iter().filter(|n| full_ok(n)))
            .cloned()
            .collect();

        let mut relaxed = false;
        if candidates.len() < 4 {
            warn!(
                "Round {}: only {} eligible players, falling back to least-rested ordering",
                index,
                candidates.len()
            );
            relaxed = true;
            candidates = early.into_iter().chain(full).collect();
            candidates.sort_by_key(|name| {
                let s = state.streaks.get(name);
                (s.consecutive_games, s.games_played)
            });
        }

        // Stable, so the shuffle (or fallback order) decides ties
        candidates.sort_by_key(|name| state.streaks.get(name).games_played);
        (candidates, relaxed)
    }

    fn split_score(&self, team1: &Team, team2: &Team, history: &HistoryTracker) -> u32 {
        let matchup = Matchup::new(team1.clone(), team2.clone());
        history.pair_count(team1)
            + history.pair_count(team2)
            + self.matchup_penalty_weight * history.matchup_count(&matchup)
    }

    /// Picks the lowest scoring of the three team splits
    fn best_split(&self, index: u32, playing: &[String], history: &HistoryTracker) -> (Team, Team) {
        let mut best: Option<(u32, Team, Team)> = None;
        for split in SPLITS.iter() {
            let team1 = Team::new(playing[split[0]].as_str(), playing[split[1]].as_str());
            let team2 = Team::new(playing[split[2]].as_str(), playing[split[3]].as_str());
            let score = self.split_score(&team1, &team2, history);
            debug!("Round {}: {} vs {} scores {}", index, team1, team2, score);

            let better = match &best {
                Some((best_score, _, _)) => score < *best_score,
                None => true,
            };
            if better {
                best = Some((score, team1, team2));
            }
        }

        match best {
            Some((_, team1, team2)) => (team1, team2),
            // SPLITS is never empty
            None => (
                Team::new(playing[0].as_str(), playing[1].as_str()),
                Team::new(playing[2].as_str(), playing[3].as_str()),
            ),
        }
    }
}

impl RoundPlanner for ConstrainedGreedyPlanner {
    fn plan_round(&mut self, index: u32, state: &SessionState) -> Result<Round, ScheduleError> {
        let (candidates, relaxed) = self.candidates(index, state);
        if candidates.len() < 4 {
            return Err(ScheduleError::Starved {
                round: index,
                available: candidates.len(),
            });
        }

        let playing = &candidates[..4];
        let (team1, team2) = self.best_split(index, playing, &state.history);
        debug!("Round {}: {} vs {}{}", index, team1, team2, if relaxed { " (relaxed)" } else { "" });

        let resting = self
            .available(index)
            .into_iter()
            .filter(|name| !playing.contains(name))
            .collect();

        Ok(Round {
            index,
            team1,
            team2,
            resting,
            relaxed,
        })
    }
}
