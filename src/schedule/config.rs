use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use super::timing::parse_time;
use super::types::{Player, Pool};

/// Rounds in a three hour session
pub const FULL_SESSION_ROUNDS: u32 = 14;
/// Rounds in a two hour session
pub const SHORT_SESSION_ROUNDS: u32 = 9;
/// Last round the early-exit pool can be picked for
pub const DEFAULT_EXIT_ROUND: u32 = 9;

/// Eligibility limits applied by the constrained planner. A player is
/// eligible while their counter is strictly below the cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityCaps {
    pub early_max_games: u32,
    pub early_max_streak: u32,
    pub full_max_streak: u32,
}

impl Default for EligibilityCaps {
    fn default() -> Self {
        Self {
            early_max_games: 6,
            early_max_streak: 3,
            full_max_streak: 2,
        }
    }
}

/// Which planner drives the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Precomputed rotation for 6 to 8 players
    Fixed,
    /// Greedy selection with streak caps and history scoring
    Constrained,
    /// `Fixed` for a single pool of 6 to 8 players, `Constrained` otherwise
    #[default]
    Auto,
}

impl Strategy {
    /// Resolves `Auto` against the roster; other variants are returned as is.
    pub fn resolve(self, players: &[Player]) -> Strategy {
        match self {
            Strategy::Auto => {
                let all_full = players.iter().all(|p| p.pool == Pool::FullSession);
                if all_full && (6..=8).contains(&players.len()) {
                    Strategy::Fixed
                } else {
                    Strategy::Constrained
                }
            }
            other => other,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Fixed => write!(f, "fixed"),
            Strategy::Constrained => write!(f, "constrained"),
            Strategy::Auto => write!(f, "auto"),
        }
    }
}

impl FromStr for Strategy {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(Strategy::Fixed),
            "constrained" | "dynamic" => Ok(Strategy::Constrained),
            "auto" => Ok(Strategy::Auto),
            other => Err(ScheduleError::InvalidConfig(format!("unknown strategy '{}'", other))),
        }
    }
}

/// Settings for one scheduling run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub total_rounds: u32,
    /// Last round index at which early-exit players remain eligible
    pub exit_round: u32,
    pub caps: EligibilityCaps,
    /// Multiplier on repeat matchups when scoring a team split
    pub matchup_penalty_weight: u32,
    pub strategy: Strategy,
    /// Fixed seed for the candidate shuffle; entropy when absent
    pub seed: Option<u64>,
    /// Session start as "HH:MM"
    pub start_time: Option<String>,
    pub round_minutes: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            total_rounds: FULL_SESSION_ROUNDS,
            exit_round: DEFAULT_EXIT_ROUND,
            caps: EligibilityCaps::default(),
            matchup_penalty_weight: 5,
            strategy: Strategy::Auto,
            seed: None,
            start_time: None,
            round_minutes: 13,
        }
    }
}

impl SessionConfig {
    /// Preset for a session length in hours: 3 hours plays 14 rounds, anything
    /// shorter plays 9. The early pool leaves after round 9 either way.
    pub fn for_duration(hours: u32) -> Self {
        let total_rounds = if hours >= 3 {
            FULL_SESSION_ROUNDS
        } else {
            SHORT_SESSION_ROUNDS
        };
        Self {
            total_rounds,
            ..Self::default()
        }
    }

    /// True when some rounds run after the early pool has left
    pub fn has_post_exit_phase(&self) -> bool {
        self.total_rounds > self.exit_round
    }

    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.total_rounds == 0 {
            return Err(ScheduleError::InvalidConfig("total_rounds must be at least 1".to_string()));
        }
        if self.matchup_penalty_weight == 0 {
            return Err(ScheduleError::InvalidConfig(
                "matchup_penalty_weight must be at least 1".to_string(),
            ));
        }
        if self.round_minutes == 0 {
            return Err(ScheduleError::InvalidConfig("round_minutes must be at least 1".to_string()));
        }
        if let Some(start) = &self.start_time {
            if parse_time(start).is_none() {
                return Err(ScheduleError::InvalidConfig(format!(
                    "start_time '{}' is not HH:MM",
                    start
                )));
            }
        }
        Ok(())
    }
}
