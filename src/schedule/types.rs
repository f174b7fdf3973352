use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::Strategy;

/// Which part of the session a player is available for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pool {
    /// Stays for every round
    FullSession,
    /// Leaves after the exit round
    EarlyExit,
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pool::FullSession => write!(f, "full"),
            Pool::EarlyExit => write!(f, "early"),
        }
    }
}

/// A named player and the pool they signed up for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub pool: Pool,
}

impl Player {
    pub fn full(name: impl Into<String>) -> Self {
        Self { name: name.into(), pool: Pool::FullSession }
    }

    pub fn early(name: impl Into<String>) -> Self {
        Self { name: name.into(), pool: Pool::EarlyExit }
    }
}

/// Per-player counters for one scheduling run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub games_played: u32,
    pub consecutive_games: u32,
}

impl PlayerState {
    pub fn record_played(&mut self) {
        self.games_played += 1;
        self.consecutive_games += 1;
    }

    pub fn record_rested(&mut self) {
        self.consecutive_games = 0;
    }
}

/// Two teammates. Members are kept sorted by name, so a team doubles as
/// the unordered pair key in the partner history.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Team {
    pub players: [String; 2],
}

impl Team {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        let players = if a <= b { [a, b] } else { [b, a] };
        Self { players }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.players.iter().any(|p| p == name)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}", self.players[0], self.players[1])
    }
}

/// One round on the court
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based round number
    pub index: u32,
    pub team1: Team,
    pub team2: Team,
    /// Every available player not on court this round
    pub resting: Vec<String>,
    /// Set when the eligibility rules could not fill the court and the
    /// fallback ordering was used instead
    pub relaxed: bool,
}

impl Round {
    /// The four players on court, team 1 first
    pub fn playing(&self) -> impl Iterator<Item = &str> {
        self.team1
            .players
            .iter()
            .chain(self.team2.players.iter())
            .map(String::as_str)
    }

    pub fn is_playing(&self, name: &str) -> bool {
        self.team1.contains(name) || self.team2.contains(name)
    }
}

/// Final totals for one player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub name: String,
    pub pool: Pool,
    pub games_played: u32,
    pub longest_streak: u32,
}

/// A player on court for the `streak`-th round in a row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakAlert {
    pub round: u32,
    pub player: String,
    pub streak: u32,
}

/// Everything the presentation layer needs for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub strategy: Strategy,
    pub rounds: Vec<Round>,
    /// Sorted by games played, most first
    pub stats: Vec<PlayerStats>,
    pub streak_alerts: Vec<StreakAlert>,
    /// Start time of each round, when a session start was configured
    pub start_times: Option<Vec<String>>,
    pub status: String,
}

impl ScheduleReport {
    pub fn games_played(&self, name: &str) -> Option<u32> {
        self.stats
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.games_played)
    }

    pub fn relaxed_rounds(&self) -> usize {
        self.rounds.iter().filter(|r| r.relaxed).count()
    }
}
