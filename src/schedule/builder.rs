use std::collections::{HashMap, HashSet};

use log::{debug, info};

use crate::error::ScheduleError;
use super::config::{SessionConfig, Strategy};
use super::fixed::FixedRotationPlanner;
use super::greedy::{CandidateOrder, ConstrainedGreedyPlanner};
use super::history::SessionState;
use super::timing::round_start_times;
use super::types::{Player, PlayerStats, Pool, Round, ScheduleReport, StreakAlert};

/// Consecutive games at which a player is flagged in the report
pub const STREAK_ALERT_LENGTH: u32 = 3;

/// Produces one round at a time from the state left by the previous rounds
pub trait RoundPlanner {
    fn plan_round(&mut self, index: u32, state: &SessionState) -> Result<Round, ScheduleError>;
}

/// Runs a planner over a whole session and assembles the report
pub struct ScheduleBuilder {
    config: SessionConfig,
}

impl ScheduleBuilder {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    /// Builds a schedule, shuffling ties with the configured seed (or
    /// entropy when no seed is set)
    pub fn build(&self, players: &[Player]) -> Result<ScheduleReport, ScheduleError> {
        let order = match self.config.seed {
            Some(seed) => CandidateOrder::seeded(seed),
            None => CandidateOrder::from_entropy(),
        };
        self.build_with_order(players, order)
    }

    /// Builds a schedule with an explicit tie-break order for the
    /// constrained planner. The fixed planner ignores `order`.
    pub fn build_with_order(
        &self,
        players: &[Player],
        order: CandidateOrder,
    ) -> Result<ScheduleReport, ScheduleError> {
        self.config.validate()?;
        validate_roster(players)?;

        let strategy = self.config.strategy.resolve(players);
        let full: Vec<String> = names_in(players, Pool::FullSession);
        let early: Vec<String> = names_in(players, Pool::EarlyExit);
        info!(
            "Building {} schedule: {} rounds, {} full-session and {} early-exit players",
            strategy,
            self.config.total_rounds,
            full.len(),
            early.len()
        );

        let (rounds, status) = match strategy {
            Strategy::Fixed => {
                if !early.is_empty() {
                    return Err(ScheduleError::InvalidConfig(
                        "the fixed rotation does not support early-exit players".to_string(),
                    ));
                }
                let mut planner = FixedRotationPlanner::new(&full, self.config.total_rounds)?;
                let rounds = self.run(&mut planner, players)?;
                let status = fixed_status(&planner, &rounds, players);
                (rounds, status)
            }
            _ => {
                let mut planner = ConstrainedGreedyPlanner::new(full, early, &self.config, order)?;
                let rounds = self.run(&mut planner, players)?;
                let status = constrained_status(&rounds);
                (rounds, status)
            }
        };

        Ok(self.assemble(strategy, players, rounds, status))
    }

    /// Drives `planner` through every round, recording each one before the
    /// next is planned
    pub fn run<P: RoundPlanner>(
        &self,
        planner: &mut P,
        players: &[Player],
    ) -> Result<Vec<Round>, ScheduleError> {
        let names: Vec<&str> = players.iter().map(|p| p.name.as_str()).collect();
        let mut state = SessionState::new(&names);
        let mut rounds = Vec::with_capacity(self.config.total_rounds as usize);

        for index in 1..=self.config.total_rounds {
            let round = planner.plan_round(index, &state)?;
            debug!("Round {}: {} vs {}, resting {:?}", index, round.team1, round.team2, round.resting);
            state.record_round(&round);
            rounds.push(round);
        }

        Ok(rounds)
    }

    fn assemble(
        &self,
        strategy: Strategy,
        players: &[Player],
        rounds: Vec<Round>,
        status: String,
    ) -> ScheduleReport {
        let (streak_alerts, longest) = find_streaks(&rounds, players);

        let mut stats: Vec<PlayerStats> = players
            .iter()
            .map(|p| PlayerStats {
                name: p.name.clone(),
                pool: p.pool,
                games_played: rounds.iter().filter(|r| r.is_playing(&p.name)).count() as u32,
                longest_streak: longest.get(p.name.as_str()).copied().unwrap_or(0),
            })
            .collect();
        stats.sort_by(|a, b| b.games_played.cmp(&a.games_played).then_with(|| a.name.cmp(&b.name)));

        let start_times = self
            .config
            .start_time
            .as_deref()
            .and_then(|start| round_start_times(start, self.config.round_minutes, rounds.len() as u32));

        ScheduleReport {
            strategy,
            rounds,
            stats,
            streak_alerts,
            start_times,
            status,
        }
    }
}

/// Rejects blank and duplicate names and rosters too small for a court
pub fn validate_roster(players: &[Player]) -> Result<(), ScheduleError> {
    let mut seen = HashSet::new();
    for player in players {
        if player.name.trim().is_empty() {
            return Err(ScheduleError::EmptyPlayerName);
        }
        if !seen.insert(player.name.as_str()) {
            return Err(ScheduleError::DuplicatePlayer(player.name.clone()));
        }
    }
    if players.len() < 4 {
        return Err(ScheduleError::NotEnoughPlayers { count: players.len() });
    }
    Ok(())
}

fn names_in(players: &[Player], pool: Pool) -> Vec<String> {
    players
        .iter()
        .filter(|p| p.pool == pool)
        .map(|p| p.name.clone())
        .collect()
}

/// Every (round, player) where the player's run of consecutive games
/// reaches `STREAK_ALERT_LENGTH`, plus each player's longest run
pub fn find_streaks<'a>(rounds: &[Round], players: &'a [Player]) -> (Vec<StreakAlert>, HashMap<&'a str, u32>) {
    let mut alerts = Vec::new();
    let mut longest = HashMap::new();

    for player in players {
        let mut streak = 0;
        let mut best = 0;
        for round in rounds {
            if round.is_playing(&player.name) {
                streak += 1;
                best = best.max(streak);
                if streak >= STREAK_ALERT_LENGTH {
                    alerts.push(StreakAlert {
                        round: round.index,
                        player: player.name.clone(),
                        streak,
                    });
                }
            } else {
                streak = 0;
            }
        }
        longest.insert(player.name.as_str(), best);
    }

    alerts.sort_by(|a, b| a.round.cmp(&b.round).then_with(|| a.player.cmp(&b.player)));
    (alerts, longest)
}

fn fixed_status(planner: &FixedRotationPlanner, rounds: &[Round], players: &[Player]) -> String {
    if planner.is_streak_free() {
        return "This rotation is balanced and guarantees no player plays more than 2 games in a row.".to_string();
    }
    let (alerts, _) = find_streaks(rounds, players);
    if alerts.is_empty() {
        format!("{} rounds scheduled with no streaks of 3 or more games.", rounds.len())
    } else {
        format!(
            "{} unavoidable streak entries (3+ consecutive games) are highlighted. \
             They are required to fill the court over {} rounds with fewer than 8 players.",
            alerts.len(),
            rounds.len()
        )
    }
}

fn constrained_status(rounds: &[Round]) -> String {
    let relaxed = rounds.iter().filter(|r| r.relaxed).count();
    if relaxed == 0 {
        format!("{} rounds scheduled within the streak and game limits.", rounds.len())
    } else {
        format!(
            "{} rounds scheduled; {} needed the fallback ordering because the limits left fewer than 4 eligible players.",
            rounds.len(),
            relaxed
        )
    }
}
