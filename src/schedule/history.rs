use std::collections::HashMap;

use super::types::{PlayerState, Round, Team};

/// Two opposing teams, stored in sorted order so that "A vs B" and
/// "B vs A" are the same key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Matchup([Team; 2]);

impl Matchup {
    pub fn new(a: Team, b: Team) -> Self {
        if a <= b {
            Matchup([a, b])
        } else {
            Matchup([b, a])
        }
    }
}

/// Partner and matchup counters for one run
#[derive(Debug, Clone, Default)]
pub struct HistoryTracker {
    pairs: HashMap<Team, u32>,
    matchups: HashMap<Matchup, u32>,
}

impl HistoryTracker {
    /// Starts every possible pair of `names` at zero. Matchups are created
    /// lazily on first use.
    pub fn new(names: &[&str]) -> Self {
        let mut pairs = HashMap::new();
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                pairs.insert(Team::new(*a, *b), 0);
            }
        }
        Self {
            pairs,
            matchups: HashMap::new(),
        }
    }

    /// Times these two players have been teammates
    pub fn pair_count(&self, team: &Team) -> u32 {
        self.pairs.get(team).copied().unwrap_or(0)
    }

    /// Times these two teams have faced each other
    pub fn matchup_count(&self, matchup: &Matchup) -> u32 {
        self.matchups.get(matchup).copied().unwrap_or(0)
    }

    /// Counts one round of `team1` against `team2`
    pub fn record(&mut self, team1: &Team, team2: &Team) {
        *self.pairs.entry(team1.clone()).or_insert(0) += 1;
        *self.pairs.entry(team2.clone()).or_insert(0) += 1;
        *self
            .matchups
            .entry(Matchup::new(team1.clone(), team2.clone()))
            .or_insert(0) += 1;
    }

    /// Number of pairs tracked, realised or not
    pub fn tracked_pairs(&self) -> usize {
        self.pairs.len()
    }

    /// Sum of all partner counts
    pub fn total_pairings(&self) -> u32 {
        self.pairs.values().sum()
    }

    /// Sum of all matchup counts
    pub fn total_matchups(&self) -> u32 {
        self.matchups.values().sum()
    }
}

/// Games played and current streak per player
#[derive(Debug, Clone, Default)]
pub struct StreakTracker {
    states: HashMap<String, PlayerState>,
}

impl StreakTracker {
    pub fn new(names: &[&str]) -> Self {
        Self {
            states: names
                .iter()
                .map(|n| (n.to_string(), PlayerState::default()))
                .collect(),
        }
    }

    /// Counters for `name`; zero for a player never seen
    pub fn get(&self, name: &str) -> PlayerState {
        self.states.get(name).copied().unwrap_or_default()
    }

    pub fn record_played(&mut self, name: &str) {
        self.states.entry(name.to_string()).or_default().record_played();
    }

    pub fn record_rested(&mut self, name: &str) {
        self.states.entry(name.to_string()).or_default().record_rested();
    }
}

/// All mutable state of one scheduling run
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub streaks: StreakTracker,
    pub history: HistoryTracker,
}

impl SessionState {
    pub fn new(names: &[&str]) -> Self {
        Self {
            streaks: StreakTracker::new(names),
            history: HistoryTracker::new(names),
        }
    }

    /// Applies a finished round: bumps the chosen pairs and matchup, then
    /// advances everyone on court and resets the streak of everyone resting.
    /// Players absent from the round (gone after their exit round) are left
    /// untouched.
    pub fn record_round(&mut self, round: &Round) {
        self.history.record(&round.team1, &round.team2);
        for name in round.playing() {
            self.streaks.record_played(name);
        }
        for name in &round.resting {
            self.streaks.record_rested(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(index: u32, t1: (&str, &str), t2: (&str, &str), resting: &[&str]) -> Round {
        Round {
            index,
            team1: Team::new(t1.0, t1.1),
            team2: Team::new(t2.0, t2.1),
            resting: resting.iter().map(|s| s.to_string()).collect(),
            relaxed: false,
        }
    }

    #[test]
    fn every_pair_starts_at_zero() {
        let history = HistoryTracker::new(&["A", "B", "C", "D", "E"]);
        assert_eq!(history.tracked_pairs(), 10);
        assert_eq!(history.total_pairings(), 0);
        assert_eq!(history.pair_count(&Team::new("E", "A")), 0);
    }

    #[test]
    fn matchup_ignores_side() {
        let ab = Team::new("A", "B");
        let cd = Team::new("C", "D");
        assert_eq!(Matchup::new(ab.clone(), cd.clone()), Matchup::new(cd.clone(), ab.clone()));

        let mut history = HistoryTracker::new(&["A", "B", "C", "D"]);
        history.record(&cd, &ab);
        assert_eq!(history.matchup_count(&Matchup::new(ab.clone(), cd.clone())), 1);
        assert_eq!(history.pair_count(&Team::new("B", "A")), 1);
        assert_eq!(history.pair_count(&Team::new("A", "C")), 0);
    }

    #[test]
    fn each_round_adds_two_pairings_and_one_matchup() {
        let mut state = SessionState::new(&["A", "B", "C", "D", "E"]);
        state.record_round(&round(1, ("A", "B"), ("C", "D"), &["E"]));
        state.record_round(&round(2, ("A", "B"), ("C", "E"), &["D"]));
        assert_eq!(state.history.total_pairings(), 4);
        assert_eq!(state.history.total_matchups(), 2);
        assert_eq!(state.history.pair_count(&Team::new("A", "B")), 2);
    }

    #[test]
    fn resting_breaks_streak() {
        let mut state = SessionState::new(&["A", "B", "C", "D", "E"]);
        state.record_round(&round(1, ("A", "B"), ("C", "D"), &["E"]));
        state.record_round(&round(2, ("A", "B"), ("C", "E"), &["D"]));

        assert_eq!(state.streaks.get("A"), PlayerState { games_played: 2, consecutive_games: 2 });
        assert_eq!(state.streaks.get("D"), PlayerState { games_played: 1, consecutive_games: 0 });
        assert_eq!(state.streaks.get("E"), PlayerState { games_played: 1, consecutive_games: 1 });
        assert_eq!(state.streaks.get("nobody"), PlayerState::default());
    }
}
