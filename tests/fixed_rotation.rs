use pretty_assertions::assert_eq;

use court_rotation::schedule::{Player, ScheduleBuilder, SessionConfig, Strategy, Team};
use court_rotation::ScheduleError;

fn players(names: &[&str]) -> Vec<Player> {
    names.iter().map(|n| Player::full(*n)).collect()
}

fn numbered(n: usize) -> Vec<Player> {
    (0..n).map(|i| Player::full(format!("P{}", i))).collect()
}

#[test]
fn eight_players_are_balanced_and_streak_free() {
    let report = ScheduleBuilder::new(SessionConfig::default())
        .build(&numbered(8))
        .unwrap();

    assert_eq!(report.strategy, Strategy::Fixed);
    assert_eq!(report.rounds.len(), 14);
    for stats in &report.stats {
        assert_eq!(stats.games_played, 7, "{}", stats.name);
        assert!(stats.longest_streak <= 2, "{}", stats.name);
    }
    assert!(report.streak_alerts.is_empty());
    assert!(report.status.contains("no player plays more than 2 games in a row"));
}

#[test]
fn eight_player_round_five_split() {
    let report = ScheduleBuilder::new(SessionConfig::default())
        .build(&numbered(8))
        .unwrap();

    let round = &report.rounds[4];
    assert_eq!(round.index, 5);
    assert_eq!(round.team1, Team::new("P0", "P4"));
    assert_eq!(round.team2, Team::new("P1", "P5"));
    assert_eq!(round.resting, vec!["P2", "P3", "P6", "P7"]);
}

#[test]
fn eight_player_slots_follow_input_order() {
    let names = ["Shin", "Rita", "Lana", "Zoe", "CT", "KG", "Janet", "Russ"];
    let report = ScheduleBuilder::new(SessionConfig::default())
        .build(&players(&names))
        .unwrap();

    // Slots 0 + 1 vs 2 + 3 in round 1; resting sorted by name
    assert_eq!(report.rounds[0].team1, Team::new("Shin", "Rita"));
    assert_eq!(report.rounds[0].team2, Team::new("Lana", "Zoe"));
    assert_eq!(report.rounds[0].resting, vec!["CT", "Janet", "KG", "Russ"]);
}

#[test]
fn small_pools_rotate_evenly() {
    for n in [6, 7] {
        let report = ScheduleBuilder::new(SessionConfig::default())
            .build(&numbered(n))
            .unwrap();
        assert_eq!(report.strategy, Strategy::Fixed);

        let games: Vec<u32> = report.stats.iter().map(|s| s.games_played).collect();
        let max = games.iter().max().unwrap();
        let min = games.iter().min().unwrap();
        assert!(max - min <= 1, "{} players: {:?}", n, games);
        assert_eq!(games.iter().sum::<u32>(), 56);

        for round in &report.rounds {
            assert_eq!(round.resting.len(), n - 4);
        }
    }
}

#[test]
fn fixed_strategy_rejects_other_sizes() {
    let config = SessionConfig {
        strategy: Strategy::Fixed,
        ..SessionConfig::default()
    };
    for n in [5, 9] {
        let err = ScheduleBuilder::new(config.clone()).build(&numbered(n)).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::UnsupportedPlayerCount {
                strategy: "fixed",
                expected: "6 to 8",
                count: n,
            }
        );
        assert!(err.is_configuration());
    }
}

#[test]
fn fixed_rotation_ignores_seed() {
    let a = ScheduleBuilder::new(SessionConfig { seed: Some(1), ..SessionConfig::default() })
        .build(&numbered(7))
        .unwrap();
    let b = ScheduleBuilder::new(SessionConfig { seed: Some(2), ..SessionConfig::default() })
        .build(&numbered(7))
        .unwrap();
    assert_eq!(a.rounds, b.rounds);
}
