use std::collections::HashSet;
use std::fs::File;
use std::io::Write;

use crate::schedule::{Round, ScheduleReport, Team};

/// Formats a team, marking players who are on a streak with `*`
pub fn format_team(team: &Team, flagged: &HashSet<&str>) -> String {
    let mark = |name: &str| {
        if flagged.contains(name) {
            format!("{}*", name)
        } else {
            name.to_string()
        }
    };
    format!("{} + {}", mark(&team.players[0]), mark(&team.players[1]))
}

/// One schedule line: round, optional start time, teams and resting players
pub fn format_round(report: &ScheduleReport, round: &Round) -> String {
    let flagged: HashSet<&str> = report
        .streak_alerts
        .iter()
        .filter(|a| a.round == round.index)
        .map(|a| a.player.as_str())
        .collect();

    let time = report
        .start_times
        .as_ref()
        .and_then(|times| times.get(round.index as usize - 1))
        .map(|t| format!(" {}", t))
        .unwrap_or_default();
    let resting = if round.resting.is_empty() {
        "-".to_string()
    } else {
        round.resting.join(", ")
    };

    format!(
        "Round {:>2}{} | {} vs {} | resting: {}{}",
        round.index,
        time,
        format_team(&round.team1, &flagged),
        format_team(&round.team2, &flagged),
        resting,
        if round.relaxed { " (relaxed)" } else { "" }
    )
}

/// Writes the schedule and totals to a plain text file
pub fn write_schedule_to_file(report: &ScheduleReport, filename: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(filename)?;

    writeln!(file, "** Court rotation ({}) **", report.strategy)?;
    writeln!(file, "{}", report.status)?;
    writeln!(file)?;
    for round in &report.rounds {
        writeln!(file, "{}", format_round(report, round))?;
    }
    writeln!(file)?;
    writeln!(file, "Total games played:")?;
    for stats in &report.stats {
        writeln!(file, "{} ({}) {}", stats.name, stats.pool, stats.games_played)?;
    }

    Ok(())
}

/// Prints the schedule in a readable format
pub fn print_schedule(report: &ScheduleReport) {
    println!("\n=== Court Rotation ({} rounds, {}) ===", report.rounds.len(), report.strategy);
    println!("{}", report.status);
    if !report.streak_alerts.is_empty() {
        println!("Players marked * are on their 3rd or later game in a row.");
    }

    println!();
    for round in &report.rounds {
        println!("  {}", format_round(report, round));
    }

    println!("\nTotal games played:");
    for stats in &report.stats {
        println!(
            "  - {} [{}]: {} games (longest streak {})",
            stats.name, stats.pool, stats.games_played, stats.longest_streak
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{CandidateOrder, Player, ScheduleBuilder, SessionConfig};

    #[test]
    fn streaking_players_are_marked() {
        let players: Vec<Player> = ["A", "B", "C", "D"].iter().map(|n| Player::full(*n)).collect();
        let config = SessionConfig {
            total_rounds: 3,
            exit_round: 0,
            start_time: Some("18:00".to_string()),
            ..SessionConfig::default()
        };
        let report = ScheduleBuilder::new(config)
            .build_with_order(&players, CandidateOrder::InputOrder)
            .unwrap();

        assert_eq!(
            format_round(&report, &report.rounds[0]),
            "Round  1 18:00 | A + B vs C + D | resting: -"
        );
        assert_eq!(
            format_round(&report, &report.rounds[2]),
            "Round  3 18:26 | A* + D* vs B* + C* | resting: - (relaxed)"
        );
    }
}
