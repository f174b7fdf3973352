use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use crate::schedule::ScheduleReport;

/// Writes one CSV row per round: Round, Start, Team 1, Team 2, Resting
pub fn export_rounds_csv<W: Write>(report: &ScheduleReport, writer: W) -> Result<(), csv::Error> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record(["Round", "Start", "Team 1", "Team 2", "Resting"])?;

    for round in &report.rounds {
        let start = report
            .start_times
            .as_ref()
            .and_then(|times| times.get(round.index as usize - 1))
            .cloned()
            .unwrap_or_default();

        wtr.write_record([
            round.index.to_string(),
            start,
            round.team1.to_string(),
            round.team2.to_string(),
            round.resting.join(", "),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes one CSV row per player, most games first
pub fn export_stats_csv<W: Write>(report: &ScheduleReport, writer: W) -> Result<(), csv::Error> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record(["Player", "Pool", "Games", "Longest Streak"])?;

    for stats in &report.stats {
        wtr.write_record([
            stats.name.clone(),
            stats.pool.to_string(),
            stats.games_played.to_string(),
            stats.longest_streak.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports rounds and totals to `<prefix>_rounds.csv` and `<prefix>_stats.csv`
pub fn export_report(report: &ScheduleReport, prefix: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let rounds_path = prefix.with_file_name(format!("{}_rounds.csv", file_stem(prefix)));
    let stats_path = prefix.with_file_name(format!("{}_stats.csv", file_stem(prefix)));

    export_rounds_csv(report, File::create(rounds_path)?)?;
    export_stats_csv(report, File::create(stats_path)?)?;
    Ok(())
}

fn file_stem(prefix: &Path) -> String {
    prefix
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "schedule".to_string())
}
