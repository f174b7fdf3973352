use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use log::warn;

use crate::error::RosterError;
use crate::schedule::{Player, Pool};

/// Parses a pool name from various string representations.
/// Blank means full session.
fn parse_pool(value: &str) -> Option<Pool> {
    match value.trim().to_lowercase().as_str() {
        "" | "full" | "a" | "full-time" | "full_session" => Some(Pool::FullSession),
        "early" | "b" | "early-exit" | "early_exit" => Some(Pool::EarlyExit),
        _ => None,
    }
}

/// Adds a player unless the name is blank or already taken.
/// The first occurrence of a name wins.
fn push_unique(players: &mut Vec<Player>, seen: &mut HashSet<String>, name: &str, pool: Pool) {
    let name = name.trim();
    if name.is_empty() {
        return;
    }
    if !seen.insert(name.to_string()) {
        warn!("Dropping duplicate player name '{}'", name);
        return;
    }
    players.push(Player {
        name: name.to_string(),
        pool,
    });
}

/// Loads a roster from a CSV file
///
/// The file needs a header row. The `name` column holds player names
/// (first column if no header matches); an optional `pool` column holds
/// `full`/`a` or `early`/`b`.
pub fn load_roster<P: AsRef<Path>>(csv_path: P) -> Result<Vec<Player>, RosterError> {
    let file = std::fs::File::open(csv_path)?;
    parse_roster(file)
}

/// Reads a roster from any CSV source, see [`load_roster`]
pub fn parse_roster<R: Read>(source: R) -> Result<Vec<Player>, RosterError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let name_col = headers
        .iter()
        .position(|h| h.to_lowercase().contains("name"))
        .unwrap_or(0);
    let pool_col = headers
        .iter()
        .position(|h| h.to_lowercase().contains("pool"));

    let mut players = Vec::new();
    let mut seen = HashSet::new();

    for result in reader.records() {
        let record = result?;
        let name = record.get(name_col).unwrap_or("");
        let pool_value = pool_col.and_then(|col| record.get(col)).unwrap_or("");

        let pool = parse_pool(pool_value).ok_or_else(|| RosterError::UnknownPool {
            line: record.position().map(|p| p.line()).unwrap_or(0),
            value: pool_value.to_string(),
        })?;

        push_unique(&mut players, &mut seen, name, pool);
    }

    Ok(players)
}

/// Builds a roster from two name lists. Full-session players come first.
pub fn roster_from_names<S: AsRef<str>>(full: &[S], early: &[S]) -> Vec<Player> {
    let mut players = Vec::new();
    let mut seen = HashSet::new();
    for name in full {
        push_unique(&mut players, &mut seen, name.as_ref(), Pool::FullSession);
    }
    for name in early {
        push_unique(&mut players, &mut seen, name.as_ref(), Pool::EarlyExit);
    }
    players
}

/// Builds a roster from two newline-separated name lists, as typed into a
/// text box
pub fn roster_from_lists(full_text: &str, early_text: &str) -> Vec<Player> {
    let full: Vec<&str> = full_text.lines().collect();
    let early: Vec<&str> = early_text.lines().collect();
    roster_from_names(&full, &early)
}
