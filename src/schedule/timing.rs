use chrono::{Duration, NaiveTime};

/// Parses a time string (HH:MM)
pub fn parse_time(time_str: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(time_str.trim(), "%H:%M").ok()
}

/// Formats a time as HH:MM
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Start time of every round, one per round in order.
/// Round 1 = start, each later round = previous + round_minutes.
/// Times wrap past midnight.
pub fn round_start_times(start_time: &str, round_minutes: u32, rounds: u32) -> Option<Vec<String>> {
    let start = parse_time(start_time)?;
    let step = Duration::minutes(i64::from(round_minutes));

    let mut times = Vec::with_capacity(rounds as usize);
    let mut current = start;
    for _ in 0..rounds {
        times.push(format_time(current));
        // NaiveTime addition wraps around midnight
        current = current + step;
    }
    Some(times)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_are_spaced_by_round_length() {
        let times = round_start_times("18:00", 13, 4).unwrap();
        assert_eq!(times, vec!["18:00", "18:13", "18:26", "18:39"]);
    }

    #[test]
    fn wraps_past_midnight() {
        let times = round_start_times("23:40", 15, 3).unwrap();
        assert_eq!(times, vec!["23:40", "23:55", "00:10"]);
    }

    #[test]
    fn rejects_malformed_start() {
        assert!(round_start_times("7pm", 13, 3).is_none());
        assert!(parse_time("24:00").is_none());
        assert_eq!(parse_time(" 09:05 ").map(format_time).as_deref(), Some("09:05"));
    }
}
