use thiserror::Error;

/// Errors raised while validating a session or generating its rounds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("{strategy} rotation supports {expected} players, got {count}")]
    UnsupportedPlayerCount {
        strategy: &'static str,
        expected: &'static str,
        count: usize,
    },

    #[error("Need at least 4 full-session players, got {count}")]
    NotEnoughFullPlayers { count: usize },

    #[error("Need at least 4 players in total, got {count}")]
    NotEnoughPlayers { count: usize },

    #[error("Duplicate player name: {0}")]
    DuplicatePlayer(String),

    #[error("Player names must not be empty")]
    EmptyPlayerName,

    #[error("Invalid session configuration: {0}")]
    InvalidConfig(String),

    #[error("Round {round}: only {available} players available, 4 are required")]
    Starved { round: u32, available: usize },
}

impl ScheduleError {
    /// True for errors caught before the first round is generated.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, ScheduleError::Starved { .. })
    }
}

/// Errors raised while reading a roster file.
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Line {line}: unknown pool '{value}'")]
    UnknownPool { line: u64, value: String },
}
