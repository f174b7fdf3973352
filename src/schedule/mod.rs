pub mod types;
pub mod config;
pub mod timing;
pub mod history;
pub mod fixed;
pub mod greedy;
pub mod builder;

pub use types::{Player, PlayerState, PlayerStats, Pool, Round, ScheduleReport, StreakAlert, Team};
pub use config::{EligibilityCaps, SessionConfig, Strategy};
pub use history::{HistoryTracker, Matchup, SessionState, StreakTracker};
pub use fixed::FixedRotationPlanner;
pub use greedy::{CandidateOrder, ConstrainedGreedyPlanner};
pub use builder::{RoundPlanner, ScheduleBuilder};
