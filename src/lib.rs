pub mod error;
pub mod schedule;
pub mod roster;
pub mod display;
pub mod export;
pub mod web;

pub use error::{RosterError, ScheduleError};
