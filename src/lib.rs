pub mod app;
pub mod browser;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod models;

pub use error::{RecallError, Result};
pub use models::sm2::{compute_next_state, initialize};
pub use models::{Problem, Review, ReviewSession, ScheduleState, Tag};
