#[cfg(test)]
pub(crate) mod eastern_time;
pub mod problem;
pub mod review;
pub mod review_session;
pub mod schedule;
pub mod sm2;
pub mod stats;

pub use problem::{Problem, Tag};
pub use review::Review;
pub use review_session::{GradeOutcome, ReviewSession};
pub use schedule::ScheduleState;
pub use stats::{ProblemStats, ReviewStats};
