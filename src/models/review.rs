use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the append-only review log.
/// `interval` and `ease_factor` are the values right after the review.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub problem_id: i64,
    pub quality: i32,
    pub reviewed_at: DateTime<Utc>,
    pub notes: String,
    pub interval: i32,
    pub ease_factor: f64,
}
