//! Aggregates shown by the `stats` and `overview` commands.
use super::Problem;
use chrono::{DateTime, Utc};

/// Interval (days) below which a problem still counts as being learned
pub const LEARNING_INTERVAL: i32 = 7;
/// Interval (days) above which a problem counts as mastered
pub const MASTERED_INTERVAL: i32 = 30;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProblemStats {
    pub total: usize,
    pub due: usize,
    pub learning: usize,
    pub mastered: usize,
    pub in_progress: usize,
}

impl ProblemStats {
    pub fn from_problems(problems: &[Problem], now: DateTime<Utc>) -> Self {
        let mut stats = Self {
            total: problems.len(),
            ..Self::default()
        };

        for problem in problems {
            if problem.schedule.is_due(now) {
                stats.due += 1;
            }
            if problem.schedule.interval > MASTERED_INTERVAL {
                stats.mastered += 1;
            } else if problem.schedule.interval < LEARNING_INTERVAL {
                stats.learning += 1;
            } else {
                stats.in_progress += 1;
            }
        }

        stats
    }
}

/// Review history summary. `count_by_difficulty[0]` holds difficulty 1.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReviewStats {
    pub total_reviews: usize,
    pub reviews_last_7_days: usize,
    pub average_quality: f64,
    pub count_by_difficulty: [usize; 5],
}
