//! Review session management.
//! Walks through a queue of problems once, grading each with the SM-2 scheduler.

use super::{Problem, Review, sm2};
use chrono::{DateTime, Utc};

/// What a graded problem turns into: the new problem state and its log entry.
#[derive(Clone, Debug)]
pub struct GradeOutcome {
    pub problem: Problem,
    pub review: Review,
}

/// Manages a single pass over the problems selected for review.
/// Problems that are skipped are left untouched.
pub struct ReviewSession {
    pub problems: Vec<Problem>,
    pub current_index: usize,
    pub graded: usize,
    pub skipped: usize,
}

impl ReviewSession {
    pub fn new(problems: Vec<Problem>) -> Self {
        Self {
            problems,
            current_index: 0,
            graded: 0,
            skipped: 0,
        }
    }

    pub fn current_problem(&self) -> Option<&Problem> {
        self.problems.get(self.current_index)
    }

    /// 1-based position of the current problem
    pub fn position(&self) -> usize {
        (self.current_index + 1).min(self.total_count())
    }

    pub fn total_count(&self) -> usize {
        self.problems.len()
    }

    pub fn is_completed(&self) -> bool {
        self.current_index >= self.problems.len()
    }

    /// Leaves the current problem unchanged and moves on.
    pub fn skip(&mut self) {
        if !self.is_completed() {
            self.skipped += 1;
            self.current_index += 1;
        }
    }

    /// Grades the current problem, stores the new schedule in the session and moves on.
    /// Quality outside 0-5 is clamped, and the clamped value is what gets logged.
    pub fn grade(&mut self, quality: i32, note: &str, now: DateTime<Utc>) -> Option<GradeOutcome> {
        let problem = self.problems.get_mut(self.current_index)?;

        let quality = sm2::clamp_quality(quality);
        problem.schedule = sm2::compute_next_state_at(problem.schedule, quality, now);

        let review = Review {
            id: 0,
            problem_id: problem.id,
            quality,
            reviewed_at: now,
            notes: note.trim().to_string(),
            interval: problem.schedule.interval,
            ease_factor: problem.schedule.ease_factor,
        };

        let outcome = GradeOutcome {
            problem: problem.clone(),
            review,
        };

        self.graded += 1;
        self.current_index += 1;
        Some(outcome)
    }

    pub fn progress_message(&self) -> String {
        match self.current_problem() {
            Some(problem) => format!(
                "Reviewing [{}/{}]: {}",
                self.position(),
                self.total_count(),
                problem.name
            ),
            None => format!(
                "Review session complete: {} graded, {} skipped",
                self.graded, self.skipped
            ),
        }
    }
}
