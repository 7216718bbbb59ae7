//! SM-2 (SuperMemo 2) spaced repetition algorithm implementation.
//!
//! The SM-2 algorithm calculates review intervals based on recall quality:
//! - Each problem has an ease factor (EF) that adjusts after every review
//! - Quality grades 0-2: interval resets to 1 day, EF still moves
//! - Quality grades 3-5: interval grows (1 day → 6 days → EF multiplier)
//! - EF has a minimum value of 1.3
//!
//! Both operations are pure. The `_at` variants take the clock reading
//! explicitly; the plain variants read the system clock. Intervals count
//! local calendar days, and the `_in` variants take the time zone too.

use super::ScheduleState;
use super::schedule::add_calendar_days;
use chrono::{DateTime, Local, TimeZone, Utc};

pub const INITIAL_INTERVAL: i32 = 1;
pub const INITIAL_EASE_FACTOR: f64 = 2.5;
pub const MIN_EASE_FACTOR: f64 = 1.3;

pub const MIN_QUALITY: i32 = 0;
pub const MAX_QUALITY: i32 = 5;
/// Lowest quality that counts as a successful recall
pub const PASSING_QUALITY: i32 = 3;

/// Starting schedule for a newly tracked problem.
pub fn initialize(requested_ease: Option<f64>) -> ScheduleState {
    initialize_at(requested_ease, Utc::now())
}

/// Starting schedule for a newly tracked problem, first due one day after `now`.
/// A missing or zero ease factor falls back to 2.5.
pub fn initialize_at(requested_ease: Option<f64>, now: DateTime<Utc>) -> ScheduleState {
    initialize_in(requested_ease, now, &Local)
}

pub fn initialize_in<Tz: TimeZone>(
    requested_ease: Option<f64>,
    now: DateTime<Utc>,
    tz: &Tz,
) -> ScheduleState {
    let ease_factor = match requested_ease {
        Some(ease) if ease != 0.0 && ease.is_finite() => ease.max(MIN_EASE_FACTOR),
        _ => INITIAL_EASE_FACTOR,
    };

    ScheduleState {
        interval: INITIAL_INTERVAL,
        ease_factor,
        last_reviewed: now,
        next_review: add_interval(now, INITIAL_INTERVAL, tz),
    }
}

/// Clamp to 0-5 (0 = complete blackout, 5 = perfect response)
pub fn clamp_quality(quality: i32) -> i32 {
    quality.clamp(MIN_QUALITY, MAX_QUALITY)
}

/// EF' = EF + (0.1 - (5-q) * (0.08 + (5-q) * 0.02)), floored at 1.3
pub fn next_ease_factor(ease_factor: f64, quality: i32) -> f64 {
    let q = clamp_quality(quality) as f64;
    let new_ef = ease_factor + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02));

    // max() also replaces a NaN ease with the floor
    new_ef.max(MIN_EASE_FACTOR)
}

/// Next schedule after a review graded `quality`.
pub fn compute_next_state(current: ScheduleState, quality: i32) -> ScheduleState {
    compute_next_state_at(current, quality, Utc::now())
}

/// Next schedule after a review graded `quality` that happened at `now`.
/// Out-of-range quality is clamped, never rejected.
pub fn compute_next_state_at(
    current: ScheduleState,
    quality: i32,
    now: DateTime<Utc>,
) -> ScheduleState {
    compute_next_state_in(current, quality, now, &Local)
}

pub fn compute_next_state_in<Tz: TimeZone>(
    current: ScheduleState,
    quality: i32,
    now: DateTime<Utc>,
    tz: &Tz,
) -> ScheduleState {
    let quality = clamp_quality(quality);
    let ease_factor = next_ease_factor(current.ease_factor, quality);

    let interval = if quality < PASSING_QUALITY {
        // Failed recall starts over, EF keeps the penalty from above
        1
    } else {
        match current.interval {
            prior if prior <= 0 => 1,
            1 => 6,
            prior => (prior as f64 * ease_factor).ceil() as i32,
        }
    };

    ScheduleState {
        interval,
        ease_factor,
        last_reviewed: now,
        next_review: add_interval(now, interval, tz),
    }
}

fn add_interval<Tz: TimeZone>(from: DateTime<Utc>, interval: i32, tz: &Tz) -> DateTime<Utc> {
    add_calendar_days(from, u32::try_from(interval).unwrap_or(0), tz)
}
