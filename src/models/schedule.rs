//! Review schedule of a single tracked problem.
//!
//! Interval days are calendar days in the user's time zone, and a problem is
//! due once its next review falls on or before the current local date. The
//! `_in` functions take the zone explicitly; the rest use `Local`.

use chrono::{DateTime, Days, Local, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduleState {
    pub interval: i32,
    pub ease_factor: f64,
    pub last_reviewed: DateTime<Utc>,
    pub next_review: DateTime<Utc>,
}

impl ScheduleState {
    /// A problem is due when its next review falls on or before the current local day.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.is_due_in(now, &Local)
    }

    pub fn is_due_in<Tz: TimeZone>(&self, now: DateTime<Utc>, tz: &Tz) -> bool {
        self.next_review < due_cutoff_in(now, tz)
    }
}

/// Start of the day following `now` in `tz`. Anything scheduled before it is due.
pub fn due_cutoff_in<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
    now.with_timezone(tz)
        .date_naive()
        .succ_opt()
        .and_then(|tomorrow| tomorrow.and_hms_opt(0, 0, 0))
        .and_then(|midnight| tz.from_local_datetime(&midnight).earliest())
        .map(|midnight| midnight.with_timezone(&Utc))
        .unwrap_or(now)
}

/// `days` calendar days after `from` in `tz`, at the same wall-clock time.
///
/// A repeated wall-clock time resolves to its first occurrence. One skipped by
/// a daylight-saving jump falls back to whole 24h days. Saturates at `MAX_UTC`.
pub fn add_calendar_days<Tz: TimeZone>(from: DateTime<Utc>, days: u32, tz: &Tz) -> DateTime<Utc> {
    from.with_timezone(tz)
        .naive_local()
        .checked_add_days(Days::new(days.into()))
        .and_then(|target| tz.from_local_datetime(&target).earliest())
        .map(|target| target.with_timezone(&Utc))
        .or_else(|| from.checked_add_signed(TimeDelta::days(days.into())))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
