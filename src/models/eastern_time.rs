//! US Eastern time with the 2024 daylight-saving switches hard-coded,
//! so calendar-day arithmetic can be checked without the host's TZ.

use chrono::{
    FixedOffset, LocalResult, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc,
};

#[derive(Clone, Copy, Debug)]
pub struct Eastern2024;

fn edt() -> FixedOffset {
    FixedOffset::west_opt(4 * 3600).unwrap()
}

fn est() -> FixedOffset {
    FixedOffset::west_opt(5 * 3600).unwrap()
}

impl TimeZone for Eastern2024 {
    type Offset = FixedOffset;

    fn from_offset(_offset: &FixedOffset) -> Self {
        Eastern2024
    }

    fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
        self.offset_from_local_datetime(&local.and_hms_opt(0, 0, 0).unwrap())
    }

    fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
        // EDT first: the earlier instant when a wall-clock time occurs twice
        let matching: Vec<FixedOffset> = [edt(), est()]
            .into_iter()
            .filter(|offset| {
                let utc = *local - TimeDelta::seconds(offset.local_minus_utc().into());
                self.offset_from_utc_datetime(&utc) == *offset
            })
            .collect();

        match matching.as_slice() {
            [] => LocalResult::None,
            [only] => LocalResult::Single(*only),
            [earliest, latest, ..] => LocalResult::Ambiguous(*earliest, *latest),
        }
    }

    fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
        self.offset_from_utc_datetime(&utc.and_hms_opt(0, 0, 0).unwrap())
    }

    fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
        let spring_forward = Utc.with_ymd_and_hms(2024, 3, 10, 7, 0, 0).unwrap().naive_utc();
        let fall_back = Utc.with_ymd_and_hms(2024, 11, 3, 6, 0, 0).unwrap().naive_utc();

        if *utc >= spring_forward && *utc < fall_back {
            edt()
        } else {
            est()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_around_switches() {
        let before = Utc.with_ymd_and_hms(2024, 3, 10, 6, 59, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 3, 10, 7, 0, 0).unwrap();
        assert_eq!(before.with_timezone(&Eastern2024).offset(), &est());
        assert_eq!(after.with_timezone(&Eastern2024).offset(), &edt());
    }

    #[test]
    fn test_skipped_and_repeated_wall_clock() {
        let skipped = NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        assert!(Eastern2024.from_local_datetime(&skipped).earliest().is_none());

        let repeated = NaiveDate::from_ymd_opt(2024, 11, 3)
            .unwrap()
            .and_hms_opt(1, 30, 0)
            .unwrap();
        let earliest = Eastern2024.from_local_datetime(&repeated).earliest().unwrap();
        assert_eq!(
            earliest.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2024, 11, 3, 5, 30, 0).unwrap()
        );
    }
}
