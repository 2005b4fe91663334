//! Next-occurrence computation for fixed-timezone daily triggers.
//!
//! The nightly analysis fires at a fixed wall-clock time in the club's
//! timezone, so the schedule is expressed as local hour/minute plus an
//! IANA zone and converted to UTC per occurrence. DST shifts are handled
//! at conversion time: a wall-clock time that occurs twice resolves to
//! its first occurrence, and one that does not exist (spring-forward gap)
//! is pushed one hour later.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// A once-per-day trigger at a fixed local wall-clock time.
#[derive(Debug, Clone, Copy)]
pub struct DailySchedule {
    pub hour: u32,
    pub minute: u32,
    pub tz: Tz,
}

impl DailySchedule {
    /// The next UTC instant strictly after `now` at which the schedule
    /// fires.
    pub fn next_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let mut date = now.with_timezone(&self.tz).date_naive();
        loop {
            if let Some(candidate) = self.resolve_on(date) {
                if candidate > now {
                    return candidate;
                }
            }
            date = date.succ_opt().expect("date overflow computing schedule");
        }
    }

    /// Resolve the schedule's wall-clock time on `date` to a UTC instant.
    fn resolve_on(&self, date: NaiveDate) -> Option<DateTime<Utc>> {
        let naive = date.and_hms_opt(self.hour, self.minute, 0)?;
        match self.tz.from_local_datetime(&naive) {
            LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
            // Fall-back: the wall clock repeats; take the first pass.
            LocalResult::Ambiguous(first, _) => Some(first.with_timezone(&Utc)),
            // Spring-forward gap: the wall clock skips this time entirely.
            LocalResult::None => match self.tz.from_local_datetime(&(naive + Duration::hours(1))) {
                LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::Oslo;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn oslo_at_17() -> DailySchedule {
        DailySchedule {
            hour: 17,
            minute: 0,
            tz: Oslo,
        }
    }

    #[test]
    fn same_day_when_trigger_still_ahead() {
        // June: Oslo is CEST (UTC+2), so 17:00 local is 15:00 UTC.
        let next = oslo_at_17().next_after(utc(2026, 6, 10, 12, 0));
        assert_eq!(next, utc(2026, 6, 10, 15, 0));
    }

    #[test]
    fn next_day_when_trigger_already_passed() {
        let next = oslo_at_17().next_after(utc(2026, 6, 10, 16, 0));
        assert_eq!(next, utc(2026, 6, 11, 15, 0));
    }

    #[test]
    fn exactly_at_trigger_schedules_tomorrow() {
        // "Strictly after" keeps a run that fires on the dot from
        // immediately re-scheduling itself for the same instant.
        let next = oslo_at_17().next_after(utc(2026, 6, 10, 15, 0));
        assert_eq!(next, utc(2026, 6, 11, 15, 0));
    }

    #[test]
    fn winter_offset_differs_from_summer() {
        // January: Oslo is CET (UTC+1), so 17:00 local is 16:00 UTC.
        let next = oslo_at_17().next_after(utc(2026, 1, 10, 10, 0));
        assert_eq!(next, utc(2026, 1, 10, 16, 0));
    }

    #[test]
    fn spring_forward_gap_shifts_one_hour_later() {
        // Oslo skips 02:00-03:00 on 2026-03-29; a 02:30 schedule lands on
        // 03:30 CEST, which is 01:30 UTC.
        let schedule = DailySchedule {
            hour: 2,
            minute: 30,
            tz: Oslo,
        };
        let next = schedule.next_after(utc(2026, 3, 28, 23, 0));
        assert_eq!(next, utc(2026, 3, 29, 1, 30));
    }

    #[test]
    fn fall_back_ambiguity_takes_first_occurrence() {
        // Oslo repeats 02:00-03:00 on 2026-10-25; the first 02:30 is still
        // CEST (UTC+2), i.e. 00:30 UTC.
        let schedule = DailySchedule {
            hour: 2,
            minute: 30,
            tz: Oslo,
        };
        let next = schedule.next_after(utc(2026, 10, 24, 23, 0));
        assert_eq!(next, utc(2026, 10, 25, 0, 30));
    }
}
