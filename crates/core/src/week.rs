//! Deterministic ISO-week keys for team summaries.
//!
//! One summary row exists per team per ISO week; re-running the nightly
//! job within the same week merges into the same row instead of creating
//! a new one. The key pairs the ISO week number with the ISO week-based
//! year so the turn of the year cannot split a week across two keys.

use chrono::{Datelike, NaiveDate};

/// Build the summary key for the week containing `date`,
/// e.g. `weekly-2026-07` for a date in ISO week 7 of 2026.
pub fn week_key(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("weekly-{}-{:02}", iso.year(), iso.week())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_week_same_key() {
        // Monday and Sunday of the same ISO week.
        let monday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();

        assert_eq!(week_key(monday), week_key(sunday));
        assert_eq!(week_key(monday), "weekly-2026-10");
    }

    #[test]
    fn week_number_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 7).unwrap();
        assert_eq!(week_key(date), "weekly-2026-02");
    }

    #[test]
    fn year_boundary_uses_iso_year() {
        // 2027-01-01 is a Friday and belongs to ISO week 53 of 2026.
        let date = NaiveDate::from_ymd_opt(2027, 1, 1).unwrap();
        assert_eq!(week_key(date), "weekly-2026-53");
    }

    #[test]
    fn adjacent_weeks_get_distinct_keys() {
        let sunday = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
        let monday = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();

        assert_ne!(week_key(sunday), week_key(monday));
    }
}
