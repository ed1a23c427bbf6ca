//! Calendar arithmetic used by the recurrence generators.

use chrono::{Datelike, NaiveDate};

/// Gregorian leap-year rule: divisible by 4, except centuries, except
/// centuries divisible by 400.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in the given month, 29 for February in leap years.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Advance `months` whole months from the first of `date`'s month,
/// keeping `day`. Returns `None` when the resulting month is too short
/// for `day` or the year arithmetic overflows `i32`.
pub fn add_months(date: NaiveDate, months: u32, day: u32) -> Option<NaiveDate> {
    let total = i64::from(date.year()) * 12 + i64::from(date.month0()) + i64::from(months);
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = u32::try_from(total.rem_euclid(12)).ok()? + 1;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- leap years ---

    #[test]
    fn leap_year_rule() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(2100));
    }

    // --- month lengths ---

    #[test]
    fn february_follows_leap_rule() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
    }

    #[test]
    fn fixed_month_lengths() {
        assert_eq!(days_in_month(2025, 1), 31);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 9), 30);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn invalid_month_is_zero_days() {
        assert_eq!(days_in_month(2025, 0), 0);
        assert_eq!(days_in_month(2025, 13), 0);
    }

    // --- month stepping ---

    #[test]
    fn add_months_steps_within_year() {
        let jan = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(
            add_months(jan, 3, 15),
            NaiveDate::from_ymd_opt(2025, 4, 15)
        );
    }

    #[test]
    fn add_months_crosses_year_boundary() {
        let nov = NaiveDate::from_ymd_opt(2025, 11, 30).unwrap();
        assert_eq!(
            add_months(nov, 2, 30),
            NaiveDate::from_ymd_opt(2026, 1, 30)
        );
    }

    #[test]
    fn add_months_skips_missing_day() {
        let jan = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(add_months(jan, 1, 31), None);
        assert_eq!(
            add_months(jan, 2, 31),
            NaiveDate::from_ymd_opt(2025, 3, 31)
        );
    }
}
