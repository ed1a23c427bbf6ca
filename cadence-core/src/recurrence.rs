//! Recurrence expansion.
//!
//! Turns a repeat rule into the ordered list of concrete occurrence dates,
//! and a seed event into the full set of dated instances that share one
//! group. All generation is pure and bounded; nothing here touches a store.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::date_math::{add_months, days_in_month, is_leap_year};
use crate::error::{CadenceError, CadenceResult};
use crate::event::{Event, Repeat, RepeatKind};

/// Hard bound on candidate-date steps per expansion. Guarantees
/// termination regardless of how far away `end_date` is.
pub const MAX_OCCURRENCE_STEPS: usize = 1000;

/// Check a repeat rule before any generation or write happens.
///
/// Non-repeating rules are always fine. Repeating rules need an interval
/// of at least 1 and an end date (when given) no earlier than the event's
/// own date.
pub fn validate(repeat: &Repeat, date: NaiveDate) -> CadenceResult<()> {
    if repeat.kind == RepeatKind::None {
        return Ok(());
    }
    if repeat.interval < 1 {
        return Err(CadenceError::InvalidInterval(repeat.interval));
    }
    if let Some(end) = repeat.end_date {
        if end < date {
            return Err(CadenceError::EndBeforeStart { start: date, end });
        }
    }
    Ok(())
}

/// The end date applied when a rule has none. Frequency-specific: one
/// year out for daily and weekly, the start year's December 31 for
/// monthly, a century out for yearly.
pub fn default_horizon(kind: RepeatKind, start: NaiveDate) -> NaiveDate {
    match kind {
        RepeatKind::None => start,
        RepeatKind::Daily | RepeatKind::Weekly => years_later(start, 1),
        RepeatKind::Monthly => {
            NaiveDate::from_ymd_opt(start.year(), 12, 31).unwrap_or(NaiveDate::MAX)
        }
        RepeatKind::Yearly => years_later(start, 100),
    }
}

/// All occurrence dates for an event dated `start` under `repeat`,
/// ordered ascending, bounded by the rule's end date or the default
/// horizon. A non-repeating rule yields the start date alone.
pub fn occurrence_dates(start: NaiveDate, repeat: &Repeat) -> Vec<NaiveDate> {
    let end = repeat
        .end_date
        .unwrap_or_else(|| default_horizon(repeat.kind, start));
    match repeat.kind {
        RepeatKind::None => vec![start],
        RepeatKind::Daily => daily_dates(start, end, repeat.interval),
        RepeatKind::Weekly => weekly_dates(start, end, repeat.interval),
        RepeatKind::Monthly => monthly_dates(start, end, repeat.interval),
        RepeatKind::Yearly => yearly_dates(start, end, repeat.interval),
    }
}

/// Dates `start, start + interval days, …` through `end` inclusive.
pub fn daily_dates(start: NaiveDate, end: NaiveDate, interval: u32) -> Vec<NaiveDate> {
    stride_dates(start, end, u64::from(interval))
}

/// Dates on `start`'s weekday, stepped by `7 × interval` days, through
/// `end` inclusive.
pub fn weekly_dates(start: NaiveDate, end: NaiveDate, interval: u32) -> Vec<NaiveDate> {
    stride_dates(start, end, 7 * u64::from(interval))
}

/// Dates on `start`'s day-of-month, stepping `interval` months. Months
/// too short for that day are skipped outright, never clamped: a rule
/// anchored on the 31st fires only in 31-day months.
pub fn monthly_dates(start: NaiveDate, end: NaiveDate, interval: u32) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    if interval == 0 {
        return dates;
    }
    let target_day = start.day();
    let mut months_ahead = 0u32;
    for _ in 0..MAX_OCCURRENCE_STEPS {
        // First of the candidate month decides termination, so short
        // months still advance the walk instead of ending it.
        let Some(first) = add_months(start, months_ahead, 1) else {
            break;
        };
        if first > end {
            break;
        }
        if target_day <= days_in_month(first.year(), first.month()) {
            if let Some(date) = first.with_day(target_day).filter(|d| *d <= end) {
                dates.push(date);
            }
        }
        months_ahead = match months_ahead.checked_add(interval) {
            Some(next) => next,
            None => break,
        };
    }
    dates
}

/// Dates on `start`'s month and day, stepping `interval` years. A rule
/// anchored on February 29 fires only in leap years; non-leap years in
/// the sequence are skipped, not rounded to the 28th.
pub fn yearly_dates(start: NaiveDate, end: NaiveDate, interval: u32) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    if interval == 0 {
        return dates;
    }
    let month = start.month();
    let day = start.day();
    let leap_day_only = month == 2 && day == 29;
    let step = i32::try_from(interval).unwrap_or(i32::MAX);
    let mut year = start.year();
    for _ in 0..MAX_OCCURRENCE_STEPS {
        match NaiveDate::from_ymd_opt(year, month, 1) {
            Some(first) if first <= end => {}
            _ => break,
        }
        if !leap_day_only || is_leap_year(year) {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                if date <= end {
                    dates.push(date);
                }
            }
        }
        year = match year.checked_add(step) {
            Some(next) => next,
            None => break,
        };
    }
    dates
}

/// Expand a seed event into its persisted instances.
///
/// A non-repeating seed passes through untouched as a single-element
/// list. A repeating seed becomes one instance per occurrence date, each
/// carrying a fresh id derived from the seed's and the seed's id as the
/// shared group id. Every other field, the repeat rule included, is
/// copied verbatim onto each instance.
pub fn materialize(seed: &Event) -> CadenceResult<Vec<Event>> {
    validate(&seed.repeat, seed.date)?;
    if seed.repeat.kind == RepeatKind::None {
        return Ok(vec![seed.clone()]);
    }

    let dates = occurrence_dates(seed.date, &seed.repeat);
    debug!(
        seed = %seed.id,
        kind = %seed.repeat.kind,
        count = dates.len(),
        "expanded recurrence"
    );

    Ok(dates
        .into_iter()
        .enumerate()
        .map(|(index, date)| {
            let mut instance = seed.clone();
            instance.id = format!("{}-repeat-{}", seed.id, index);
            instance.date = date;
            instance.group_id = Some(seed.id.clone());
            instance
        })
        .collect())
}

/// Shared walk for the fixed-stride frequencies.
fn stride_dates(start: NaiveDate, end: NaiveDate, step_days: u64) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    if step_days == 0 {
        return dates;
    }
    let mut current = start;
    for _ in 0..MAX_OCCURRENCE_STEPS {
        if current > end {
            break;
        }
        dates.push(current);
        current = match current.checked_add_days(chrono::Days::new(step_days)) {
            Some(next) => next,
            None => break,
        };
    }
    dates
}

/// `start` moved `years` ahead, same month and day. February 29 rolls to
/// March 1 when the target year is not a leap year.
fn years_later(start: NaiveDate, years: i32) -> NaiveDate {
    let year = start.year().saturating_add(years);
    NaiveDate::from_ymd_opt(year, start.month(), start.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(NaiveDate::MAX)
}
