//! Collision filtering for freshly generated occurrences.
//!
//! Pure functions only. Callers decide whether to run candidates through
//! the filter before persisting them.

use chrono::{NaiveDateTime, Timelike};

use crate::event::Event;

/// Whether a candidate occurrence lands inside an existing event's slot.
///
/// Candidates on a different calendar date never collide. On the same
/// date, a midnight candidate counts as whole-day and always collides;
/// any other time collides when its minute-of-day falls in the event's
/// `[start_time, end_time)` span, end exclusive.
pub fn collides_with(candidate: NaiveDateTime, event: &Event) -> bool {
    if candidate.date() != event.date {
        return false;
    }
    let time = candidate.time();
    if time.hour() == 0 && time.minute() == 0 {
        return true;
    }

    let minutes = minute_of_day(time.hour(), time.minute());
    let start = minute_of_day(event.start_time.hour(), event.start_time.minute());
    let end = minute_of_day(event.end_time.hour(), event.end_time.minute());
    minutes >= start && minutes < end
}

/// Drop every candidate that collides with any existing event.
pub fn filter_conflicting(
    candidates: Vec<NaiveDateTime>,
    existing: &[Event],
) -> Vec<NaiveDateTime> {
    if candidates.is_empty() {
        return candidates;
    }
    candidates
        .into_iter()
        .filter(|candidate| !existing.iter().any(|event| collides_with(*candidate, event)))
        .collect()
}

fn minute_of_day(hour: u32, minute: u32) -> u32 {
    hour * 60 + minute
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Repeat;
    use chrono::{NaiveDate, NaiveTime};

    fn make_event(date: (i32, u32, u32), start: (u32, u32), end: (u32, u32)) -> Event {
        Event {
            id: "existing".to_string(),
            title: "Busy".to_string(),
            description: String::new(),
            location: String::new(),
            category: String::new(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            notification_time: 0,
            repeat: Repeat::none(),
            group_id: None,
        }
    }

    fn at(y: i32, m: u32, d: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    // --- collision rule ---

    #[test]
    fn same_date_inside_span_collides() {
        let event = make_event((2025, 1, 2), (9, 0), (11, 0));
        assert!(collides_with(at(2025, 1, 2, 10, 0), &event));
        assert!(collides_with(at(2025, 1, 2, 9, 0), &event));
    }

    #[test]
    fn end_time_is_exclusive() {
        let event = make_event((2025, 1, 2), (9, 0), (11, 0));
        assert!(!collides_with(at(2025, 1, 2, 11, 0), &event));
        assert!(collides_with(at(2025, 1, 2, 10, 59), &event));
    }

    #[test]
    fn different_date_never_collides() {
        let event = make_event((2025, 1, 2), (0, 0), (23, 59));
        assert!(!collides_with(at(2025, 1, 3, 10, 0), &event));
    }

    #[test]
    fn midnight_candidate_is_whole_day() {
        let event = make_event((2025, 1, 2), (9, 0), (11, 0));
        assert!(collides_with(at(2025, 1, 2, 0, 0), &event));
    }

    // --- filtering ---

    #[test]
    fn filter_drops_only_colliding_candidates() {
        let existing = vec![make_event((2025, 1, 2), (9, 0), (11, 0))];
        let candidates = vec![
            at(2025, 1, 1, 10, 0),
            at(2025, 1, 2, 10, 0),
            at(2025, 1, 2, 11, 0),
            at(2025, 1, 3, 10, 0),
        ];
        let kept = filter_conflicting(candidates, &existing);
        assert_eq!(
            kept,
            vec![
                at(2025, 1, 1, 10, 0),
                at(2025, 1, 2, 11, 0),
                at(2025, 1, 3, 10, 0),
            ]
        );
    }

    #[test]
    fn filter_keeps_everything_when_nothing_exists() {
        let candidates = vec![at(2025, 1, 2, 10, 0)];
        let kept = filter_conflicting(candidates.clone(), &[]);
        assert_eq!(kept, candidates);
    }

    #[test]
    fn filter_of_nothing_is_nothing() {
        let existing = vec![make_event((2025, 1, 2), (9, 0), (11, 0))];
        assert!(filter_conflicting(Vec::new(), &existing).is_empty());
    }
}
