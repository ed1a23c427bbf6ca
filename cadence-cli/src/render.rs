//! Terminal rendering for cadence types.
//!
//! Extension traits and helpers that turn events into colored agenda
//! lines using owo_colors.

use cadence_core::{Event, RepeatKind};
use chrono::{Datelike, NaiveDate};
use owo_colors::OwoColorize;

/// Extension trait for terminal rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        let time = format!(
            "{}-{}",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        );
        let mut line = format!("  {} {}", time, self.title);
        if !self.category.is_empty() {
            line.push_str(&format!(" {}", format!("[{}]", self.category).dimmed()));
        }
        if let Some(marker) = repeat_marker(self) {
            line.push_str(&format!(" {}", marker.dimmed()));
        }
        line.push_str(&format!("  {}", self.id.dimmed()));
        line
    }
}

/// Short repeat marker for agenda lines, e.g. "↻ weekly" or "↻ every 2 weeks".
fn repeat_marker(event: &Event) -> Option<String> {
    let unit = match event.repeat.kind {
        RepeatKind::None => return None,
        RepeatKind::Daily => "day",
        RepeatKind::Weekly => "week",
        RepeatKind::Monthly => "month",
        RepeatKind::Yearly => "year",
    };
    Some(match event.repeat.interval {
        1 => format!("↻ {}", event.repeat.kind),
        n => format!("↻ every {n} {unit}s"),
    })
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow",
/// "Wed Feb 25"). Dates outside the current year carry the year.
pub fn date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ if date.year() == today.year() => date.format("%a %b %-d").to_string(),
        _ => date.format("%a %b %-d %Y").to_string(),
    }
}

/// Print a day-grouped agenda.
pub fn print_agenda(events: &[Event]) {
    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return;
    }

    let today = chrono::Local::now().date_naive();
    let mut current_date: Option<NaiveDate> = None;

    for event in events {
        if current_date != Some(event.date) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", date_label(event.date, today).bold());
            current_date = Some(event.date);
        }
        println!("{}", event.render());
    }
}
