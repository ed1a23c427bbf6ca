//! Create a new event, expanding recurring rules into stored instances.

use anyhow::Result;
use cadence_core::recurrence::occurrence_dates;
use cadence_core::{Event, EventOps, Repeat, RepeatKind};
use chrono::{Duration, NaiveTime};
use clap::Args;
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;

use super::{parse_date, parse_time};
use crate::config::Cadence;
use crate::store::JsonDirStore;

#[derive(Args)]
pub struct NewArgs {
    /// Event title
    pub title: Option<String>,

    /// Event date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Start time (HH:MM)
    #[arg(short, long)]
    pub start: Option<String>,

    /// End time (HH:MM, defaults to one hour after start)
    #[arg(short, long)]
    pub end: Option<String>,

    /// Repeat frequency: none, daily, weekly, monthly or yearly
    #[arg(short, long)]
    pub repeat: Option<String>,

    /// Step between occurrences, in units of the repeat frequency
    #[arg(long, default_value_t = 1)]
    pub every: u32,

    /// Last date an occurrence may fall on (YYYY-MM-DD)
    #[arg(long)]
    pub until: Option<String>,

    /// Where the event takes place
    #[arg(short, long)]
    pub location: Option<String>,

    /// Free-form category tag
    #[arg(short, long)]
    pub category: Option<String>,

    /// Longer description
    #[arg(long)]
    pub description: Option<String>,

    /// Minutes before start to remind
    #[arg(short, long)]
    pub notify: Option<u32>,

    /// Skip occurrences that collide with existing events
    #[arg(long)]
    pub skip_conflicts: bool,
}

pub async fn run(ops: &EventOps<JsonDirStore>, cadence: &Cadence, args: NewArgs) -> Result<()> {
    let interactive = args.title.is_none() || args.date.is_none() || args.start.is_none();

    // --- Title ---
    let title = match args.title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("  Title")
            .interact_text()?,
    };

    // --- Date ---
    let date = match args.date {
        Some(d) => parse_date(&d)?,
        None => prompt_with_retry("  Date (YYYY-MM-DD)", parse_date)?,
    };

    // --- Times ---
    let start_time = match args.start {
        Some(s) => parse_time(&s)?,
        None => prompt_with_retry("  Start (HH:MM)", parse_time)?,
    };
    let end_time = match args.end {
        Some(e) => parse_time(&e)?,
        None if interactive => prompt_end(start_time)?,
        None => default_end(start_time),
    };

    // --- Repeat ---
    let kind = match args.repeat.as_deref() {
        Some(r) => r.parse::<RepeatKind>()?,
        None if interactive => prompt_repeat()?,
        None => RepeatKind::None,
    };
    let repeat = if kind == RepeatKind::None {
        Repeat::none()
    } else {
        let until = args.until.as_deref().map(parse_date).transpose()?;
        Repeat::new(kind, args.every, until)
    };

    // --- Location ---
    let location = match args.location {
        Some(loc) => loc,
        None if interactive => Input::new()
            .with_prompt("  Where? (skip)")
            .default(String::new())
            .show_default(false)
            .interact_text()?,
        None => String::new(),
    };

    // --- Save ---
    let draft = Event {
        id: String::new(),
        title: title.clone(),
        description: args.description.unwrap_or_default(),
        location,
        category: args.category.unwrap_or_default(),
        date,
        start_time,
        end_time,
        notification_time: args
            .notify
            .unwrap_or_else(|| cadence.default_notification_time()),
        repeat: repeat.clone(),
        group_id: None,
    };

    let planned = occurrence_dates(draft.date, &draft.repeat).len();
    let created = if args.skip_conflicts {
        ops.save_skipping_conflicts(draft).await?
    } else {
        ops.save(draft).await?
    };

    if interactive {
        println!();
    }
    let skipped = planned.saturating_sub(created.len());
    match created.len() {
        0 => println!(
            "{}",
            "  Nothing created: every occurrence collided with an existing event".yellow()
        ),
        1 if skipped == 0 => println!("{}", format!("  Created: {}", title).green()),
        n => {
            println!(
                "{}",
                format!("  Created {} events ({})", n, describe_repeat(&repeat)).green()
            );
            if skipped > 0 {
                println!(
                    "{}",
                    format!("  Skipped {} conflicting occurrence(s)", skipped).yellow()
                );
            }
        }
    }

    Ok(())
}

/// Prompt the user with retry on parse errors.
fn prompt_with_retry<T, F>(prompt: &str, parse: F) -> Result<T>
where
    F: Fn(&str) -> Result<T>,
{
    loop {
        let input: String = Input::new().with_prompt(prompt).interact_text()?;
        match parse(&input) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

/// Prompt for an end time, empty input meaning one hour after start.
fn prompt_end(start: NaiveTime) -> Result<NaiveTime> {
    loop {
        let input: String = Input::new()
            .with_prompt("  End (HH:MM, empty for +1h)")
            .default(String::new())
            .show_default(false)
            .interact_text()?;
        if input.is_empty() {
            return Ok(default_end(start));
        }
        match parse_time(&input) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

fn prompt_repeat() -> Result<RepeatKind> {
    let items = ["none", "daily", "weekly", "monthly", "yearly"];
    let selection = Select::new()
        .with_prompt("  Repeats")
        .items(&items)
        .default(0)
        .interact()?;
    Ok(items[selection].parse()?)
}

/// Default end time: one hour after the start.
fn default_end(start: NaiveTime) -> NaiveTime {
    start.overflowing_add_signed(Duration::hours(1)).0
}

/// Human summary of a repeat rule, e.g. "weekly until 2026-03-01".
fn describe_repeat(repeat: &Repeat) -> String {
    let unit = match repeat.kind {
        RepeatKind::None => return "one-off".to_string(),
        RepeatKind::Daily => "day",
        RepeatKind::Weekly => "week",
        RepeatKind::Monthly => "month",
        RepeatKind::Yearly => "year",
    };
    let base = match repeat.interval {
        1 => repeat.kind.to_string(),
        n => format!("every {} {}s", n, unit),
    };
    match repeat.end_date {
        Some(end) => format!("{} until {}", base, end),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    // --- default_end ---

    #[test]
    fn default_end_adds_one_hour() {
        let start = NaiveTime::from_hms_opt(15, 0, 0).unwrap();
        assert_eq!(default_end(start), NaiveTime::from_hms_opt(16, 0, 0).unwrap());
    }

    #[test]
    fn default_end_wraps_past_midnight() {
        let start = NaiveTime::from_hms_opt(23, 30, 0).unwrap();
        assert_eq!(default_end(start), NaiveTime::from_hms_opt(0, 30, 0).unwrap());
    }

    // --- describe_repeat ---

    #[test]
    fn describes_simple_frequencies() {
        assert_eq!(
            describe_repeat(&Repeat::new(RepeatKind::Weekly, 1, None)),
            "weekly"
        );
    }

    #[test]
    fn describes_intervals_and_end_dates() {
        let end = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(
            describe_repeat(&Repeat::new(RepeatKind::Weekly, 2, Some(end))),
            "every 2 weeks until 2026-03-01"
        );
    }
}
