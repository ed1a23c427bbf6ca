//! Show events as a day-grouped agenda.

use anyhow::Result;
use cadence_core::EventOps;
use chrono::{Duration, Local};

use super::parse_date;
use crate::render;
use crate::store::JsonDirStore;

/// Days shown when no range is given.
const DEFAULT_WINDOW_DAYS: i64 = 30;

pub async fn run(
    ops: &EventOps<JsonDirStore>,
    from: Option<String>,
    to: Option<String>,
    group: Option<String>,
    all: bool,
) -> Result<()> {
    let today = Local::now().date_naive();
    let from = from.as_deref().map(parse_date).transpose()?.unwrap_or(today);
    let to = to
        .as_deref()
        .map(parse_date)
        .transpose()?
        .unwrap_or(today + Duration::days(DEFAULT_WINDOW_DAYS));

    let mut events = ops.fetch_all().await?;
    if !all {
        events.retain(|e| e.date >= from && e.date <= to);
    }
    if let Some(group) = group {
        events.retain(|e| e.group_id.as_deref() == Some(group.as_str()));
    }

    render::print_agenda(&events);
    Ok(())
}
