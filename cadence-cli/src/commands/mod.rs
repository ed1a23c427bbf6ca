pub mod delete;
pub mod edit;
pub mod list;
pub mod new;

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};

/// Parse a YYYY-MM-DD argument.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\" (expected YYYY-MM-DD)", input))
}

/// Parse an HH:MM argument.
pub fn parse_time(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .map_err(|_| anyhow::anyhow!("Could not parse time: \"{}\" (expected HH:MM)", input))
}
