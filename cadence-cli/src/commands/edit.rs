//! Edit one event or every event in its recurrence group.

use anyhow::Result;
use cadence_core::{Event, EventOps, EventPatch};
use clap::Args;
use dialoguer::Input;
use owo_colors::OwoColorize;

use super::{parse_date, parse_time};
use crate::store::JsonDirStore;

#[derive(Args)]
pub struct EditArgs {
    /// Id of the event to edit
    pub id: String,

    /// Apply the change to every attached event in the group
    #[arg(long)]
    pub all: bool,

    /// New title
    #[arg(short, long)]
    pub title: Option<String>,

    /// New date (YYYY-MM-DD); group edits never move dates
    #[arg(short, long)]
    pub date: Option<String>,

    /// New start time (HH:MM)
    #[arg(short, long)]
    pub start: Option<String>,

    /// New end time (HH:MM)
    #[arg(short, long)]
    pub end: Option<String>,

    /// New location
    #[arg(short, long)]
    pub location: Option<String>,

    /// New category
    #[arg(short, long)]
    pub category: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New reminder lead time in minutes
    #[arg(short, long)]
    pub notify: Option<u32>,
}

pub async fn run(ops: &EventOps<JsonDirStore>, args: EditArgs) -> Result<()> {
    let mut patch = build_patch(&args)?;
    let current = ops.get(&args.id).await?;

    if args.all {
        if patch.is_empty() {
            anyhow::bail!("Provide at least one field to change (e.g. --title)");
        }
        let Some(group) = current.group_id.as_deref() else {
            anyhow::bail!(
                "'{}' is not part of a recurrence group; edit it without --all",
                args.id
            );
        };
        if !current.is_recurring() {
            anyhow::bail!(
                "'{}' was detached from its group; edit it without --all",
                args.id
            );
        }
        let updated = ops.update_group(group, &patch).await?;
        println!("{}", format!("  Updated {} events", updated.len()).green());
        return Ok(());
    }

    // No field flags: prompt, prefilled with the current values.
    if patch.is_empty() {
        patch = prompt_patch(&current)?;
        println!();
    }

    let was_attached = current.is_recurring();
    let updated = ops.update_single(&args.id, &patch).await?;
    if was_attached {
        println!(
            "{}",
            format!("  Updated: {} (detached from its group)", updated.title).green()
        );
    } else {
        println!("{}", format!("  Updated: {}", updated.title).green());
    }

    Ok(())
}

fn build_patch(args: &EditArgs) -> Result<EventPatch> {
    Ok(EventPatch {
        title: args.title.clone(),
        description: args.description.clone(),
        location: args.location.clone(),
        category: args.category.clone(),
        date: args.date.as_deref().map(parse_date).transpose()?,
        start_time: args.start.as_deref().map(parse_time).transpose()?,
        end_time: args.end.as_deref().map(parse_time).transpose()?,
        notification_time: args.notify,
    })
}

fn prompt_patch(current: &Event) -> Result<EventPatch> {
    let title: String = Input::new()
        .with_prompt("  Title")
        .default(current.title.clone())
        .interact_text()?;
    let location: String = Input::new()
        .with_prompt("  Location")
        .default(current.location.clone())
        .interact_text()?;

    Ok(EventPatch {
        title: (title != current.title).then_some(title),
        location: (location != current.location).then_some(location),
        ..EventPatch::default()
    })
}
