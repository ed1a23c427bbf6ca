//! Delete one event or every event in its recurrence group.

use anyhow::Result;
use cadence_core::EventOps;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use crate::store::JsonDirStore;

pub async fn run(ops: &EventOps<JsonDirStore>, id: String, all: bool, yes: bool) -> Result<()> {
    let event = ops.get(&id).await?;

    if all {
        let Some(group) = event.group_id.as_deref() else {
            anyhow::bail!(
                "'{}' is not part of a recurrence group; delete it without --all",
                id
            );
        };
        if !event.is_recurring() {
            anyhow::bail!(
                "'{}' was detached from its group; delete it without --all",
                id
            );
        }
        if !yes {
            let confirmed = Confirm::new()
                .with_prompt(format!(
                    "  Delete every event in the \"{}\" group?",
                    event.title
                ))
                .default(false)
                .interact()?;
            if !confirmed {
                println!("{}", "  Aborted".dimmed());
                return Ok(());
            }
        }
        let removed = ops.delete_group(group).await?;
        println!("{}", format!("  Deleted {} events", removed).red());
        return Ok(());
    }

    ops.delete_single(&id).await?;
    println!("{}", format!("  Deleted: {}", event.title).red());

    Ok(())
}
