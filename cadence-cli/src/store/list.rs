//! List events from the store directory.

use std::collections::HashMap;
use std::path::Path;

use cadence_core::{CadenceResult, Event};
use tracing::warn;

use super::StoredEvent;

/// List all events in the store directory.
///
/// Returns a map of id -> StoredEvent for all .json files found. Files
/// that fail to parse are skipped with a warning rather than failing the
/// whole listing.
pub fn list(dir: &Path) -> CadenceResult<HashMap<String, StoredEvent>> {
    let mut events: HashMap<String, StoredEvent> = HashMap::new();

    if !dir.exists() {
        return Ok(events);
    }

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if !path.extension().map(|e| e == "json").unwrap_or(false) {
            continue;
        }
        let Ok(content) = std::fs::read_to_string(&path) else {
            continue;
        };
        match serde_json::from_str::<Event>(&content) {
            Ok(event) => {
                let id = event.id.clone();
                events.insert(id, StoredEvent { path, event });
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "skipping unreadable event file");
            }
        }
    }

    Ok(events)
}
