//! Create event files in the store directory.

use std::path::Path;

use cadence_core::{CadenceError, CadenceResult, Event};

use super::StoredEvent;

/// Create a new event file in the store directory.
///
/// Serializes the event to JSON under a human-readable filename derived
/// from its date and title, handling collisions with numeric suffixes
/// (-2, -3, etc).
///
/// Returns the created StoredEvent.
pub fn create(dir: &Path, event: &Event) -> CadenceResult<StoredEvent> {
    let content = serde_json::to_string_pretty(event)
        .map_err(|e| CadenceError::Serialization(e.to_string()))?;
    let filename = filename_for(event, dir)?;
    let path = dir.join(&filename);

    std::fs::write(&path, &content)?;

    Ok(StoredEvent {
        path,
        event: event.clone(),
    })
}

// =============================================================================
// Internal: Filename generation
// =============================================================================

/// Generate the filename to use for an event in a directory.
/// Handles collisions by adding numeric suffixes (-2, -3, etc).
fn filename_for(event: &Event, dir: &Path) -> CadenceResult<String> {
    let base_filename = generate_base_filename(event);
    unique_filename(&base_filename, dir, &event.id)
}

/// Generate the base filename for an event (without collision suffix).
fn generate_base_filename(event: &Event) -> String {
    let slug = slugify(&event.title);
    format!("{}__{}.json", event.date.format("%Y-%m-%d"), slug)
}

/// Convert a string to a filename-safe slug
fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(50)
        .collect()
}

/// Generate a unique filename, adding -2, -3, etc. suffix if there's a collision.
fn unique_filename(base_filename: &str, dir: &Path, own_id: &str) -> CadenceResult<String> {
    let base = base_filename.trim_end_matches(".json");

    // Check if base filename is available
    let base_path = dir.join(base_filename);
    if !base_path.exists() {
        return Ok(base_filename.to_string());
    }

    // File exists - check if it's the same event (same id)
    if holds_event(&base_path, own_id) {
        return Ok(base_filename.to_string());
    }

    // Collision detected - find an available suffix
    for n in 2..=100 {
        let suffixed = format!("{}-{}.json", base, n);
        let suffixed_path = dir.join(&suffixed);

        if !suffixed_path.exists() {
            return Ok(suffixed);
        }
        if holds_event(&suffixed_path, own_id) {
            return Ok(suffixed);
        }
    }

    Err(CadenceError::Store(format!(
        "too many filename collisions for {base_filename}"
    )))
}

fn holds_event(path: &Path, id: &str) -> bool {
    let Ok(content) = std::fs::read_to_string(path) else {
        return false;
    };
    serde_json::from_str::<Event>(&content)
        .map(|event| event.id == id)
        .unwrap_or(false)
}

// =============================================================================
// Tests
// =============================================================================
