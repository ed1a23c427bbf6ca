//! Update event files in the store directory.

use std::path::Path;

use cadence_core::{CadenceResult, Event};

use super::StoredEvent;

/// Update an existing event file.
///
/// Deletes the old file and creates a new one with the updated content.
/// The filename may change if the event's date or title changed.
///
/// Returns the updated StoredEvent with the new path.
pub fn update(dir: &Path, old: &StoredEvent, new_event: &Event) -> CadenceResult<StoredEvent> {
    // Delete the old file
    super::delete::delete(old)?;

    // Create the new file (serializes the event internally)
    super::create::create(dir, new_event)
}
