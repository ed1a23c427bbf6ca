//! Delete event files from the store directory.

use cadence_core::CadenceResult;

use super::StoredEvent;

/// Delete an event file from the store directory.
pub fn delete(stored: &StoredEvent) -> CadenceResult<()> {
    std::fs::remove_file(&stored.path)?;
    Ok(())
}
