//! Core engine for the cadence calendar.
//!
//! This crate provides everything below the UI: the event record types,
//! the pure recurrence generators (daily/weekly/monthly/yearly), the
//! overlap filter, the materializer that expands a repeat rule into
//! concrete instances, and the group-aware mutation operations that run
//! against an [`store::EventStore`].

pub mod date_math;
pub mod error;
pub mod event;
pub mod group;
pub mod overlap;
pub mod recurrence;
pub mod store;

// Re-export the types most callers need at crate root for convenience
pub use error::{CadenceError, CadenceResult};
pub use event::{Event, EventPatch, Repeat, RepeatKind};
pub use group::EventOps;
pub use store::{EventStore, MemoryStore};
