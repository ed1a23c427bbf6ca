//! Persistence seam.
//!
//! The engine never owns the event collection. Everything it reads or
//! writes goes through [`EventStore`], so recurrence math stays pure and
//! any backend (files, a database, a remote API) can sit behind it.
//! [`MemoryStore`] is the bundled in-process backend.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{CadenceError, CadenceResult};
use crate::event::Event;

/// The four operations the engine requires of a backend.
///
/// Writes are independent and idempotent by id. `create` must assign a
/// unique id when the record arrives without one and return the stored
/// record. Failures surface as errors, never as silent no-ops.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Snapshot of every persisted event.
    async fn fetch_all(&self) -> CadenceResult<Vec<Event>>;

    /// Persist a new event, assigning an id if the draft has none.
    async fn create(&self, event: Event) -> CadenceResult<Event>;

    /// Replace the event stored under `id`. Errors when `id` is unknown.
    async fn update(&self, id: &str, event: Event) -> CadenceResult<Event>;

    /// Remove the event stored under `id`. Errors when `id` is unknown.
    async fn delete(&self, id: &str) -> CadenceResult<()>;
}

/// In-process event store backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    events: Mutex<HashMap<String, Event>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with the given events, keyed by their ids.
    pub fn with_events(events: impl IntoIterator<Item = Event>) -> Self {
        let map = events
            .into_iter()
            .map(|event| (event.id.clone(), event))
            .collect();
        MemoryStore {
            events: Mutex::new(map),
        }
    }

    fn guard(&self) -> CadenceResult<MutexGuard<'_, HashMap<String, Event>>> {
        self.events
            .lock()
            .map_err(|_| CadenceError::Store("event map lock poisoned".to_string()))
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn fetch_all(&self) -> CadenceResult<Vec<Event>> {
        let events = self.guard()?;
        let mut all: Vec<Event> = events.values().cloned().collect();
        // Deterministic order: by day, then slot, then id.
        all.sort_by(|a, b| {
            (a.date, a.start_time, &a.id).cmp(&(b.date, b.start_time, &b.id))
        });
        Ok(all)
    }

    async fn create(&self, mut event: Event) -> CadenceResult<Event> {
        if event.id.is_empty() {
            event.id = Uuid::new_v4().to_string();
        }
        let mut events = self.guard()?;
        events.insert(event.id.clone(), event.clone());
        Ok(event)
    }

    async fn update(&self, id: &str, mut event: Event) -> CadenceResult<Event> {
        let mut events = self.guard()?;
        if !events.contains_key(id) {
            return Err(CadenceError::EventNotFound(id.to_string()));
        }
        event.id = id.to_string();
        events.insert(id.to_string(), event.clone());
        Ok(event)
    }

    async fn delete(&self, id: &str) -> CadenceResult<()> {
        let mut events = self.guard()?;
        events
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| CadenceError::EventNotFound(id.to_string()))
    }
}
