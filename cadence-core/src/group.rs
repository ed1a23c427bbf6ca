//! Group mutation coordinator.
//!
//! Sits between callers and the store to enforce the recurrence group
//! contract: saving a recurring draft expands it into persisted
//! instances, editing one instance detaches it from its group, and
//! group-wide edits fan out to every still-attached member while
//! leaving each member's own date, group id and repeat rule alone.

use futures::future::join_all;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{CadenceError, CadenceResult};
use crate::event::{Event, EventPatch, Repeat};
use crate::overlap::collides_with;
use crate::recurrence::materialize;
use crate::store::EventStore;

/// High-level event operations over an [`EventStore`].
pub struct EventOps<S: EventStore> {
    store: S,
}

impl<S: EventStore> EventOps<S> {
    pub fn new(store: S) -> Self {
        EventOps { store }
    }

    /// Snapshot of every persisted event, in store order.
    pub async fn fetch_all(&self) -> CadenceResult<Vec<Event>> {
        self.store.fetch_all().await
    }

    /// Look up one persisted event by id.
    pub async fn get(&self, id: &str) -> CadenceResult<Event> {
        self.store
            .fetch_all()
            .await?
            .into_iter()
            .find(|event| event.id == id)
            .ok_or_else(|| CadenceError::EventNotFound(id.to_string()))
    }

    /// Persist a draft, expanding recurring drafts into their instances.
    ///
    /// A recurring draft without an id gets one up front so the group
    /// key exists before expansion. Instances are written one by one;
    /// a write failure stops the loop and surfaces, leaving earlier
    /// writes in place.
    pub async fn save(&self, mut draft: Event) -> CadenceResult<Vec<Event>> {
        if draft.is_recurring() && draft.id.is_empty() {
            draft.id = Uuid::new_v4().to_string();
        }
        let instances = materialize(&draft)?;
        let mut created = Vec::with_capacity(instances.len());
        for instance in instances {
            created.push(self.store.create(instance).await?);
        }
        info!(count = created.len(), "saved event");
        Ok(created)
    }

    /// Like [`save`](Self::save), but drops instances whose slot
    /// collides with an already-persisted event instead of writing them.
    pub async fn save_skipping_conflicts(&self, mut draft: Event) -> CadenceResult<Vec<Event>> {
        if draft.is_recurring() && draft.id.is_empty() {
            draft.id = Uuid::new_v4().to_string();
        }
        let instances = materialize(&draft)?;
        let existing = self.store.fetch_all().await?;

        let total = instances.len();
        let mut created = Vec::with_capacity(total);
        for instance in instances {
            let slot = instance.date.and_time(instance.start_time);
            if existing.iter().any(|event| collides_with(slot, event)) {
                continue;
            }
            created.push(self.store.create(instance).await?);
        }
        debug!(
            created = created.len(),
            skipped = total - created.len(),
            "saved with conflict skipping"
        );
        Ok(created)
    }

    /// Edit one instance, detaching it from its recurrence group.
    ///
    /// The patch is applied as-is, a date change included. The repeat
    /// rule is then forced to none so the instance stops receiving
    /// group-wide edits; its group id stays behind as provenance.
    pub async fn update_single(&self, id: &str, patch: &EventPatch) -> CadenceResult<Event> {
        let mut event = self.get(id).await?;
        patch.apply_to(&mut event);
        event.repeat = Repeat::none();
        self.store.update(id, event).await
    }

    /// Edit every still-attached instance of a group.
    ///
    /// Each member keeps its own date even when the patch carries one;
    /// repeat and group id are not patchable to begin with. Writes are
    /// dispatched together and all awaited. Any failure makes the whole
    /// operation fail without rolling back the writes that landed.
    pub async fn update_group(
        &self,
        group_id: &str,
        patch: &EventPatch,
    ) -> CadenceResult<Vec<Event>> {
        let members = self.members(group_id).await?;
        let total = members.len();

        let writes = members.iter().map(|member| {
            let mut next = member.clone();
            patch.apply_to(&mut next);
            next.date = member.date;
            self.store.update(&member.id, next)
        });
        let results = join_all(writes).await;

        let mut updated = Vec::with_capacity(total);
        let mut failed = 0usize;
        for result in results {
            match result {
                Ok(event) => updated.push(event),
                Err(error) => {
                    warn!(group = group_id, %error, "group update write failed");
                    failed += 1;
                }
            }
        }
        if failed > 0 {
            return Err(CadenceError::PartialBatch {
                context: format!("updating group {group_id}"),
                failed,
                total,
            });
        }
        info!(group = group_id, count = total, "updated group");
        Ok(updated)
    }

    /// Delete one instance by id.
    pub async fn delete_single(&self, id: &str) -> CadenceResult<()> {
        self.store.delete(id).await
    }

    /// Delete every still-attached instance of a group. Returns how many
    /// members the group had; like [`update_group`](Self::update_group),
    /// partial failure surfaces without compensation.
    pub async fn delete_group(&self, group_id: &str) -> CadenceResult<usize> {
        let members = self.members(group_id).await?;
        let total = members.len();

        let results = join_all(members.iter().map(|member| self.store.delete(&member.id))).await;

        let mut failed = 0usize;
        for result in results {
            if let Err(error) = result {
                warn!(group = group_id, %error, "group delete write failed");
                failed += 1;
            }
        }
        if failed > 0 {
            return Err(CadenceError::PartialBatch {
                context: format!("deleting group {group_id}"),
                failed,
                total,
            });
        }
        info!(group = group_id, count = total, "deleted group");
        Ok(total)
    }

    /// Group membership for mutations: same group id, not yet detached.
    /// Zero members is an error so callers never mistake a typo'd group
    /// for a successful no-op.
    async fn members(&self, group_id: &str) -> CadenceResult<Vec<Event>> {
        let members: Vec<Event> = self
            .store
            .fetch_all()
            .await?
            .into_iter()
            .filter(|event| event.group_id.as_deref() == Some(group_id) && event.is_recurring())
            .collect();
        if members.is_empty() {
            return Err(CadenceError::GroupNotFound(group_id.to_string()));
        }
        Ok(members)
    }
}
