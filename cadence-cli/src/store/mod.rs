//! Local event file storage.
//!
//! Persists each event as one JSON file in a flat directory and exposes
//! the whole thing to the engine as an [`EventStore`].

mod create;
mod delete;
mod list;
mod update;

pub use create::create;
pub use delete::delete;
pub use list::list;
pub use update::update;

use std::path::PathBuf;

use async_trait::async_trait;
use cadence_core::{CadenceError, CadenceResult, Event, EventStore};
use uuid::Uuid;

/// An event stored as a local .json file.
pub struct StoredEvent {
    /// Path to the .json file
    pub path: PathBuf,
    /// The event data
    pub event: Event,
}

/// Directory-backed [`EventStore`]. One file per event, filenames derived
/// from the event's date and title.
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    /// Open the store at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> CadenceResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(JsonDirStore { dir })
    }

    fn stored(&self, id: &str) -> CadenceResult<StoredEvent> {
        list(&self.dir)?
            .remove(id)
            .ok_or_else(|| CadenceError::EventNotFound(id.to_string()))
    }
}

#[async_trait]
impl EventStore for JsonDirStore {
    async fn fetch_all(&self) -> CadenceResult<Vec<Event>> {
        let mut all: Vec<Event> = list(&self.dir)?
            .into_values()
            .map(|stored| stored.event)
            .collect();
        all.sort_by(|a, b| {
            (a.date, a.start_time, &a.id).cmp(&(b.date, b.start_time, &b.id))
        });
        Ok(all)
    }

    async fn create(&self, mut event: Event) -> CadenceResult<Event> {
        if event.id.is_empty() {
            event.id = Uuid::new_v4().to_string();
        }
        create(&self.dir, &event)?;
        Ok(event)
    }

    async fn update(&self, id: &str, mut event: Event) -> CadenceResult<Event> {
        let old = self.stored(id)?;
        event.id = id.to_string();
        update(&self.dir, &old, &event)?;
        Ok(event)
    }

    async fn delete(&self, id: &str) -> CadenceResult<()> {
        let stored = self.stored(id)?;
        delete(&stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::{EventOps, EventPatch, Repeat, RepeatKind};
    use chrono::{NaiveDate, NaiveTime};
    use tempfile::tempdir;

    fn make_test_event(id: &str, title: &str) -> Event {
        Event {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            location: String::new(),
            category: "work".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
            start_time: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
            notification_time: 10,
            repeat: Repeat::new(RepeatKind::None, 0, None),
            group_id: None,
        }
    }

    #[tokio::test]
    async fn create_then_fetch_round_trips() {
        let dir = tempdir().unwrap();
        let store = JsonDirStore::open(dir.path()).unwrap();

        let stored = store.create(make_test_event("", "Team Standup")).await.unwrap();
        assert!(!stored.id.is_empty());

        let all = store.fetch_all().await.unwrap();
        assert_eq!(all, vec![stored]);
        assert!(dir.path().join("2025-03-20__team-standup.json").exists());
    }

    #[tokio::test]
    async fn update_rewrites_the_file_under_the_new_name() {
        let dir = tempdir().unwrap();
        let store = JsonDirStore::open(dir.path()).unwrap();
        let stored = store.create(make_test_event("evt-1", "Team Standup")).await.unwrap();

        let mut changed = stored.clone();
        changed.title = "Team Retro".to_string();
        changed.date = NaiveDate::from_ymd_opt(2025, 3, 21).unwrap();
        let updated = store.update("evt-1", changed).await.unwrap();
        assert_eq!(updated.title, "Team Retro");

        assert!(!dir.path().join("2025-03-20__team-standup.json").exists());
        assert!(dir.path().join("2025-03-21__team-retro.json").exists());

        let all = store.fetch_all().await.unwrap();
        assert_eq!(all, vec![updated]);
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_an_error() {
        let dir = tempdir().unwrap();
        let store = JsonDirStore::open(dir.path()).unwrap();
        let err = store
            .update("ghost", make_test_event("ghost", "Nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, CadenceError::EventNotFound(id) if id == "ghost"));
    }

    #[tokio::test]
    async fn delete_removes_the_file() {
        let dir = tempdir().unwrap();
        let store = JsonDirStore::open(dir.path()).unwrap();
        store.create(make_test_event("evt-1", "Team Standup")).await.unwrap();

        store.delete("evt-1").await.unwrap();
        assert!(store.fetch_all().await.unwrap().is_empty());
        assert!(!dir.path().join("2025-03-20__team-standup.json").exists());

        let err = store.delete("evt-1").await.unwrap_err();
        assert!(matches!(err, CadenceError::EventNotFound(_)));
    }

    #[tokio::test]
    async fn fetch_all_is_ordered_by_day_then_slot() {
        let dir = tempdir().unwrap();
        let store = JsonDirStore::open(dir.path()).unwrap();

        let mut late = make_test_event("late", "Late");
        late.start_time = NaiveTime::from_hms_opt(18, 0, 0).unwrap();
        let mut early = make_test_event("early", "Early");
        early.start_time = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        let mut tomorrow = make_test_event("next-day", "Next day");
        tomorrow.date = NaiveDate::from_ymd_opt(2025, 3, 21).unwrap();

        store.create(late).await.unwrap();
        store.create(tomorrow).await.unwrap();
        store.create(early).await.unwrap();

        let ids: Vec<String> = store
            .fetch_all()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["early", "late", "next-day"]);
    }

    #[tokio::test]
    async fn group_edit_rewrites_every_file_in_place() {
        let dir = tempdir().unwrap();
        let ops = EventOps::new(JsonDirStore::open(dir.path()).unwrap());

        let mut seed = make_test_event("", "Weekly Sync");
        seed.repeat = Repeat::new(
            RepeatKind::Weekly,
            1,
            Some(NaiveDate::from_ymd_opt(2025, 4, 3).unwrap()),
        );
        let created = ops.save(seed).await.unwrap();
        assert_eq!(created.len(), 3);
        assert!(dir.path().join("2025-03-20__weekly-sync.json").exists());
        assert!(dir.path().join("2025-03-27__weekly-sync.json").exists());
        assert!(dir.path().join("2025-04-03__weekly-sync.json").exists());

        let group = created[0].group_id.clone().unwrap();
        let patch = EventPatch {
            location: Some("Room 4".to_string()),
            ..Default::default()
        };
        let updated = ops.update_group(&group, &patch).await.unwrap();
        assert_eq!(updated.len(), 3);

        let all = ops.fetch_all().await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|e| e.location == "Room 4"));
        assert!(all.iter().all(|e| e.group_id.as_deref() == Some(group.as_str())));
        let dates: Vec<NaiveDate> = all.iter().map(|e| e.date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 27).unwrap(),
                NaiveDate::from_ymd_opt(2025, 4, 3).unwrap(),
            ]
        );
    }
}
