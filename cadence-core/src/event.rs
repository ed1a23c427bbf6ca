//! Event record types.
//!
//! These are the records the whole engine operates on: one `Event` per
//! concrete dated occurrence, with an optional repeat rule and an optional
//! group id tying recurring siblings together. Stores persist them, the
//! recurrence module produces them, and the group operations mutate them.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::CadenceError;

/// A calendar event instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier. Empty on drafts; the store assigns one on create.
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: String,
    /// Calendar date of this occurrence (`YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Start of the occupied slot, inclusive (`HH:MM`).
    #[serde(with = "time_hm")]
    pub start_time: NaiveTime,
    /// End of the occupied slot, exclusive (`HH:MM`).
    #[serde(with = "time_hm")]
    pub end_time: NaiveTime,
    /// Minutes before `start_time` to remind. Opaque to the engine.
    #[serde(default)]
    pub notification_time: u32,
    pub repeat: Repeat,
    /// Recurrence group this instance belongs to. `None` means standalone.
    /// Every instance of one expansion carries the same value, the first
    /// included, so membership queries never special-case the seed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

impl Event {
    /// Whether this instance still participates in group-wide edits.
    pub fn is_recurring(&self) -> bool {
        self.repeat.kind != RepeatKind::None
    }
}

/// Recurrence rule attached to an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repeat {
    #[serde(rename = "type")]
    pub kind: RepeatKind,
    /// Step between occurrences, in units of `kind`. Must be ≥ 1 for any
    /// kind other than `None`.
    pub interval: u32,
    /// Last date an occurrence may fall on, inclusive. When absent the
    /// generators apply their frequency-specific default horizon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl Repeat {
    /// The non-repeating rule. What detachment writes back.
    pub fn none() -> Self {
        Repeat {
            kind: RepeatKind::None,
            interval: 0,
            end_date: None,
        }
    }

    pub fn new(kind: RepeatKind, interval: u32, end_date: Option<NaiveDate>) -> Self {
        Repeat {
            kind,
            interval,
            end_date,
        }
    }
}

impl Default for Repeat {
    fn default() -> Self {
        Repeat::none()
    }
}

/// The five supported recurrence frequencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatKind {
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RepeatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepeatKind::None => "none",
            RepeatKind::Daily => "daily",
            RepeatKind::Weekly => "weekly",
            RepeatKind::Monthly => "monthly",
            RepeatKind::Yearly => "yearly",
        }
    }
}

impl FromStr for RepeatKind {
    type Err = CadenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(RepeatKind::None),
            "daily" => Ok(RepeatKind::Daily),
            "weekly" => Ok(RepeatKind::Weekly),
            "monthly" => Ok(RepeatKind::Monthly),
            "yearly" => Ok(RepeatKind::Yearly),
            other => Err(CadenceError::UnknownRepeatKind(other.to_string())),
        }
    }
}

impl fmt::Display for RepeatKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Partial update applied by the edit operations. `None` leaves the field
/// untouched. Group-defining state (`repeat`, `group_id`) is deliberately
/// not patchable; `date` is honored only by single-instance edits.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub notification_time: Option<u32>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.category.is_none()
            && self.date.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.notification_time.is_none()
    }

    /// Overwrite `event`'s fields with every value the patch carries.
    pub fn apply_to(&self, event: &mut Event) {
        if let Some(title) = &self.title {
            event.title = title.clone();
        }
        if let Some(description) = &self.description {
            event.description = description.clone();
        }
        if let Some(location) = &self.location {
            event.location = location.clone();
        }
        if let Some(category) = &self.category {
            event.category = category.clone();
        }
        if let Some(date) = self.date {
            event.date = date;
        }
        if let Some(start_time) = self.start_time {
            event.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            event.end_time = end_time;
        }
        if let Some(notification_time) = self.notification_time {
            event.notification_time = notification_time;
        }
    }
}

/// `HH:MM` (de)serialization for event times.
mod time_hm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_event() -> Event {
        Event {
            id: "evt-1".to_string(),
            title: "Standup".to_string(),
            description: String::new(),
            location: "Room A".to_string(),
            category: "work".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            notification_time: 10,
            repeat: Repeat::new(RepeatKind::Weekly, 1, None),
            group_id: None,
        }
    }

    // --- serde shape ---

    #[test]
    fn times_serialize_as_hh_mm() {
        let json = serde_json::to_value(make_event()).unwrap();
        assert_eq!(json["startTime"], "09:00");
        assert_eq!(json["endTime"], "09:30");
        assert_eq!(json["date"], "2025-11-03");
        assert_eq!(json["repeat"]["type"], "weekly");
    }

    #[test]
    fn group_id_omitted_when_standalone() {
        let json = serde_json::to_value(make_event()).unwrap();
        assert!(json.get("groupId").is_none());
    }

    #[test]
    fn round_trips_through_json() {
        let mut event = make_event();
        event.group_id = Some("grp".to_string());
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    // --- repeat kind parsing ---

    #[test]
    fn parses_all_five_kinds() {
        for (s, kind) in [
            ("none", RepeatKind::None),
            ("daily", RepeatKind::Daily),
            ("weekly", RepeatKind::Weekly),
            ("monthly", RepeatKind::Monthly),
            ("yearly", RepeatKind::Yearly),
        ] {
            assert_eq!(s.parse::<RepeatKind>().unwrap(), kind);
        }
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = "fortnightly".parse::<RepeatKind>().unwrap_err();
        assert!(matches!(err, CadenceError::UnknownRepeatKind(s) if s == "fortnightly"));
        assert!("".parse::<RepeatKind>().is_err());
    }

    // --- patch application ---

    #[test]
    fn patch_overwrites_only_present_fields() {
        let mut event = make_event();
        let patch = EventPatch {
            title: Some("Moved standup".to_string()),
            location: Some("Room B".to_string()),
            ..EventPatch::default()
        };
        patch.apply_to(&mut event);

        assert_eq!(event.title, "Moved standup");
        assert_eq!(event.location, "Room B");
        assert_eq!(event.category, "work");
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2025, 11, 3).unwrap());
    }

    #[test]
    fn empty_patch_reports_empty() {
        assert!(EventPatch::default().is_empty());
        let patch = EventPatch {
            description: Some("x".to_string()),
            ..EventPatch::default()
        };
        assert!(!patch.is_empty());
    }
}
