//! Calendar events and their store.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::WhowResult;
use crate::record::{DirStore, Record, RecordKind, RecordRepository};

pub type EventStore = DirStore<EventEntry>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEntry {
    #[serde(default)]
    pub index: u32,
    pub name: String,
    #[serde(rename = "event_from")]
    pub start: NaiveDateTime,
    /// `None` for full-day events, stored as `"fullday"`.
    #[serde(rename = "event_to", with = "event_to", default)]
    pub end: Option<NaiveDateTime>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub full_day: bool,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl EventEntry {
    pub fn new(
        name: impl Into<String>,
        start: NaiveDateTime,
        end: Option<NaiveDateTime>,
        description: impl Into<String>,
        categories: Vec<String>,
    ) -> Self {
        EventEntry {
            index: 0,
            name: name.into(),
            start,
            end,
            description: description.into(),
            full_day: end.is_none(),
            categories,
        }
    }

    /// Whether the event touches `date`.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        let first = self.start.date();
        let last = self.end.map_or(first, |end| end.date().max(first));
        (first..=last).contains(&date)
    }

    /// Whether the event is over at `now`. Full-day events last until midnight.
    pub fn is_past(&self, now: NaiveDateTime) -> bool {
        match self.end {
            Some(end) => end < now,
            None => self.start.date() < now.date(),
        }
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.eq_ignore_ascii_case(name))
    }
}

impl Record for EventEntry {
    const KIND: RecordKind = RecordKind::Event;

    fn index(&self) -> u32 {
        self.index
    }

    fn set_index(&mut self, index: u32) {
        self.index = index;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn refresh(&mut self, _now: NaiveDateTime) {
        self.full_day = self.end.is_none();
    }
}

/// Event specific operations on top of any [`RecordRepository`].
pub trait EventRepository: RecordRepository<EventEntry> {
    /// Delete every event that is over at `now`, returning what was removed.
    fn clean_past(&self, now: NaiveDateTime) -> WhowResult<Vec<EventEntry>> {
        let past: Vec<u32> = self
            .list()?
            .into_iter()
            .filter(|e| e.is_past(now))
            .map(|e| e.index)
            .collect();

        past.into_iter().map(|index| self.delete(index)).collect()
    }

    /// Events touching `date`, earliest first.
    fn on_date(&self, date: NaiveDate) -> WhowResult<Vec<EventEntry>> {
        let mut events: Vec<EventEntry> = self
            .list()?
            .into_iter()
            .filter(|e| e.occurs_on(date))
            .collect();
        events.sort_by_key(|e| e.start);
        Ok(events)
    }
}

impl<T: RecordRepository<EventEntry>> EventRepository for T {}

mod event_to {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FULL_DAY: &str = "fullday";
    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S: Serializer>(end: &Option<NaiveDateTime>, s: S) -> Result<S::Ok, S::Error> {
        match end {
            Some(end) => s.serialize_str(&end.format(FORMAT).to_string()),
            None => s.serialize_str(FULL_DAY),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw = String::deserialize(d)?;
        let raw = raw.trim();

        if raw.is_empty() || raw.eq_ignore_ascii_case(FULL_DAY) {
            return Ok(None);
        }

        NaiveDateTime::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WhowError;
    use crate::record::RegisterOptions;
    use tempfile::TempDir;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn store() -> (TempDir, EventStore) {
        let tmp = TempDir::new().unwrap();
        let store = EventStore::new(tmp.path());
        (tmp, store)
    }

    #[test]
    fn full_day_event_is_stored_as_fullday() {
        let (_tmp, store) = store();
        let event = EventEntry::new("Holiday", at(2026, 12, 25, 0, 0), None, "", vec![]);

        let written = store.register(event, RegisterOptions::default()).unwrap();

        assert!(written.content.contains("event_to = \"fullday\""));
        assert!(written.content.contains("full_day = true"));
        let loaded = store.get(written.record.index).unwrap();
        assert_eq!(loaded.end, None);
        assert!(loaded.full_day);
    }

    #[test]
    fn timed_event_round_trips() {
        let (_tmp, store) = store();
        let event = EventEntry::new(
            "Standup",
            at(2026, 3, 2, 9, 0),
            Some(at(2026, 3, 2, 9, 15)),
            "daily sync",
            vec!["work".into()],
        );

        let written = store.register(event.clone(), RegisterOptions::default()).unwrap();
        let loaded = store.get(written.record.index).unwrap();

        assert_eq!(loaded, EventEntry { index: 0, ..event });
        assert!(written.content.contains("event_from = \"2026-03-02T09:00:00\""));
        assert!(written.content.contains("event_to = \"2026-03-02T09:15:00\""));
    }

    #[test]
    fn inconsistent_full_day_flag_is_corrected_on_load() {
        let (_tmp, store) = store();
        std::fs::create_dir_all(store.dir()).unwrap();
        std::fs::write(
            store.dir().join("Trip.toml"),
            "index = 3\nname = \"Trip\"\nevent_from = \"2026-05-01T08:00:00\"\nevent_to = \"fullday\"\nfull_day = false\n",
        )
        .unwrap();

        let trip = store.get(3).unwrap();

        assert!(trip.full_day);
        assert_eq!(trip.description, "");
    }

    #[test]
    fn event_indexes_are_independent_of_todos() {
        let tmp = TempDir::new().unwrap();
        let events = EventStore::new(tmp.path());
        let todos = crate::todo::TodoStore::new(tmp.path());

        todos
            .register(
                crate::todo::TodoEntry::new("a", None, vec![]),
                RegisterOptions::default(),
            )
            .unwrap();
        let event = events
            .register(
                EventEntry::new("b", at(2026, 1, 1, 10, 0), None, "", vec![]),
                RegisterOptions::default(),
            )
            .unwrap();

        assert_eq!(event.record.index, 0);
        assert!(matches!(
            events.delete(5),
            Err(WhowError::IndexNotFound { index: 5, .. })
        ));
    }

    #[test]
    fn clean_past_removes_finished_events() {
        let (_tmp, store) = store();
        let now = at(2026, 6, 15, 12, 0);
        let events = [
            EventEntry::new("done", at(2026, 6, 15, 8, 0), Some(at(2026, 6, 15, 9, 0)), "", vec![]),
            EventEntry::new("ongoing", at(2026, 6, 15, 11, 0), Some(at(2026, 6, 15, 13, 0)), "", vec![]),
            EventEntry::new("today all day", at(2026, 6, 15, 0, 0), None, "", vec![]),
            EventEntry::new("yesterday", at(2026, 6, 14, 0, 0), None, "", vec![]),
        ];
        for event in events {
            store.register(event, RegisterOptions::default()).unwrap();
        }

        let removed: Vec<_> = store
            .clean_past(now)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();

        assert_eq!(removed, vec!["done", "yesterday"]);
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn occurs_on_spans_multiple_days() {
        let event = EventEntry::new(
            "conference",
            at(2026, 9, 1, 9, 0),
            Some(at(2026, 9, 3, 17, 0)),
            "",
            vec![],
        );

        assert!(event.occurs_on(NaiveDate::from_ymd_opt(2026, 9, 2).unwrap()));
        assert!(!event.occurs_on(NaiveDate::from_ymd_opt(2026, 9, 4).unwrap()));
    }
}
