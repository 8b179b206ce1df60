//! Everything the dashboard shows, gathered in one pass over the data tree.

use std::collections::BTreeSet;

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};

use crate::category::{Category, IMPORTANT};
use crate::config::Section;
use crate::error::WhowResult;
use crate::event::EventEntry;
use crate::record::RecordRepository;
use crate::todo::TodoEntry;
use crate::whow::Whow;

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub todos: Vec<TodoEntry>,
    pub events: Vec<EventEntry>,
    pub categories: Vec<Category>,
    pub sections: Vec<Section>,
    pub now: NaiveDateTime,
}

impl Dashboard {
    pub fn load(whow: &Whow) -> WhowResult<Self> {
        let mut events = whow.events().list()?;
        events.sort_by_key(|e| (e.start, e.index));

        Ok(Dashboard {
            todos: whow.todos().list()?,
            events,
            categories: whow.categories().list()?,
            sections: whow.config().sections.clone(),
            now: Local::now().naive_local(),
        })
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }

    /// Category a record refers to, if it still exists.
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.matches(name))
    }

    pub fn shows(&self, section: Section) -> bool {
        self.sections.contains(&section)
    }

    pub fn important_todos(&self) -> Vec<&TodoEntry> {
        self.todos
            .iter()
            .filter(|t| t.has_category(IMPORTANT))
            .collect()
    }

    /// To-dos for the `todos` section. Important ones move to their own
    /// section when it is configured.
    pub fn regular_todos(&self) -> Vec<&TodoEntry> {
        let split = self.shows(Section::Important);
        self.todos
            .iter()
            .filter(|t| !(split && t.has_category(IMPORTANT)))
            .collect()
    }

    /// Days of `year`/`month` touched by at least one event.
    pub fn days_with_events(&self, year: i32, month: u32) -> BTreeSet<u32> {
        let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
            return BTreeSet::new();
        };

        first
            .iter_days()
            .take_while(|day| day.month() == month)
            .filter(|day| self.events.iter().any(|e| e.occurs_on(*day)))
            .map(|day| day.day())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn dashboard(sections: Vec<Section>) -> Dashboard {
        let mut urgent = TodoEntry::new("pay rent", None, vec!["Important".into()]);
        urgent.index = 1;

        Dashboard {
            todos: vec![TodoEntry::new("read", None, vec![]), urgent],
            events: vec![
                EventEntry::new("trip", at(2026, 4, 29, 8), Some(at(2026, 5, 2, 18)), "", vec![]),
                EventEntry::new("dentist", at(2026, 5, 20, 9), Some(at(2026, 5, 20, 10)), "", vec![]),
            ],
            categories: vec![Category::new("important", Color::Red)],
            sections,
            now: at(2026, 5, 1, 12),
        }
    }

    #[test]
    fn important_todos_split_only_when_section_configured() {
        let merged = dashboard(vec![Section::Todos]);
        assert_eq!(merged.regular_todos().len(), 2);

        let split = dashboard(vec![Section::Todos, Section::Important]);
        let regular: Vec<_> = split.regular_todos().iter().map(|t| t.name.as_str()).collect();
        let important: Vec<_> = split.important_todos().iter().map(|t| t.name.as_str()).collect();

        assert_eq!(regular, vec!["read"]);
        assert_eq!(important, vec!["pay rent"]);
    }

    #[test]
    fn days_with_events_include_spans_into_the_month() {
        let dashboard = dashboard(vec![]);

        let days: Vec<_> = dashboard.days_with_events(2026, 5).into_iter().collect();

        assert_eq!(days, vec![1, 2, 20]);
        assert!(dashboard.days_with_events(2026, 13).is_empty());
    }

    #[test]
    fn deleted_category_lookup_is_none() {
        let dashboard = dashboard(vec![]);

        assert_eq!(dashboard.category("IMPORTANT").unwrap().color, Color::Red);
        assert!(dashboard.category("work").is_none());
    }
}
