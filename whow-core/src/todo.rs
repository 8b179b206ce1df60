//! To-do entries and their store.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::WhowResult;
use crate::record::{DirStore, Record, RecordKind, RecordRepository, RegisterOptions, Written};

pub type TodoStore = DirStore<TodoEntry>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoEntry {
    #[serde(default)]
    pub index: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDate>,
    /// Names of the categories this to-do belongs to.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Derived from `due`; kept in the file for other readers.
    #[serde(default)]
    pub overdue: bool,
    #[serde(default)]
    pub ticked: bool,
}

impl TodoEntry {
    pub fn new(name: impl Into<String>, due: Option<NaiveDate>, categories: Vec<String>) -> Self {
        TodoEntry {
            index: 0,
            name: name.into(),
            due,
            categories,
            overdue: false,
            ticked: false,
        }
    }

    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        self.due.is_some_and(|due| today > due)
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.eq_ignore_ascii_case(name))
    }
}

impl Record for TodoEntry {
    const KIND: RecordKind = RecordKind::Todo;

    fn index(&self) -> u32 {
        self.index
    }

    fn set_index(&mut self, index: u32) {
        self.index = index;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn refresh(&mut self, now: NaiveDateTime) {
        self.overdue = self.is_overdue_on(now.date());
    }
}

/// To-do specific operations on top of any [`RecordRepository`].
pub trait TodoRepository: RecordRepository<TodoEntry> {
    /// Flip the ticked state of a to-do, rewriting it under the same index.
    fn toggle_ticked(&self, index: u32) -> WhowResult<Written<TodoEntry>> {
        let mut todo = self.get(index)?;
        todo.ticked = !todo.ticked;
        self.register(todo, RegisterOptions::rewrite())
    }

    /// Delete every ticked to-do, returning what was removed.
    fn clean_ticked(&self) -> WhowResult<Vec<TodoEntry>> {
        let ticked: Vec<u32> = self
            .list()?
            .into_iter()
            .filter(|t| t.ticked)
            .map(|t| t.index)
            .collect();

        ticked.into_iter().map(|index| self.delete(index)).collect()
    }
}

impl<T: RecordRepository<TodoEntry>> TodoRepository for T {}
