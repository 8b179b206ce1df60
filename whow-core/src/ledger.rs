//! Index ledger: hands out small integer identifiers for records and recycles
//! them once the record is deleted.
//!
//! The ledger is persisted as `index.toml` next to the records it tracks:
//!
//! ```toml
//! indexes = [0, -1, 2]
//! ```
//!
//! A used slot holds its identifier, a free slot holds [`SENTINEL`]. The
//! ledger is a cache; the record files are the source of truth, so a missing
//! or unreadable ledger simply starts over empty.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::WhowResult;
use crate::fs::write_atomic;

pub const LEDGER_FILE: &str = "index.toml";

/// Value of a free slot.
pub const SENTINEL: i64 = -1;

#[derive(Serialize, Deserialize)]
struct LedgerFile {
    indexes: Vec<toml::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ledger {
    slots: Vec<Option<u32>>,
}

impl Ledger {
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(LEDGER_FILE)
    }

    /// Load the ledger at `path`. Missing or invalid ledgers load as empty.
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ledger::default(),
            Err(e) => {
                tracing::warn!("Could not read {}: {e}. Starting a fresh ledger", path.display());
                return Ledger::default();
            }
        };

        match Self::parse(&content) {
            Ok(ledger) => ledger,
            Err(reason) => {
                tracing::warn!("Ignoring invalid ledger {}: {reason}", path.display());
                Ledger::default()
            }
        }
    }

    fn parse(content: &str) -> Result<Self, String> {
        let file: LedgerFile = toml::from_str(content).map_err(|e| e.to_string())?;

        let slots = file
            .indexes
            .iter()
            .enumerate()
            .map(|(position, value)| match value.as_integer() {
                Some(SENTINEL) => Ok(None),
                Some(n) => u32::try_from(n)
                    .map(Some)
                    .map_err(|_| format!("slot {position} holds invalid value {n}")),
                None => Err(format!("slot {position} holds non-integer value {value}")),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Ledger { slots })
    }

    pub fn save(&self, path: &Path) -> WhowResult<()> {
        let file = LedgerFile {
            indexes: self
                .slots
                .iter()
                .map(|slot| toml::Value::Integer(slot.map_or(SENTINEL, i64::from)))
                .collect(),
        };

        write_atomic(path, &toml::to_string(&file)?)
    }

    /// Allocate an identifier, filling the first free slot before appending.
    pub fn allocate(&mut self) -> u32 {
        if let Some(position) = self.slots.iter().position(Option::is_none) {
            let index = position as u32;
            self.slots[position] = Some(index);
            return index;
        }

        let index = self.slots.len() as u32;
        self.slots.push(Some(index));
        index
    }

    /// Allocate an identifier that is not in `taken`. Skipped identifiers stay
    /// marked as used, since something already holds them.
    pub fn allocate_excluding(&mut self, taken: &HashSet<u32>) -> u32 {
        loop {
            let index = self.allocate();
            if !taken.contains(&index) {
                return index;
            }
            tracing::debug!("Ledger skipped index {index}, already held by a record");
        }
    }

    /// Mark the slot holding `index` as free. Returns false if no slot held it.
    pub fn release(&mut self, index: u32) -> bool {
        match self.slots.iter_mut().find(|slot| **slot == Some(index)) {
            Some(slot) => {
                *slot = None;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, index: u32) -> bool {
        self.slots.contains(&Some(index))
    }

    pub fn in_use(&self) -> impl Iterator<Item = u32> + '_ {
        self.slots.iter().filter_map(|slot| *slot)
    }

    pub fn slots(&self) -> &[Option<u32>] {
        &self.slots
    }
}
