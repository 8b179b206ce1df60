//! Directory-backed storage for indexed records (to-dos and events).
//!
//! Each record lives in its own `<sanitized-name>.toml` file inside the
//! record kind's directory, next to the kind's [`Ledger`]. Lookups by index
//! scan the directory; the record count is small enough that this stays fast.
//! Call sites go through [`RecordRepository`] so the storage can change later.

use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{WhowError, WhowResult};
use crate::fs::{record_files, record_path, sanitize_name, validate_name, write_atomic};
use crate::ledger::{LEDGER_FILE, Ledger};

/// Stem reserved for the ledger file.
const RESERVED_NAME: &str = "index";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Todo,
    Event,
}

impl RecordKind {
    /// Directory name under the data tree.
    pub fn dir_name(&self) -> &'static str {
        match self {
            RecordKind::Todo => "todos",
            RecordKind::Event => "events",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Todo => "to-do",
            RecordKind::Event => "event",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A record stored one-per-file and addressed by a ledger index.
pub trait Record: Serialize + DeserializeOwned + Clone {
    const KIND: RecordKind;

    fn index(&self) -> u32;
    fn set_index(&mut self, index: u32);
    fn name(&self) -> &str;

    /// Recompute derived fields. Called before every write and after every read.
    fn refresh(&mut self, _now: NaiveDateTime) {}
}

/// How [`RecordRepository::register`] treats existing state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegisterOptions {
    /// Replace a record with the same name instead of failing.
    pub force: bool,
    /// Keep the record's current index instead of allocating one.
    pub use_old_index: bool,
}

impl RegisterOptions {
    pub fn overwrite() -> Self {
        RegisterOptions {
            force: true,
            use_old_index: false,
        }
    }

    /// Rewrite a record in place, keeping its index.
    pub fn rewrite() -> Self {
        RegisterOptions {
            force: true,
            use_old_index: true,
        }
    }
}

/// Result of a successful write.
#[derive(Debug, Clone)]
pub struct Written<R> {
    pub record: R,
    pub path: PathBuf,
    /// TOML that was written.
    pub content: String,
}

pub trait RecordRepository<R: Record> {
    /// Persist `record`, allocating an index unless `use_old_index` is set.
    /// Fails with `AlreadyExists` when a record with the same name exists and
    /// `force` is not set; nothing is written in that case.
    fn register(&self, record: R, options: RegisterOptions) -> WhowResult<Written<R>>;

    /// Remove the record holding `index` and recycle the index.
    fn delete(&self, index: u32) -> WhowResult<R>;

    fn get(&self, index: u32) -> WhowResult<R>;

    /// All readable records, sorted by index.
    fn list(&self) -> WhowResult<Vec<R>>;

    /// Apply `edit` to the record holding `index` and rewrite it, keeping its index.
    fn update<F>(&self, index: u32, edit: F) -> WhowResult<Written<R>>
    where
        F: FnOnce(&mut R);
}

/// [`RecordRepository`] over a directory of TOML files.
pub struct DirStore<R> {
    dir: PathBuf,
    _record: PhantomData<R>,
}

impl<R> Clone for DirStore<R> {
    fn clone(&self) -> Self {
        DirStore {
            dir: self.dir.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: Record> DirStore<R> {
    /// Store rooted at `<data_dir>/<kind dir>`.
    pub fn new(data_dir: &Path) -> Self {
        DirStore {
            dir: data_dir.join(R::KIND.dir_name()),
            _record: PhantomData,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ledger_path(&self) -> PathBuf {
        Ledger::path_in(&self.dir)
    }

    pub fn ledger(&self) -> Ledger {
        Ledger::load(&self.ledger_path())
    }

    /// Path of the record file holding `index`.
    pub fn resolve_by_index(&self, index: u32) -> WhowResult<PathBuf> {
        self.entries()?
            .into_iter()
            .find(|(_, record)| record.index() == index)
            .map(|(path, _)| path)
            .ok_or(WhowError::IndexNotFound {
                kind: R::KIND,
                index,
            })
    }

    /// Path a record with this name is stored at.
    pub fn path_for(&self, name: &str) -> WhowResult<PathBuf> {
        validate_name(R::KIND.label(), name)?;

        let stem = sanitize_name(name);
        if stem.to_lowercase() == RESERVED_NAME {
            return Err(WhowError::FatalConfig(format!(
                "invalid {} entry name: {}",
                R::KIND.label(),
                name
            )));
        }

        Ok(record_path(&self.dir, &stem))
    }

    fn read(path: &Path) -> WhowResult<R> {
        let content = std::fs::read_to_string(path)?;
        let mut record: R = toml::from_str(&content).map_err(|e| WhowError::CorruptRecord {
            path: path.to_path_buf(),
            reason: e.message().to_string(),
        })?;
        record.refresh(now());
        Ok(record)
    }

    /// Every readable record with its path. Corrupt files are skipped.
    fn entries(&self) -> WhowResult<Vec<(PathBuf, R)>> {
        let mut entries = Vec::new();

        for path in record_files(&self.dir)? {
            if path.file_name().is_some_and(|n| n == LEDGER_FILE) {
                continue;
            }

            match Self::read(&path) {
                Ok(record) => entries.push((path, record)),
                Err(e) => tracing::warn!("Skipping {}: {e}", path.display()),
            }
        }

        Ok(entries)
    }

    fn write(&self, path: &Path, record: &R) -> WhowResult<String> {
        let content = toml::to_string(record)?;
        write_atomic(path, &content)?;
        tracing::debug!("Wrote {} #{} to {}", R::KIND, record.index(), path.display());
        Ok(content)
    }

    fn allocate(&self, target: &Path, replaced: Option<&R>) -> WhowResult<u32> {
        let ledger_path = self.ledger_path();
        let mut ledger = Ledger::load(&ledger_path);

        if let Some(old) = replaced {
            ledger.release(old.index());
        }

        let taken: HashSet<u32> = self
            .entries()?
            .into_iter()
            .filter(|(path, _)| path != target)
            .map(|(_, record)| record.index())
            .collect();

        let index = ledger.allocate_excluding(&taken);
        ledger.save(&ledger_path)?;
        tracing::debug!("Allocated {} index {index}", R::KIND);

        Ok(index)
    }

    fn release(&self, index: u32) -> WhowResult<()> {
        let ledger_path = self.ledger_path();
        let mut ledger = Ledger::load(&ledger_path);

        if !ledger.release(index) {
            tracing::debug!("{} index {index} was not in the ledger", R::KIND);
            return Ok(());
        }

        ledger.save(&ledger_path)
    }
}

impl<R: Record> RecordRepository<R> for DirStore<R> {
    fn register(&self, mut record: R, options: RegisterOptions) -> WhowResult<Written<R>> {
        let path = self.path_for(record.name())?;

        let replaced = if path.exists() {
            if !options.force {
                return Err(WhowError::AlreadyExists {
                    kind: R::KIND.label(),
                    name: record.name().to_string(),
                });
            }
            Self::read(&path).ok()
        } else {
            None
        };

        let allocated = if options.use_old_index {
            None
        } else {
            let index = self.allocate(&path, replaced.as_ref())?;
            record.set_index(index);
            Some(index)
        };

        record.refresh(now());

        let content = match self.write(&path, &record) {
            Ok(content) => content,
            Err(e) => {
                if let Some(index) = allocated {
                    if let Err(release_err) = self.release(index) {
                        tracing::warn!(
                            "Could not release {} index {index} after a failed write: {release_err}",
                            R::KIND
                        );
                    }
                }
                return Err(e);
            }
        };

        Ok(Written {
            record,
            path,
            content,
        })
    }

    fn delete(&self, index: u32) -> WhowResult<R> {
        let path = self.resolve_by_index(index)?;
        let record = Self::read(&path)?;

        std::fs::remove_file(&path)?;
        self.release(index)?;

        Ok(record)
    }

    fn get(&self, index: u32) -> WhowResult<R> {
        let path = self.resolve_by_index(index)?;
        Self::read(&path)
    }

    fn list(&self) -> WhowResult<Vec<R>> {
        let mut records: Vec<R> = self.entries()?.into_iter().map(|(_, r)| r).collect();
        records.sort_by_key(|r| r.index());
        Ok(records)
    }

    fn update<F>(&self, index: u32, edit: F) -> WhowResult<Written<R>>
    where
        F: FnOnce(&mut R),
    {
        let old_path = self.resolve_by_index(index)?;
        let mut record = Self::read(&old_path)?;

        edit(&mut record);
        record.set_index(index);

        let new_path = self.path_for(record.name())?;
        if new_path == old_path {
            return self.register(record, RegisterOptions::rewrite());
        }

        let written = self.register(
            record,
            RegisterOptions {
                force: false,
                use_old_index: true,
            },
        )?;
        std::fs::remove_file(&old_path)?;

        Ok(written)
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
