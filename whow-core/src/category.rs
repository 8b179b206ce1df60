//! User-defined categories, one file each under `categories/`.
//!
//! Categories are identified by their lowercased name. Lookups scan the
//! directory and compare stored names rather than trusting the filename.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{WhowError, WhowResult};
use crate::fs::{file_stem, record_files, record_path, sanitize_name, validate_name, write_atomic};

const KIND: &str = "category";

/// Category every fresh data tree starts with.
pub const IMPORTANT: &str = "important";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub color: Color,
}

impl Category {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Category {
            name: name.into(),
            color,
        }
    }

    /// Identity used for uniqueness and lookups.
    pub fn id(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.id() == name.trim().to_lowercase()
    }
}

pub struct CategoryStore {
    dir: PathBuf,
}

impl CategoryStore {
    pub fn new(data_dir: &Path) -> Self {
        CategoryStore {
            dir: data_dir.join("categories"),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `category`, returning the TOML written. Fails with
    /// `AlreadyExists` when the name is taken and `force` is not set.
    pub fn register(&self, category: &Category, force: bool) -> WhowResult<String> {
        validate_name(KIND, &category.name)?;

        let existing = self.find_file(&category.name)?;
        if existing.is_some() && !force {
            return Err(WhowError::AlreadyExists {
                kind: KIND,
                name: category.name.clone(),
            });
        }

        let path = record_path(&self.dir, &sanitize_name(&category.name).to_lowercase());
        let content = toml::to_string(category)?;

        // A legacy file whose stem differs only in case is superseded.
        if let Some(old) = existing.filter(|old| *old != path) {
            std::fs::remove_file(&old)?;
        }
        write_atomic(&path, &content)?;

        tracing::debug!("Wrote category {} to {}", category.name, path.display());
        Ok(content)
    }

    pub fn exists(&self, name: &str) -> bool {
        matches!(self.find_file(name), Ok(Some(_)))
    }

    /// Category whose stored name matches `name`, ignoring case.
    pub fn resolve(&self, name: &str) -> WhowResult<Category> {
        self.entries()?
            .into_iter()
            .map(|(_, category)| category)
            .find(|category| category.matches(name))
            .ok_or_else(|| WhowError::NotFound {
                kind: KIND,
                name: name.to_string(),
            })
    }

    pub fn delete(&self, name: &str) -> WhowResult<()> {
        let path = self.find_file(name)?.ok_or_else(|| WhowError::NotFound {
            kind: KIND,
            name: name.to_string(),
        })?;

        std::fs::remove_file(&path)?;
        Ok(())
    }

    /// Every readable category, sorted by name. Corrupt files are skipped.
    pub fn list(&self) -> WhowResult<Vec<Category>> {
        let mut categories: Vec<Category> =
            self.entries()?.into_iter().map(|(_, c)| c).collect();
        categories.sort_by_key(|c| c.id());
        Ok(categories)
    }

    /// File backing `name`, matched on the sanitized stem ignoring case.
    fn find_file(&self, name: &str) -> WhowResult<Option<PathBuf>> {
        let wanted = sanitize_name(name).to_lowercase();

        Ok(record_files(&self.dir)?
            .into_iter()
            .find(|path| file_stem(path).is_some_and(|stem| stem.to_lowercase() == wanted)))
    }

    fn entries(&self) -> WhowResult<Vec<(PathBuf, Category)>> {
        let mut entries = Vec::new();

        for path in record_files(&self.dir)? {
            match read(&path) {
                Ok(category) => entries.push((path, category)),
                Err(e) => tracing::warn!("The category file {} is corrupted: {e}", path.display()),
            }
        }

        Ok(entries)
    }
}

fn read(path: &Path) -> WhowResult<Category> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| WhowError::CorruptRecord {
        path: path.to_path_buf(),
        reason: e.message().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, CategoryStore) {
        let tmp = TempDir::new().unwrap();
        let store = CategoryStore::new(tmp.path());
        (tmp, store)
    }

    #[test]
    fn register_then_resolve_round_trips() {
        let (_tmp, store) = store();
        let category = Category::new("Side Projects", Color::Cyan);

        let content = store.register(&category, false).unwrap();

        assert!(content.contains("color = \"cyan\""));
        assert!(store.dir().join("side_projects.toml").exists());
        assert_eq!(store.resolve("side projects").unwrap(), category);
        assert!(store.exists("SIDE PROJECTS"));
    }

    #[test]
    fn duplicate_requires_force() {
        let (_tmp, store) = store();
        store
            .register(&Category::new("important", Color::Red), false)
            .unwrap();

        let err = store
            .register(&Category::new("Important", Color::Blue), false)
            .unwrap_err();
        assert!(matches!(err, WhowError::AlreadyExists { .. }));
        assert_eq!(store.resolve("important").unwrap().color, Color::Red);

        store
            .register(&Category::new("important", Color::Blue), true)
            .unwrap();
        assert_eq!(store.resolve("important").unwrap().color, Color::Blue);
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn force_replaces_legacy_mixed_case_file() {
        let (_tmp, store) = store();
        std::fs::create_dir_all(store.dir()).unwrap();
        std::fs::write(
            store.dir().join("Work.toml"),
            "name = \"work\"\ncolor = \"Green\"\n",
        )
        .unwrap();

        assert!(store.exists("work"));
        store.register(&Category::new("work", Color::Yellow), true).unwrap();

        let all = store.list().unwrap();
        assert_eq!(all, vec![Category::new("work", Color::Yellow)]);
    }

    #[test]
    fn delete_and_missing_lookups() {
        let (_tmp, store) = store();
        store.register(&Category::new("errands", Color::Green), false).unwrap();

        store.delete("Errands").unwrap();

        assert!(!store.exists("errands"));
        assert!(matches!(store.resolve("errands"), Err(WhowError::NotFound { .. })));
        assert!(matches!(store.delete("errands"), Err(WhowError::NotFound { .. })));
    }

    #[test]
    fn list_skips_corrupt_files() {
        let (_tmp, store) = store();
        store.register(&Category::new("b", Color::Blue), false).unwrap();
        store.register(&Category::new("a", Color::Black), false).unwrap();
        std::fs::write(store.dir().join("broken.toml"), "color = \"red\"\n").unwrap();
        std::fs::write(store.dir().join("bad_color.toml"), "name = \"x\"\ncolor = \"plaid\"\n").unwrap();

        let names: Vec<_> = store.list().unwrap().into_iter().map(|c| c.name).collect();

        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn missing_directory_is_empty() {
        let (_tmp, store) = store();
        assert!(store.list().unwrap().is_empty());
        assert!(!store.exists("anything"));
    }
}
