//! Whow root handle: owns the configuration and hands out stores.

use std::path::{Path, PathBuf};

use crate::category::{Category, CategoryStore, IMPORTANT};
use crate::color::Color;
use crate::config::WhowConfig;
use crate::error::WhowResult;
use crate::event::EventStore;
use crate::ledger::Ledger;
use crate::record::RecordKind;
use crate::todo::TodoStore;

#[derive(Debug, Clone)]
pub struct Whow {
    config: WhowConfig,
    config_path: PathBuf,
}

impl Whow {
    /// Load using the config at the platform default location.
    pub fn load() -> WhowResult<Self> {
        Self::load_from(&WhowConfig::config_path()?)
    }

    /// Load using the config at `config_path`. Nothing is written when the
    /// file is missing.
    pub fn load_from(config_path: &Path) -> WhowResult<Self> {
        let config = WhowConfig::load(config_path)?;

        Ok(Whow {
            config,
            config_path: config_path.to_path_buf(),
        })
    }

    pub fn new(config: WhowConfig, config_path: PathBuf) -> Self {
        Whow {
            config,
            config_path,
        }
    }

    pub fn config(&self) -> &WhowConfig {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn data_path(&self) -> PathBuf {
        self.config.data_path()
    }

    pub fn categories(&self) -> CategoryStore {
        CategoryStore::new(&self.data_path())
    }

    pub fn todos(&self) -> TodoStore {
        TodoStore::new(&self.data_path())
    }

    pub fn events(&self) -> EventStore {
        EventStore::new(&self.data_path())
    }

    /// Create the data tree, empty ledgers, the config file and the
    /// `important` category. Existing state is left alone. Returns a line
    /// per action taken.
    pub fn init(&self) -> WhowResult<Vec<String>> {
        let mut actions = Vec::new();
        let data_path = self.data_path();

        let mut dirs = vec![data_path.clone(), self.config.config_tree_path()];
        dirs.extend(
            ["todos", "categories", "events"]
                .into_iter()
                .map(|name| data_path.join(name)),
        );

        for dir in dirs {
            if !dir.is_dir() {
                std::fs::create_dir_all(&dir)?;
                actions.push(format!("Created directory {}", dir.display()));
            }
        }

        for kind in [RecordKind::Todo, RecordKind::Event] {
            let ledger_path = Ledger::path_in(&data_path.join(kind.dir_name()));
            if !ledger_path.exists() {
                Ledger::default().save(&ledger_path)?;
                actions.push(format!("Wrote empty {} index", kind.label()));
            }
        }

        if !self.config_path.exists() {
            WhowConfig::create_default_config(&self.config_path)?;
            actions.push(format!(
                "Wrote configuration file {}",
                self.config_path.display()
            ));
        }

        let categories = self.categories();
        if !categories.exists(IMPORTANT) {
            categories.register(&Category::new(IMPORTANT, Color::Red), false)?;
            actions.push(format!("Registered {IMPORTANT} category"));
        }

        Ok(actions)
    }

    /// Remove the data tree and the config file. Missing pieces are ignored.
    pub fn destroy(&self) -> WhowResult<()> {
        let data_path = self.data_path();
        if data_path.exists() {
            std::fs::remove_dir_all(&data_path)?;
            tracing::debug!("Removed {}", data_path.display());
        }

        if self.config_path.exists() {
            std::fs::remove_file(&self.config_path)?;
            tracing::debug!("Removed {}", self.config_path.display());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordRepository;
    use tempfile::TempDir;

    fn whow(tmp: &TempDir) -> Whow {
        let config = WhowConfig {
            data_tree_dir: tmp.path().join("data"),
            config_tree_dir: tmp.path().join("config"),
            ..WhowConfig::default()
        };
        Whow::new(config, tmp.path().join("config/config.toml"))
    }

    #[test]
    fn init_creates_tree_and_important_category() {
        let tmp = TempDir::new().unwrap();
        let whow = whow(&tmp);

        let actions = whow.init().unwrap();

        assert!(!actions.is_empty());
        assert!(tmp.path().join("data/todos/index.toml").exists());
        assert!(tmp.path().join("data/events/index.toml").exists());
        assert!(tmp.path().join("config/config.toml").exists());
        let important = whow.categories().resolve("important").unwrap();
        assert_eq!(important.color, Color::Red);
        assert!(whow.todos().list().unwrap().is_empty());
    }

    #[test]
    fn init_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let whow = whow(&tmp);
        whow.init().unwrap();
        whow.categories()
            .register(&Category::new(IMPORTANT, Color::Blue), true)
            .unwrap();

        let actions = whow.init().unwrap();

        assert!(actions.is_empty());
        assert_eq!(
            whow.categories().resolve(IMPORTANT).unwrap().color,
            Color::Blue
        );
    }

    #[test]
    fn missing_config_is_written_by_init_only() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config/config.toml");

        let loaded = Whow::load_from(&config_path).unwrap();
        assert!(!config_path.exists());
        assert_eq!(loaded.config(), &WhowConfig::default());

        let actions = whow(&tmp).init().unwrap();

        assert!(config_path.exists());
        assert!(actions.iter().any(|a| a.starts_with("Wrote configuration file")));
    }

    #[test]
    fn destroy_removes_everything() {
        let tmp = TempDir::new().unwrap();
        let whow = whow(&tmp);
        whow.init().unwrap();

        whow.destroy().unwrap();

        assert!(!tmp.path().join("data").exists());
        assert!(!tmp.path().join("config/config.toml").exists());
        whow.destroy().unwrap();
    }
}
