//! User configuration, loaded from `config.toml`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::{WhowError, WhowResult};

static DEFAULT_CONFIG_TREE_DIR: &str = "~/.config/whow";
static DEFAULT_DATA_TREE_DIR: &str = "~/.local/whow";

/// A dashboard section, in the order the user lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Section {
    Separator,
    DateTime,
    Calendar,
    Todos,
    Important,
    Events,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Separator,
        Section::DateTime,
        Section::Calendar,
        Section::Todos,
        Section::Important,
        Section::Events,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Section::Separator => "separator",
            Section::DateTime => "datetime",
            Section::Calendar => "calendar",
            Section::Todos => "todos",
            Section::Important => "important",
            Section::Events => "events",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Section {
    type Err = WhowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" | "caldate" => Ok(Section::DateTime),
            "todo" | "to-dos" => Ok(Section::Todos),
            other => Section::ALL
                .into_iter()
                .find(|section| section.name() == other)
                .ok_or_else(|| {
                    let available: Vec<_> = Section::ALL.iter().map(|s| s.name()).collect();
                    WhowError::InvalidInput(format!(
                        "Section \"{}\" not found. Available: {}",
                        s,
                        available.join(", ")
                    ))
                }),
        }
    }
}

impl TryFrom<String> for Section {
    type Error = WhowError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Clock style used for times on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TimeFormat {
    TwelveHour,
    TwentyFourHour,
}

impl TimeFormat {
    /// strftime pattern for a time of day.
    pub fn pattern(&self, with_seconds: bool) -> &'static str {
        match (self, with_seconds) {
            (TimeFormat::TwelveHour, false) => "%-I:%M %p",
            (TimeFormat::TwelveHour, true) => "%-I:%M:%S %p",
            (TimeFormat::TwentyFourHour, false) => "%H:%M",
            (TimeFormat::TwentyFourHour, true) => "%H:%M:%S",
        }
    }
}

impl TryFrom<u8> for TimeFormat {
    type Error = WhowError;

    fn try_from(hours: u8) -> Result<Self, Self::Error> {
        match hours {
            12 => Ok(TimeFormat::TwelveHour),
            24 => Ok(TimeFormat::TwentyFourHour),
            other => Err(WhowError::Config(format!(
                "time_format must be 12 or 24, got {other}"
            ))),
        }
    }
}

impl From<TimeFormat> for u8 {
    fn from(format: TimeFormat) -> Self {
        match format {
            TimeFormat::TwelveHour => 12,
            TimeFormat::TwentyFourHour => 24,
        }
    }
}

/// Configuration at ~/.config/whow/config.toml
///
/// Every key is optional. The value is built once per invocation and passed
/// to whatever needs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhowConfig {
    /// `line`, `equals` or `tilde`. Anything else draws an empty separator.
    pub default_separator: String,
    pub separator_length: usize,
    pub enable_emojis: bool,
    pub time_format: TimeFormat,
    pub sections: Vec<Section>,
    pub config_tree_dir: PathBuf,
    pub data_tree_dir: PathBuf,
}

impl Default for WhowConfig {
    fn default() -> Self {
        WhowConfig {
            default_separator: "line".to_string(),
            separator_length: 27,
            enable_emojis: true,
            time_format: TimeFormat::TwelveHour,
            sections: vec![
                Section::Separator,
                Section::DateTime,
                Section::Separator,
                Section::Calendar,
                Section::Separator,
                Section::Todos,
                Section::Separator,
                Section::Events,
            ],
            config_tree_dir: PathBuf::from(DEFAULT_CONFIG_TREE_DIR),
            data_tree_dir: PathBuf::from(DEFAULT_DATA_TREE_DIR),
        }
    }
}

impl WhowConfig {
    pub fn config_path() -> WhowResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| WhowError::Config("Could not determine config directory".into()))?
            .join("whow");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config at `path`. A missing file yields the defaults and is
    /// left missing; `whow init` writes it.
    pub fn load(path: &Path) -> WhowResult<Self> {
        let config: WhowConfig = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .build()
            .map_err(|e| WhowError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| WhowError::Config(e.to_string()))?;

        Ok(config)
    }

    /// Data tree with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        expand(&self.data_tree_dir)
    }

    pub fn config_tree_path(&self) -> PathBuf {
        expand(&self.config_tree_dir)
    }

    /// Write the full config to `path`, refusing to replace an existing file unless `force`.
    pub fn save(&self, path: &Path, force: bool) -> WhowResult<()> {
        if path.exists() && !force {
            return Err(WhowError::AlreadyExists {
                kind: "configuration",
                name: path.display().to_string(),
            });
        }

        let content = toml::to_string_pretty(self)?;
        crate::fs::write_atomic(path, &content)
            .map_err(|e| WhowError::Config(format!("Could not write config file: {e}")))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> WhowResult<()> {
        let contents = format!(
            "\
# whow configuration

# Separator style: line, equals or tilde
# default_separator = \"line\"
# separator_length = 27

# enable_emojis = true

# 12 or 24 hour clock
# time_format = 12

# Dashboard sections, top to bottom:
# separator, datetime, calendar, todos, important, events
# sections = [\"separator\", \"datetime\", \"separator\", \"calendar\", \"separator\", \"todos\", \"separator\", \"events\"]

# config_tree_dir = \"{}\"
# data_tree_dir = \"{}\"
",
            DEFAULT_CONFIG_TREE_DIR, DEFAULT_DATA_TREE_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                WhowError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| WhowError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_loads_defaults_without_writing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("whow/config.toml");

        let config = WhowConfig::load(&path).unwrap();

        assert!(!path.exists());
        assert_eq!(config, WhowConfig::default());
    }

    #[test]
    fn commented_default_loads_as_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("whow/config.toml");

        WhowConfig::create_default_config(&path).unwrap();

        assert_eq!(WhowConfig::load(&path).unwrap(), WhowConfig::default());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "default_separator = \"tilde\"\ntime_format = 24\nsections = [\"calendar\", \"todos\"]\n",
        )
        .unwrap();

        let config = WhowConfig::load(&path).unwrap();

        assert_eq!(config.default_separator, "tilde");
        assert_eq!(config.time_format, TimeFormat::TwentyFourHour);
        assert_eq!(config.sections, vec![Section::Calendar, Section::Todos]);
        assert_eq!(config.separator_length, 27);
        assert!(config.enable_emojis);
    }

    #[test]
    fn invalid_values_are_config_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");

        std::fs::write(&path, "time_format = 13\n").unwrap();
        assert!(matches!(WhowConfig::load(&path), Err(WhowError::Config(_))));

        std::fs::write(&path, "sections = [\"schedule\"]\n").unwrap();
        assert!(matches!(WhowConfig::load(&path), Err(WhowError::Config(_))));
    }

    #[test]
    fn save_refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        let config = WhowConfig::default();

        config.save(&path, false).unwrap();
        assert!(matches!(
            config.save(&path, false),
            Err(WhowError::AlreadyExists { .. })
        ));
        config.save(&path, true).unwrap();

        assert_eq!(WhowConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn section_names_parse_with_aliases() {
        assert_eq!("caldate".parse::<Section>().unwrap(), Section::DateTime);
        assert_eq!("Events".parse::<Section>().unwrap(), Section::Events);
        assert!("schedule".parse::<Section>().is_err());
    }
}
