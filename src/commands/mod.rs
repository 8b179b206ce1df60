pub mod category;
pub mod config;
pub mod event;
pub mod init;
pub mod show;
pub mod todo;

use anyhow::Result;
use dialoguer::Input;
use serde::Serialize;
use whow_core::Whow;

/// Ask a yes/no question. Only `y` or `yes` counts as yes.
pub fn confirm(prompt: &str) -> Result<bool> {
    let answer: String = Input::new()
        .with_prompt(format!("{} [y/N]", prompt))
        .allow_empty(true)
        .interact_text()?;

    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Resolve `@category` references to stored category names. Unknown names fail.
pub fn resolve_categories(whow: &Whow, names: &[String]) -> Result<Vec<String>> {
    let store = whow.categories();
    let mut resolved: Vec<String> = Vec::new();

    for name in names {
        let category = store.resolve(name)?;
        if !resolved.iter().any(|r| r.eq_ignore_ascii_case(&category.name)) {
            resolved.push(category.name);
        }
    }

    Ok(resolved)
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use whow_core::category::Category;
    use whow_core::color::Color;
    use whow_core::config::WhowConfig;

    #[test]
    fn only_y_and_yes_confirm() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("yeah"));
        assert!(!is_yes("n"));
    }

    #[test]
    fn categories_resolve_to_stored_names() {
        let tmp = TempDir::new().unwrap();
        let config = WhowConfig {
            data_tree_dir: tmp.path().to_path_buf(),
            ..WhowConfig::default()
        };
        let whow = Whow::new(config, tmp.path().join("config.toml"));
        whow.categories()
            .register(&Category::new("Work", Color::Blue), false)
            .unwrap();

        let names = ["work".to_string(), "WORK".to_string()];
        assert_eq!(resolve_categories(&whow, &names).unwrap(), vec!["Work"]);
        assert!(resolve_categories(&whow, &["nope".to_string()]).is_err());
    }
}
