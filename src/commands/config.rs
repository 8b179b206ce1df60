use anyhow::Result;
use owo_colors::OwoColorize;
use whow_core::Whow;

use crate::utils::term;

pub fn show(whow: &Whow) -> Result<()> {
    println!("{}", "Paths".bold());
    println!("  Config:  {}", whow.config_path().display());
    println!("  Data:    {}", whow.data_path().display());
    println!();
    println!("{}", "Settings".bold());
    for line in toml::to_string_pretty(whow.config())?.lines() {
        println!("  {}", line);
    }

    Ok(())
}

/// Write the effective settings out in full.
pub fn init(whow: &Whow, force: bool) -> Result<()> {
    if whow.config_path().exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            whow.config_path().display()
        );
    }

    whow.config().save(whow.config_path(), force)?;
    term::log(format!("Wrote {}", whow.config_path().display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use whow_core::config::WhowConfig;

    #[test]
    fn init_writes_missing_config_without_force() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("whow/config.toml");
        let whow = Whow::load_from(&config_path).unwrap();

        init(&whow, false).unwrap();

        assert_eq!(WhowConfig::load(&config_path).unwrap(), WhowConfig::default());
        assert!(init(&whow, false).is_err());
        init(&whow, true).unwrap();
    }
}
