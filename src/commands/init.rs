use anyhow::Result;
use whow_core::Whow;

use crate::commands::confirm;
use crate::utils::term;

pub fn run(whow: &Whow, destroy: bool, force: bool) -> Result<()> {
    term::log("Reconfiguring Whow...");

    if destroy {
        let question = format!(
            "Delete {} and {}?",
            whow.data_path().display(),
            whow.config_path().display()
        );
        if !force && !confirm(&question)? {
            term::log("Nothing was deleted");
            return Ok(());
        }

        term::warn(format!(
            "Overwriting {} and {}...",
            whow.data_path().display(),
            whow.config_path().display()
        ));
        whow.destroy()?;
    }

    let actions = whow.init()?;
    if actions.is_empty() {
        term::log("Everything is already set up");
    }
    for action in actions {
        term::log(action);
    }

    Ok(())
}
