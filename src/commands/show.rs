use anyhow::Result;
use whow_core::Whow;
use whow_core::config::Section;
use whow_core::dashboard::Dashboard;

use crate::render::DashboardRender;
use crate::utils::term;

pub fn run(whow: &Whow, section: Option<&str>) -> Result<()> {
    if !whow.data_path().exists() {
        term::warn(format!(
            "No data found at {}. Run `whow init` to set it up.",
            whow.data_path().display()
        ));
    }

    let dashboard = Dashboard::load(whow)?;
    let sections = match section {
        Some(name) => vec![name.parse::<Section>()?],
        None => dashboard.sections.clone(),
    };

    let width = term::width();
    for section in sections {
        for line in dashboard.render_section(section, whow.config(), width) {
            println!("{}", line);
        }
    }

    Ok(())
}
