use anyhow::Result;
use owo_colors::OwoColorize;
use whow_core::Whow;
use whow_core::category::Category;
use whow_core::color::Color;

use crate::commands::print_json;
use crate::render::Render;
use crate::utils::term;

pub fn add(whow: &Whow, name: String, color: Option<&str>, force: bool) -> Result<()> {
    let color = match color {
        Some(color) => color.parse::<Color>()?,
        None => Color::default(),
    };
    let category = Category::new(name, color);

    whow.categories().register(&category, force)?;
    term::log(format!("Registered category {}", category.render()));

    Ok(())
}

/// To-dos and events keep referring to the name; they render uncolored afterwards.
pub fn del(whow: &Whow, name: &str) -> Result<()> {
    whow.categories().delete(name)?;
    term::log(format!("Deleted category {}", name));
    Ok(())
}

pub fn list(whow: &Whow, json: bool) -> Result<()> {
    let categories = whow.categories().list()?;

    if json {
        return print_json(&categories);
    }

    if categories.is_empty() {
        println!("{}", "No categories".dimmed());
        return Ok(());
    }

    for category in &categories {
        println!("{} {}", category.render(), category.color.render());
    }

    Ok(())
}
