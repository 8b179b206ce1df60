use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;
use whow_core::Whow;
use whow_core::event::{EventEntry, EventRepository};
use whow_core::record::{RecordRepository, RegisterOptions};

use crate::commands::{confirm, print_json, resolve_categories};
use crate::input;
use crate::render::event_span;
use crate::utils::term;

/// Raw `event add` arguments.
pub struct NewEvent {
    pub name: String,
    pub from: String,
    pub to: String,
    pub categories: Vec<String>,
    pub description: String,
}

pub fn add(whow: &Whow, new: NewEvent, force: bool) -> Result<()> {
    let (extra, category_names) = input::split_categories(&new.categories);
    if !extra.is_empty() {
        anyhow::bail!(
            "Unexpected arguments: {}. Categories start with @, quote multi-word times.",
            extra.join(" ")
        );
    }

    let start = input::parse_start(&new.from)?;
    let end = input::parse_end(&new.to, start)?;
    let categories = resolve_categories(whow, &category_names)?;

    let written = whow.events().register(
        EventEntry::new(new.name, start, end, new.description, categories),
        RegisterOptions {
            force,
            use_old_index: false,
        },
    )?;

    term::log(format!(
        "Registered event #{} {} ({})",
        written.record.index,
        written.record.name.bold(),
        event_span(&written.record, whow.config().time_format)
    ));
    tracing::debug!("{}", written.content);

    Ok(())
}

pub fn del(whow: &Whow, index: u32) -> Result<()> {
    let removed = whow.events().delete(index)?;
    term::log(format!("Deleted event #{} {}", index, removed.name));
    Ok(())
}

pub fn edit(
    whow: &Whow,
    index: u32,
    name: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let written = whow.events().update(index, |event| {
        if let Some(name) = name {
            event.name = name;
        }
        if let Some(description) = description {
            event.description = description;
        }
    })?;

    term::log(format!("Updated event #{} {}", index, written.record.name));
    Ok(())
}

pub fn list(whow: &Whow, json: bool) -> Result<()> {
    let events = whow.events().list()?;

    if json {
        return print_json(&events);
    }

    if events.is_empty() {
        println!("{}", "No events".dimmed());
        return Ok(());
    }

    let time_format = whow.config().time_format;
    for event in &events {
        println!(
            "{:>3} {} {}",
            event.index,
            event.name,
            event_span(event, time_format).dimmed()
        );
        if !event.description.is_empty() {
            println!("    {}", event.description.italic());
        }
    }

    Ok(())
}

pub fn clean(whow: &Whow, force: bool) -> Result<()> {
    let now = Local::now().naive_local();
    let past = whow
        .events()
        .list()?
        .into_iter()
        .filter(|e| e.is_past(now))
        .count();

    if past == 0 {
        println!("{}", "Nothing to clean".dimmed());
        return Ok(());
    }

    let question = format!(
        "Delete {} past {}?",
        past,
        if past == 1 { "event" } else { "events" }
    );
    if !force && !confirm(&question)? {
        return Ok(());
    }

    for event in whow.events().clean_past(now)? {
        term::log(format!("Deleted event #{} {}", event.index, event.name));
    }

    Ok(())
}
