use anyhow::Result;
use owo_colors::OwoColorize;
use whow_core::Whow;
use whow_core::record::{RecordRepository, RegisterOptions};
use whow_core::todo::{TodoEntry, TodoRepository};

use crate::commands::{confirm, print_json, resolve_categories};
use crate::input;
use crate::utils::term;

pub fn add(whow: &Whow, name: String, rest: &[String], force: bool) -> Result<()> {
    let (due_words, category_names) = input::split_categories(rest);

    let due = if due_words.is_empty() {
        None
    } else {
        Some(input::parse_due(&due_words.join(" "))?)
    };
    let categories = resolve_categories(whow, &category_names)?;

    let written = whow.todos().register(
        TodoEntry::new(name, due, categories),
        RegisterOptions {
            force,
            use_old_index: false,
        },
    )?;

    term::log(format!(
        "Registered to-do #{} {}",
        written.record.index,
        written.record.name.bold()
    ));
    tracing::debug!("{}", written.content);

    Ok(())
}

pub fn del(whow: &Whow, index: u32) -> Result<()> {
    let removed = whow.todos().delete(index)?;
    term::log(format!("Deleted to-do #{} {}", index, removed.name));
    Ok(())
}

pub fn mark(whow: &Whow, index: u32) -> Result<()> {
    let written = whow.todos().toggle_ticked(index)?;
    let state = if written.record.ticked {
        "ticked"
    } else {
        "unticked"
    };

    term::log(format!("To-do #{} {} is now {}", index, written.record.name, state));
    Ok(())
}

pub fn edit(
    whow: &Whow,
    index: u32,
    name: Option<String>,
    due: Option<&str>,
    no_due: bool,
) -> Result<()> {
    let due = match due {
        Some(words) => Some(Some(input::parse_due(words)?)),
        None if no_due => Some(None),
        None => None,
    };

    let written = whow.todos().update(index, |todo| {
        if let Some(name) = name {
            todo.name = name;
        }
        if let Some(due) = due {
            todo.due = due;
        }
    })?;

    term::log(format!("Updated to-do #{} {}", index, written.record.name));
    Ok(())
}

pub fn list(whow: &Whow, json: bool) -> Result<()> {
    let todos = whow.todos().list()?;

    if json {
        return print_json(&todos);
    }

    if todos.is_empty() {
        println!("{}", "No to-dos".dimmed());
        return Ok(());
    }

    for todo in &todos {
        let mark = if todo.ticked { "[x]" } else { "[ ]" };
        let due = match todo.due {
            Some(due) if todo.overdue => format!(" due {}", due).red().to_string(),
            Some(due) => format!(" due {}", due).dimmed().to_string(),
            None => String::new(),
        };
        let categories = if todo.categories.is_empty() {
            String::new()
        } else {
            format!(" @{}", todo.categories.join(" @")).dimmed().to_string()
        };

        println!("{:>3} {} {}{}{}", todo.index, mark, todo.name, due, categories);
    }

    Ok(())
}

pub fn clean(whow: &Whow, force: bool) -> Result<()> {
    let ticked = whow
        .todos()
        .list()?
        .into_iter()
        .filter(|t| t.ticked)
        .count();

    if ticked == 0 {
        println!("{}", "Nothing to clean".dimmed());
        return Ok(());
    }

    let question = format!(
        "Delete {} ticked {}?",
        ticked,
        if ticked == 1 { "to-do" } else { "to-dos" }
    );
    if !force && !confirm(&question)? {
        return Ok(());
    }

    for todo in whow.todos().clean_ticked()? {
        term::log(format!("Deleted to-do #{} {}", todo.index, todo.name));
    }

    Ok(())
}
