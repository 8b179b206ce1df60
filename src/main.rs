mod commands;
mod input;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use whow_core::Whow;

use crate::utils::term;

#[derive(Parser)]
#[command(name = "whow")]
#[command(version, about = "Your to-dos, events and calendar at a glance")]
struct Cli {
    /// Use this config file instead of the default one
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard, or a single section of it
    Show {
        /// separator, datetime, calendar, todos, important or events
        section: Option<String>,
    },
    /// Create the data directories, indexes and default category
    Init {
        /// Delete all existing data and configuration first
        #[arg(long)]
        destroy: bool,

        /// Do not ask for confirmation
        #[arg(short, long)]
        force: bool,
    },
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
    Todo {
        #[command(subcommand)]
        command: TodoCommand,
    },
    Category {
        #[command(subcommand)]
        command: CategoryCommand,
    },
    Event {
        #[command(subcommand)]
        command: EventCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the config paths and effective settings
    Show,
    /// Write every setting with its default value
    Init {
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum TodoCommand {
    /// Add a to-do. Trailing words are the due date, `@name` words are categories
    Add {
        name: String,

        /// Due date words and @categories (e.g. "tomorrow @work")
        rest: Vec<String>,

        /// Replace a to-do with the same name
        #[arg(long)]
        force: bool,
    },
    Del {
        index: u32,
    },
    /// Tick or untick a to-do
    Mark {
        index: u32,
    },
    Edit {
        index: u32,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, conflicts_with = "no_due")]
        due: Option<String>,

        /// Remove the due date
        #[arg(long)]
        no_due: bool,
    },
    List {
        #[arg(long)]
        json: bool,
    },
    /// Delete every ticked to-do
    Clean {
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum CategoryCommand {
    Add {
        name: String,

        /// black, red, green, yellow, blue, magenta, cyan or white
        color: Option<String>,

        /// Replace a category with the same name
        #[arg(long)]
        force: bool,
    },
    Del {
        name: String,
    },
    List {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum EventCommand {
    /// Add an event
    Add {
        name: String,

        /// Start date/time (e.g., "2026-03-20T15:00", "tomorrow 6pm")
        from: String,

        /// End date/time, a duration (e.g., "90m") or "fullday"
        to: String,

        /// @categories
        categories: Vec<String>,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Replace an event with the same name
        #[arg(long)]
        force: bool,
    },
    Del {
        index: u32,
    },
    Edit {
        index: u32,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
    List {
        #[arg(long)]
        json: bool,
    },
    /// Delete every event that is over
    Clean {
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("WHOW_LOG").unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();

    let cli = Cli::parse();

    // Commands block on prompts and file IO, Ctrl-C is watched alongside.
    let task = tokio::task::spawn_blocking(move || run(cli));

    tokio::select! {
        joined = task => match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => fail(e),
            Err(e) => fail(e.into()),
        },
        _ = tokio::signal::ctrl_c() => interrupted(),
    }
}

fn run(cli: Cli) -> Result<()> {
    let whow = match &cli.config {
        Some(path) => Whow::load_from(path)?,
        None => Whow::load()?,
    };

    let Some(command) = cli.command else {
        return commands::show::run(&whow, None);
    };

    match command {
        Commands::Show { section } => commands::show::run(&whow, section.as_deref()),
        Commands::Init { destroy, force } => commands::init::run(&whow, destroy, force),
        Commands::Config { command } => match command {
            ConfigCommand::Show => commands::config::show(&whow),
            ConfigCommand::Init { force } => commands::config::init(&whow, force),
        },
        Commands::Todo { command } => match command {
            TodoCommand::Add { name, rest, force } => commands::todo::add(&whow, name, &rest, force),
            TodoCommand::Del { index } => commands::todo::del(&whow, index),
            TodoCommand::Mark { index } => commands::todo::mark(&whow, index),
            TodoCommand::Edit {
                index,
                name,
                due,
                no_due,
            } => commands::todo::edit(&whow, index, name, due.as_deref(), no_due),
            TodoCommand::List { json } => commands::todo::list(&whow, json),
            TodoCommand::Clean { force } => commands::todo::clean(&whow, force),
        },
        Commands::Category { command } => match command {
            CategoryCommand::Add { name, color, force } => {
                commands::category::add(&whow, name, color.as_deref(), force)
            }
            CategoryCommand::Del { name } => commands::category::del(&whow, &name),
            CategoryCommand::List { json } => commands::category::list(&whow, json),
        },
        Commands::Event { command } => match command {
            EventCommand::Add {
                name,
                from,
                to,
                categories,
                description,
                force,
            } => commands::event::add(
                &whow,
                commands::event::NewEvent {
                    name,
                    from,
                    to,
                    categories,
                    description,
                },
                force,
            ),
            EventCommand::Del { index } => commands::event::del(&whow, index),
            EventCommand::Edit {
                index,
                name,
                description,
            } => commands::event::edit(&whow, index, name, description),
            EventCommand::List { json } => commands::event::list(&whow, json),
            EventCommand::Clean { force } => commands::event::clean(&whow, force),
        },
    }
}

fn fail(e: anyhow::Error) -> ! {
    if is_interrupt(&e) {
        interrupted();
    }

    term::error(e.to_string());
    std::process::exit(1);
}

/// Prompts report Ctrl-C as an interrupted read rather than a signal.
fn is_interrupt(e: &anyhow::Error) -> bool {
    let io = match e.downcast_ref::<dialoguer::Error>() {
        Some(dialoguer::Error::IO(io)) => Some(io),
        _ => e.downcast_ref::<std::io::Error>(),
    };

    io.is_some_and(|io| io.kind() == std::io::ErrorKind::Interrupted)
}

fn interrupted() -> ! {
    term::log("Interrupt signal received, quitting..");
    std::process::exit(0);
}
