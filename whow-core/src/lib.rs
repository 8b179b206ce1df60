//! Core types for whow.
//!
//! Storage for to-dos, events and categories, one TOML file per record,
//! plus the configuration and the data the dashboard renders:
//! - `Whow` owns the configuration and hands out the stores
//! - `ledger` allocates the small integer indexes to-dos and events are addressed by

pub mod category;
pub mod color;
pub mod config;
pub mod dashboard;
pub mod dates;
pub mod error;
pub mod event;
pub mod fs;
pub mod ledger;
pub mod record;
pub mod todo;
pub mod whow;

pub use whow::Whow;
