//! todomvc - TodoMVC-style task list for the terminal
//!
//! Thin front end over [`todostore`]: parses user input, hands it to the
//! store, renders the result and keeps the persisted copy up to date.
//!
//! # Modules
//!
//! - [`app`] - wires the store to its persistence and resolves task references
//! - [`cli`] - command-line interface
//! - [`config`] - configuration types and loading
//! - [`shell`] - interactive line-editing shell
//! - [`view`] - terminal rendering

pub mod app;
pub mod cli;
pub mod config;
pub mod shell;
pub mod view;

pub use app::{App, Outcome, Request};
pub use config::{Config, DisplayConfig, StorageConfig};
