//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::app::Request;

/// todomvc - a task list that remembers
#[derive(Parser, Debug)]
#[command(
    name = "tm",
    about = "TodoMVC-style task list for the terminal",
    version,
    after_help = "Logs are written to: ~/.local/share/todomvc/logs/todomvc.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a task
    Add {
        /// Task text (words are joined with spaces)
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Flip a task between active and completed
    Toggle {
        /// Task ID (a unique prefix or the displayed short ID is enough)
        id: String,
    },

    /// Delete a task
    #[command(alias = "delete")]
    Rm {
        /// Task ID
        id: String,
    },

    /// Change a task's title (a blank title deletes it)
    Edit {
        /// Task ID
        id: String,

        /// New title
        #[arg(num_args = 0.., allow_hyphen_values = true)]
        title: Vec<String>,
    },

    /// Mark every task completed (or active with --off)
    ToggleAll {
        /// Mark every task active instead
        #[arg(long)]
        off: bool,
    },

    /// Remove all completed tasks
    ClearCompleted,

    /// Select the view filter: all, active, completed (or a #/ route)
    Filter {
        /// Filter name or route; anything unrecognized means all
        #[arg(default_value = "all")]
        route: String,
    },

    /// Show the task list
    #[command(alias = "ls")]
    List {
        /// Show this filter once without changing the saved one
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Interactive shell
    Shell,
}

impl Command {
    /// Translate to an application request (`Shell` has none)
    pub fn to_request(&self) -> Option<Request> {
        Some(match self {
            Self::Add { text } => Request::Add(text.join(" ")),
            Self::Toggle { id } => Request::Toggle(id.clone()),
            Self::Rm { id } => Request::Delete(id.clone()),
            Self::Edit { id, title } => Request::Edit {
                reference: id.clone(),
                title: title.join(" "),
            },
            Self::ToggleAll { off } => Request::ToggleAll(!off),
            Self::ClearCompleted => Request::ClearCompleted,
            Self::Filter { route } => Request::Filter(route.clone()),
            Self::List { filter } => Request::List(filter.clone()),
            Self::Shell => return None,
        })
    }
}
