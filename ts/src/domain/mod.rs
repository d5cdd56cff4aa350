//! Domain types for the task list
//!
//! - [`Task`] and [`TaskId`] - a single entry and its opaque identifier
//! - [`Filter`] - which subset of tasks the view shows
//! - [`AppState`] - the whole managed state

mod filter;
mod state;
mod task;

pub use filter::Filter;
pub use state::AppState;
pub use task::{Task, TaskId};
