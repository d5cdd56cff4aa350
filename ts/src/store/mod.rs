//! State store: actions, the pure reducer, selectors and the owning [`Store`]
//!
//! The reducer never fails. Unknown IDs, blank input and requests that are
//! already satisfied leave the state unchanged.

mod action;
mod ids;
mod reducer;
pub mod selectors;
mod store;

pub use action::Action;
pub use ids::{IdGenerator, SequenceGenerator, UuidGenerator};
pub use reducer::{add_todo, clear_completed, delete_todo, edit_todo, reduce, set_filter, toggle_all, toggle_todo};
pub use store::Store;
