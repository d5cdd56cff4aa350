//! Read-only derivations from [`AppState`]
//!
//! Every selector is a pure function of the state. [`FilteredMemo`] caches the
//! filtered list keyed on the identity of the `Arc<AppState>` it was computed
//! from; a new state is a new `Arc`, so the cache can never serve a stale view.

use std::sync::Arc;

use crate::domain::{AppState, Filter, Task};

pub fn all_todos(state: &AppState) -> &[Task] {
    &state.todos
}

pub fn filter(state: &AppState) -> Filter {
    state.filter
}

/// Tasks visible under the state's own filter, in original order
pub fn filtered_todos(state: &AppState) -> Vec<&Task> {
    todos_matching(state, state.filter)
}

/// Tasks visible under an explicit filter, in original order
pub fn todos_matching(state: &AppState, filter: Filter) -> Vec<&Task> {
    state.todos.iter().filter(|t| filter.accepts(t.completed)).collect()
}

pub fn active_count(state: &AppState) -> usize {
    state.todos.iter().filter(|t| t.is_active()).count()
}

pub fn completed_count(state: &AppState) -> usize {
    state.todos.iter().filter(|t| t.completed).count()
}

/// True only for a non-empty list where every task is completed
pub fn all_completed(state: &AppState) -> bool {
    !state.todos.is_empty() && state.todos.iter().all(|t| t.completed)
}

/// Single-entry cache for [`filtered_todos`]
#[derive(Debug, Default)]
pub struct FilteredMemo {
    input: Option<Arc<AppState>>,
    output: Arc<[Task]>,
    hits: u64,
}

impl FilteredMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the filtered list for `state`, recomputing only when the state changed
    pub fn get(&mut self, state: &Arc<AppState>) -> Arc<[Task]> {
        match &self.input {
            Some(prev) if Arc::ptr_eq(prev, state) => {
                self.hits += 1;
            }
            _ => {
                self.output = filtered_todos(state).into_iter().cloned().collect();
                self.input = Some(Arc::clone(state));
            }
        }
        Arc::clone(&self.output)
    }

    /// Number of lookups served from the cache
    pub fn hits(&self) -> u64 {
        self.hits
    }
}
