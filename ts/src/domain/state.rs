//! The whole managed state

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{Filter, Task, TaskId};

/// Ordered task collection plus the active filter
///
/// Values are never mutated in place once handed out by the store; every
/// transition builds a new `AppState`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub todos: Vec<Task>,
    #[serde(default)]
    pub filter: Filter,
}

impl AppState {
    /// Create an empty state with the `All` filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a task by ID
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.todos.iter().find(|t| &t.id == id)
    }

    /// Check whether a task with this ID exists
    pub fn contains(&self, id: &TaskId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Resolve a user-typed reference (full ID, prefix or displayed suffix)
    ///
    /// Returns:
    /// - Ok(Some(id)) if exactly one task matches
    /// - Ok(None) if nothing matches
    /// - Err with candidates if ambiguous
    pub fn resolve(&self, reference: &str) -> Result<Option<TaskId>, Vec<TaskId>> {
        if let Some(task) = self.todos.iter().find(|t| t.id.as_str() == reference) {
            return Ok(Some(task.id.clone()));
        }

        let matches: Vec<TaskId> = self
            .todos
            .iter()
            .filter(|t| t.id.matches(reference))
            .map(|t| t.id.clone())
            .collect();

        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.into_iter().next()),
            _ => Err(matches),
        }
    }

    /// Restore the invariants on state that came from outside the store
    ///
    /// Trims titles, drops tasks whose title is blank and drops later
    /// duplicates of an ID already seen. Order of the survivors is kept.
    pub fn sanitized(self) -> Self {
        let mut seen = HashSet::new();
        let mut todos = Vec::with_capacity(self.todos.len());

        for task in self.todos {
            let title = task.title.trim();
            if title.is_empty() {
                warn!(id = %task.id, "Dropping persisted task with blank title");
                continue;
            }
            if !seen.insert(task.id.clone()) {
                warn!(id = %task.id, "Dropping persisted task with duplicate id");
                continue;
            }
            todos.push(Task {
                title: title.to_string(),
                ..task
            });
        }

        Self {
            todos,
            filter: self.filter,
        }
    }
}
