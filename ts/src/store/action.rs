//! Transition requests dispatched into the store

use crate::domain::{Filter, TaskId};

/// A request to transition the state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Append a task with the trimmed text
    AddTodo(String),
    /// Flip completion of one task
    ToggleTodo(TaskId),
    /// Remove one task
    DeleteTodo(TaskId),
    /// Retitle one task (blank title deletes it)
    EditTodo { id: TaskId, title: String },
    /// Set completion on every task
    ToggleAll(bool),
    /// Remove every completed task
    ClearCompleted,
    /// Change the view filter
    SetFilter(Filter),
}

impl Action {
    pub fn add(text: impl Into<String>) -> Self {
        Self::AddTodo(text.into())
    }

    pub fn toggle(id: impl Into<TaskId>) -> Self {
        Self::ToggleTodo(id.into())
    }

    pub fn delete(id: impl Into<TaskId>) -> Self {
        Self::DeleteTodo(id.into())
    }

    pub fn edit(id: impl Into<TaskId>, title: impl Into<String>) -> Self {
        Self::EditTodo {
            id: id.into(),
            title: title.into(),
        }
    }

    /// Short name used in log lines
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddTodo(_) => "add_todo",
            Self::ToggleTodo(_) => "toggle_todo",
            Self::DeleteTodo(_) => "delete_todo",
            Self::EditTodo { .. } => "edit_todo",
            Self::ToggleAll(_) => "toggle_all",
            Self::ClearCompleted => "clear_completed",
            Self::SetFilter(_) => "set_filter",
        }
    }
}
