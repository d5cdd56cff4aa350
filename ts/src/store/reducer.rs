//! Pure transition functions
//!
//! Each transition takes the current state and its input and returns
//! `Some(new_state)` when something changed, `None` when the request is a
//! no-op. The input state is never modified.

use tracing::warn;

use super::{Action, IdGenerator};
use crate::domain::{AppState, Filter, Task, TaskId};

/// Attempts at drawing an ID not already in the state before giving up
const MAX_ID_ATTEMPTS: usize = 16;

/// Apply one action to a state
///
/// `ids` is only consulted for [`Action::AddTodo`].
pub fn reduce(state: &AppState, action: &Action, ids: &mut dyn IdGenerator) -> Option<AppState> {
    match action {
        Action::AddTodo(text) => {
            if text.trim().is_empty() {
                return None;
            }
            let id = (0..MAX_ID_ATTEMPTS)
                .map(|_| ids.next_id())
                .find(|id| !state.contains(id));
            match id {
                Some(id) => add_todo(state, id, text),
                None => {
                    warn!("ID generator kept returning existing ids; add_todo ignored");
                    None
                }
            }
        }
        Action::ToggleTodo(id) => toggle_todo(state, id),
        Action::DeleteTodo(id) => delete_todo(state, id),
        Action::EditTodo { id, title } => edit_todo(state, id, title),
        Action::ToggleAll(completed) => toggle_all(state, *completed),
        Action::ClearCompleted => clear_completed(state),
        Action::SetFilter(filter) => set_filter(state, *filter),
    }
}

/// Append a new incomplete task with the trimmed text
///
/// No-op when the text is blank or the ID is already taken.
pub fn add_todo(state: &AppState, id: TaskId, text: &str) -> Option<AppState> {
    if state.contains(&id) {
        return None;
    }
    let task = Task::new(id, text)?;
    let mut todos = state.todos.clone();
    todos.push(task);
    Some(AppState {
        todos,
        filter: state.filter,
    })
}

pub fn toggle_todo(state: &AppState, id: &TaskId) -> Option<AppState> {
    let index = state.todos.iter().position(|t| &t.id == id)?;
    let mut todos = state.todos.clone();
    todos[index].completed = !todos[index].completed;
    Some(AppState {
        todos,
        filter: state.filter,
    })
}

pub fn delete_todo(state: &AppState, id: &TaskId) -> Option<AppState> {
    if !state.contains(id) {
        return None;
    }
    let todos = state.todos.iter().filter(|t| &t.id != id).cloned().collect();
    Some(AppState {
        todos,
        filter: state.filter,
    })
}

/// Replace a task's title; a title that trims to empty deletes the task
pub fn edit_todo(state: &AppState, id: &TaskId, title: &str) -> Option<AppState> {
    let title = title.trim();
    if title.is_empty() {
        return delete_todo(state, id);
    }

    let index = state.todos.iter().position(|t| &t.id == id)?;
    if state.todos[index].title == title {
        return None;
    }
    let mut todos = state.todos.clone();
    todos[index].title = title.to_string();
    Some(AppState {
        todos,
        filter: state.filter,
    })
}

pub fn toggle_all(state: &AppState, completed: bool) -> Option<AppState> {
    if state.todos.iter().all(|t| t.completed == completed) {
        return None;
    }
    let todos = state
        .todos
        .iter()
        .map(|t| Task {
            completed,
            ..t.clone()
        })
        .collect();
    Some(AppState {
        todos,
        filter: state.filter,
    })
}

pub fn clear_completed(state: &AppState) -> Option<AppState> {
    if state.todos.iter().all(Task::is_active) {
        return None;
    }
    let todos = state.todos.iter().filter(|t| t.is_active()).cloned().collect();
    Some(AppState {
        todos,
        filter: state.filter,
    })
}

pub fn set_filter(state: &AppState, filter: Filter) -> Option<AppState> {
    if state.filter == filter {
        return None;
    }
    Some(AppState {
        todos: state.todos.clone(),
        filter,
    })
}
