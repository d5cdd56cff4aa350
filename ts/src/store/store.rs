//! Store - owns the authoritative state
//!
//! Dispatch is synchronous: the reducer runs, the new state is committed, and
//! subscribers are called with it before `dispatch` returns. Readers holding
//! an older `Arc<AppState>` keep seeing the value they were handed.

use std::cell::RefCell;
use std::sync::Arc;

use tracing::{debug, info};

use super::selectors::{self, FilteredMemo};
use super::{Action, IdGenerator, UuidGenerator, reduce};
use crate::domain::{AppState, Filter, Task, TaskId};
use crate::persistence::PersistenceAdapter;

/// Callback invoked with each committed state
pub type Listener = Box<dyn Fn(&Arc<AppState>)>;

/// The single writer of [`AppState`]
pub struct Store {
    state: Arc<AppState>,
    ids: Box<dyn IdGenerator>,
    listeners: Vec<Listener>,
    filtered: RefCell<FilteredMemo>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Store {
    /// Create a store from an initial state
    ///
    /// The state is sanitized so the store's invariants hold from the start.
    pub fn new(initial: AppState) -> Self {
        Self {
            state: Arc::new(initial.sanitized()),
            ids: Box::new(UuidGenerator),
            listeners: Vec::new(),
            filtered: RefCell::new(FilteredMemo::new()),
        }
    }

    /// Create a store from whatever the adapter has persisted
    ///
    /// Falls back to the empty state when nothing is stored or it can't be read.
    pub fn load(adapter: &dyn PersistenceAdapter) -> Self {
        let initial = match adapter.load() {
            Some(state) => {
                info!(tasks = state.todos.len(), filter = %state.filter, "Loaded persisted state");
                state
            }
            None => {
                info!("No persisted state, starting empty");
                AppState::default()
            }
        };
        Self::new(initial)
    }

    /// Replace the ID generator
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Register a listener called after every state-changing dispatch
    pub fn subscribe(&mut self, listener: impl Fn(&Arc<AppState>) + 'static) {
        debug!(count = self.listeners.len() + 1, "subscribe: called");
        self.listeners.push(Box::new(listener));
    }

    /// Current state snapshot
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    /// Apply an action
    ///
    /// Returns true when the state changed. No-op actions don't notify
    /// subscribers.
    pub fn dispatch(&mut self, action: Action) -> bool {
        debug!(?action, "dispatch: called");
        match reduce(&self.state, &action, self.ids.as_mut()) {
            Some(next) => {
                self.state = Arc::new(next);
                debug!(action = action.name(), tasks = self.state.todos.len(), "dispatch: committed");
                for listener in &self.listeners {
                    listener(&self.state);
                }
                true
            }
            None => {
                debug!(action = action.name(), "dispatch: no-op");
                false
            }
        }
    }

    // === Transitions ===

    /// Add a task, returning its new ID (None when the text is blank)
    pub fn add_todo(&mut self, text: &str) -> Option<TaskId> {
        if self.dispatch(Action::add(text)) {
            self.state.todos.last().map(|t| t.id.clone())
        } else {
            None
        }
    }

    pub fn toggle_todo(&mut self, id: &TaskId) -> bool {
        self.dispatch(Action::ToggleTodo(id.clone()))
    }

    pub fn delete_todo(&mut self, id: &TaskId) -> bool {
        self.dispatch(Action::DeleteTodo(id.clone()))
    }

    pub fn edit_todo(&mut self, id: &TaskId, title: &str) -> bool {
        self.dispatch(Action::edit(id.clone(), title))
    }

    pub fn toggle_all(&mut self, completed: bool) -> bool {
        self.dispatch(Action::ToggleAll(completed))
    }

    pub fn clear_completed(&mut self) -> bool {
        self.dispatch(Action::ClearCompleted)
    }

    pub fn set_filter(&mut self, filter: Filter) -> bool {
        self.dispatch(Action::SetFilter(filter))
    }

    // === Selectors ===

    pub fn all_todos(&self) -> &[Task] {
        selectors::all_todos(&self.state)
    }

    pub fn filter(&self) -> Filter {
        selectors::filter(&self.state)
    }

    /// Tasks visible under the active filter (memoized per state)
    pub fn filtered_todos(&self) -> Arc<[Task]> {
        self.filtered.borrow_mut().get(&self.state)
    }

    pub fn active_count(&self) -> usize {
        selectors::active_count(&self.state)
    }

    pub fn completed_count(&self) -> usize {
        selectors::completed_count(&self.state)
    }

    pub fn all_completed(&self) -> bool {
        selectors::all_completed(&self.state)
    }
}
