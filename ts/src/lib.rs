//! TodoStore - task list state management
//!
//! Holds an ordered task collection plus the active view filter, applies
//! transitions as pure functions producing a new immutable state, and derives
//! read-only views through selectors. Persistence is a collaborator notified
//! after each committed transition.
//!
//! # Architecture
//!
//! ```text
//! UI input ──> Action ──> Store::dispatch ──> reduce(state, action) ──> Arc<AppState>
//!                                   │
//!                                   ├──> selectors (filtered, counts, all_completed)
//!                                   └──> subscribers ──> SaveWriter ──> JsonAdapter ──> BlobStore
//! ```
//!
//! # Example
//!
//! ```
//! use todostore::{Action, Filter, Store};
//!
//! let mut store = Store::default();
//! store.dispatch(Action::add("Buy milk"));
//! store.dispatch(Action::SetFilter(Filter::Active));
//! assert_eq!(store.active_count(), 1);
//! assert_eq!(store.filtered_todos()[0].title, "Buy milk");
//! ```

pub mod domain;
pub mod persistence;
pub mod store;

pub use domain::{AppState, Filter, Task, TaskId};
pub use persistence::{
    BlobStore, FileBlobStore, JsonAdapter, MemoryBlobStore, PersistError, PersistenceAdapter, STORAGE_KEY, SaveWriter,
    StoredState, WriterStats,
};
pub use store::{Action, IdGenerator, SequenceGenerator, Store, UuidGenerator, reduce, selectors};
