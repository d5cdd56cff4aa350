//! JSON encoding of the state under a single blob key

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{BlobStore, PersistError, PersistenceAdapter};
use crate::domain::AppState;

/// Default key the state is stored under
pub const STORAGE_KEY: &str = "todos-redux-toolkit";

/// On-disk envelope: the state nested under `todos`
///
/// ```json
/// {"todos": {"todos": [{"id": "...", "title": "...", "completed": false}], "filter": "all"}}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredState {
    pub todos: AppState,
}

/// [`PersistenceAdapter`] that stores the state as one JSON blob
#[derive(Debug)]
pub struct JsonAdapter<B> {
    blobs: B,
    key: String,
}

impl<B: BlobStore> JsonAdapter<B> {
    /// Adapter using the default [`STORAGE_KEY`]
    pub fn new(blobs: B) -> Self {
        Self::with_key(blobs, STORAGE_KEY)
    }

    pub fn with_key(blobs: B, key: impl Into<String>) -> Self {
        Self { blobs, key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn blobs(&self) -> &B {
        &self.blobs
    }

    /// Read the stored state, surfacing errors instead of hiding them
    pub fn try_load(&self) -> Result<Option<AppState>, PersistError> {
        let Some(raw) = self.blobs.get(&self.key)? else {
            return Ok(None);
        };
        let stored: StoredState = serde_json::from_str(&raw).map_err(|e| PersistError::Decode(e.to_string()))?;
        Ok(Some(stored.todos.sanitized()))
    }
}

impl<B: BlobStore> PersistenceAdapter for JsonAdapter<B> {
    fn load(&self) -> Option<AppState> {
        debug!(key = %self.key, "load: called");
        match self.try_load() {
            Ok(state) => state,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to load state");
                None
            }
        }
    }

    fn save(&self, state: &AppState) -> Result<(), PersistError> {
        debug!(key = %self.key, tasks = state.todos.len(), "save: called");
        let stored = StoredState { todos: state.clone() };
        let raw = serde_json::to_string(&stored).map_err(|e| PersistError::Encode(e.to_string()))?;
        self.blobs.set(&self.key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Filter, Task, TaskId};
    use crate::persistence::MemoryBlobStore;

    fn sample() -> AppState {
        AppState {
            todos: vec![
                Task {
                    id: TaskId::from("a"),
                    title: "Buy milk".to_string(),
                    completed: false,
                },
                Task {
                    id: TaskId::from("b"),
                    title: "Walk dog".to_string(),
                    completed: true,
                },
            ],
            filter: Filter::Active,
        }
    }

    #[test]
    fn test_load_absent() {
        let adapter = JsonAdapter::new(MemoryBlobStore::new());
        assert_eq!(adapter.load(), None);
    }

    #[test]
    fn test_save_then_load() {
        let adapter = JsonAdapter::new(MemoryBlobStore::new());
        adapter.save(&sample()).unwrap();
        assert_eq!(adapter.load(), Some(sample()));
    }

    #[test]
    fn test_envelope_layout() {
        let adapter = JsonAdapter::new(MemoryBlobStore::new());
        adapter.save(&sample()).unwrap();

        let raw = adapter.blobs().get(STORAGE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["todos"]["filter"], "active");
        assert_eq!(value["todos"]["todos"][1]["title"], "Walk dog");
        assert_eq!(value["todos"]["todos"][1]["completed"], true);
    }

    #[test]
    fn test_load_garbage_is_absent() {
        let blobs = MemoryBlobStore::new();
        blobs.set(STORAGE_KEY, "not json{").unwrap();
        let adapter = JsonAdapter::new(blobs);

        assert!(matches!(adapter.try_load(), Err(PersistError::Decode(_))));
        assert_eq!(adapter.load(), None);
    }

    #[test]
    fn test_load_unknown_filter_defaults_to_all() {
        let blobs = MemoryBlobStore::new();
        blobs
            .set(STORAGE_KEY, r#"{"todos":{"todos":[],"filter":"urgent"}}"#)
            .unwrap();
        let adapter = JsonAdapter::new(blobs);
        assert_eq!(adapter.load().unwrap().filter, Filter::All);
    }

    #[test]
    fn test_load_keeps_tasks_when_fields_are_null() {
        let blobs = MemoryBlobStore::new();
        blobs
            .set(
                STORAGE_KEY,
                r#"{"todos":{"todos":[
                    {"id":"a","title":"keep me","completed":null},
                    {"id":"b","title":"me too","completed":true}
                ],"filter":null}}"#,
            )
            .unwrap();
        let adapter = JsonAdapter::new(blobs);

        let state = adapter.load().expect("tasks survive a null filter");
        assert_eq!(state.filter, Filter::All);
        assert_eq!(state.todos.len(), 2);
        assert_eq!(state.todos[0].title, "keep me");
        assert!(!state.todos[0].completed);
        assert!(state.todos[1].completed);
    }

    #[test]
    fn test_load_numeric_filter_is_all() {
        let blobs = MemoryBlobStore::new();
        blobs
            .set(STORAGE_KEY, r#"{"todos":{"todos":[{"id":"a","title":"x"}],"filter":2}}"#)
            .unwrap();
        let adapter = JsonAdapter::new(blobs);

        let state = adapter.load().unwrap();
        assert_eq!(state.filter, Filter::All);
        assert_eq!(state.todos.len(), 1);
    }

    #[test]
    fn test_load_drops_invalid_tasks() {
        let blobs = MemoryBlobStore::new();
        blobs
            .set(
                STORAGE_KEY,
                r#"{"todos":{"todos":[
                    {"id":"a","title":"ok","completed":false},
                    {"id":"b","title":"  ","completed":false},
                    {"id":"a","title":"dupe","completed":true}
                ],"filter":"all"}}"#,
            )
            .unwrap();
        let adapter = JsonAdapter::new(blobs);
        let state = adapter.load().unwrap();
        assert_eq!(state.todos.len(), 1);
        assert_eq!(state.todos[0].title, "ok");
    }

    #[test]
    fn test_custom_key() {
        let adapter = JsonAdapter::with_key(MemoryBlobStore::new(), "other");
        adapter.save(&sample()).unwrap();
        assert!(adapter.blobs().get("other").unwrap().is_some());
        assert!(adapter.blobs().get(STORAGE_KEY).unwrap().is_none());
        assert_eq!(adapter.load(), Some(sample()));
    }

    #[test]
    fn test_save_failure_is_reported() {
        let adapter = JsonAdapter::new(MemoryBlobStore::new());
        adapter.blobs().set_reject_writes(true);
        assert!(adapter.save(&sample()).is_err());
    }
}
