//! Application wiring
//!
//! [`App`] owns the [`Store`] and the [`SaveWriter`] it notifies, and turns
//! user requests (task references as typed, raw titles, routes) into store
//! actions. Both the one-shot CLI and the interactive shell go through it.

use std::sync::Arc;

use eyre::{Context, Result};
use tracing::{debug, info, warn};

use todostore::{FileBlobStore, Filter, JsonAdapter, PersistenceAdapter, SaveWriter, Store, TaskId, selectors};

use crate::config::{Config, DisplayConfig};
use crate::view;

/// A user request, before task references are resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Add(String),
    Toggle(String),
    Delete(String),
    Edit { reference: String, title: String },
    ToggleAll(bool),
    ClearCompleted,
    /// Filter name or route; unrecognized means all
    Filter(String),
    /// Show the list, optionally under a one-off filter
    List(Option<String>),
}

/// What handling a request did
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// The store committed a new state
    pub changed: bool,
    /// Hints for the user (unmatched or ambiguous task references)
    pub notes: Vec<String>,
    /// Filter to render with instead of the stored one
    pub view: Option<Filter>,
}

/// The running application
pub struct App {
    store: Store,
    writer: SaveWriter,
    display: DisplayConfig,
}

impl App {
    /// Open the file-backed store described by `config`
    ///
    /// Must be called inside a tokio runtime (the save writer is spawned on it).
    pub fn open(config: &Config) -> Result<Self> {
        let blobs = FileBlobStore::open(&config.storage.dir)
            .context(format!("Failed to open storage dir {}", config.storage.dir.display()))?;
        let path = blobs.path_for(&config.storage.key).context("Invalid storage key")?;
        info!(path = %path.display(), "Opening task store");

        let adapter = Arc::new(JsonAdapter::with_key(blobs, config.storage.key.clone()));
        Ok(Self::with_adapter(adapter, config.display.clone()))
    }

    /// Build the app around any persistence adapter
    pub fn with_adapter(adapter: Arc<dyn PersistenceAdapter>, display: DisplayConfig) -> Self {
        let mut store = Store::load(adapter.as_ref());
        let writer = SaveWriter::spawn(adapter);
        store.subscribe(writer.subscriber());
        Self { store, writer, display }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Apply one request to the store
    pub fn handle(&mut self, request: Request) -> Outcome {
        debug!(?request, "handle: called");
        let mut notes = Vec::new();
        let mut view = None;

        let changed = match request {
            Request::Add(text) => self.store.add_todo(&text).is_some(),
            Request::Toggle(reference) => {
                let id = self.resolve(&reference, &mut notes);
                self.store.toggle_todo(&id)
            }
            Request::Delete(reference) => {
                let id = self.resolve(&reference, &mut notes);
                self.store.delete_todo(&id)
            }
            Request::Edit { reference, title } => {
                let id = self.resolve(&reference, &mut notes);
                self.store.edit_todo(&id, &title)
            }
            Request::ToggleAll(completed) => self.store.toggle_all(completed),
            Request::ClearCompleted => self.store.clear_completed(),
            Request::Filter(route) => self.store.set_filter(Filter::from_route(&route)),
            Request::List(route) => {
                view = route.as_deref().map(Filter::from_route);
                false
            }
        };

        Outcome { changed, notes, view }
    }

    /// Map a typed reference to a task ID
    ///
    /// Unmatched and ambiguous references are passed through as-is so the
    /// store treats them as unknown IDs; the user gets a note either way.
    fn resolve(&self, reference: &str, notes: &mut Vec<String>) -> TaskId {
        match self.store.state().resolve(reference) {
            Ok(Some(id)) => id,
            Ok(None) => {
                notes.push(format!("No task matches '{}'", reference));
                TaskId::from(reference)
            }
            Err(candidates) => {
                notes.push(format!(
                    "'{}' matches {} tasks; type more of the ID",
                    reference,
                    candidates.len()
                ));
                TaskId::from(reference)
            }
        }
    }

    /// Render the list, under `one_off` if given or the stored filter otherwise
    pub fn render(&self, one_off: Option<Filter>) -> String {
        let state = self.store.state();
        match one_off {
            Some(filter) if filter != state.filter => {
                let visible: Vec<_> = selectors::todos_matching(&state, filter).into_iter().cloned().collect();
                view::render(&state, &visible, filter, &self.display)
            }
            _ => view::render(&state, &self.store.filtered_todos(), state.filter, &self.display),
        }
    }

    /// Write the final state and stop the save writer
    pub async fn close(self) -> Result<()> {
        let stats = self.writer.shutdown().await.context("Failed to stop save writer")?;
        if stats.failed > 0 {
            warn!(failed = stats.failed, "Some saves failed this session");
        }
        info!(saved = stats.saved, "Closed task store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todostore::{BlobStore, MemoryBlobStore, STORAGE_KEY};

    fn app() -> (App, Arc<JsonAdapter<Arc<MemoryBlobStore>>>) {
        let adapter = Arc::new(JsonAdapter::new(Arc::new(MemoryBlobStore::new())));
        let display = DisplayConfig {
            color: false,
            show_ids: false,
        };
        (App::with_adapter(adapter.clone(), display), adapter)
    }

    fn add(app: &mut App, text: &str) -> String {
        app.handle(Request::Add(text.to_string()));
        app.store().all_todos().last().unwrap().id.to_string()
    }

    #[tokio::test]
    async fn test_add_toggle_and_persist() {
        let (mut app, adapter) = app();
        let id = add(&mut app, "Buy milk");

        let outcome = app.handle(Request::Toggle(id.clone()));
        assert!(outcome.changed);
        assert!(outcome.notes.is_empty());
        assert!(app.store().all_completed());

        app.close().await.unwrap();
        let saved = adapter.load().unwrap();
        assert!(saved.todos[0].completed);
        assert!(adapter.blobs().get(STORAGE_KEY).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_prefix_reference() {
        let (mut app, _) = app();
        let id = add(&mut app, "A");

        let outcome = app.handle(Request::Delete(id[..12].to_string()));
        assert!(outcome.changed);
        assert!(app.store().all_todos().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_reference_is_noop_with_note() {
        let (mut app, _) = app();
        add(&mut app, "A");

        let outcome = app.handle(Request::Toggle("nope".to_string()));
        assert!(!outcome.changed);
        assert_eq!(outcome.notes, vec!["No task matches 'nope'".to_string()]);
        assert_eq!(app.store().completed_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_add_and_blank_edit() {
        let (mut app, _) = app();
        assert!(!app.handle(Request::Add("   ".to_string())).changed);

        let id = add(&mut app, "A");
        let outcome = app.handle(Request::Edit {
            reference: id,
            title: "  ".to_string(),
        });
        assert!(outcome.changed);
        assert!(app.store().all_todos().is_empty());
    }

    #[tokio::test]
    async fn test_filter_routes() {
        let (mut app, _) = app();
        app.handle(Request::Filter("#/completed".to_string()));
        assert_eq!(app.store().filter(), Filter::Completed);

        app.handle(Request::Filter("#/whatever".to_string()));
        assert_eq!(app.store().filter(), Filter::All);
    }

    #[tokio::test]
    async fn test_list_view_does_not_change_filter() {
        let (mut app, _) = app();
        let id = add(&mut app, "done thing");
        add(&mut app, "open thing");
        app.handle(Request::Toggle(id));

        let outcome = app.handle(Request::List(Some("active".to_string())));
        assert!(!outcome.changed);
        assert_eq!(outcome.view, Some(Filter::Active));
        assert_eq!(app.store().filter(), Filter::All);

        let text = app.render(outcome.view);
        assert!(text.contains("open thing"));
        assert!(!text.contains("done thing"));
    }

    #[tokio::test]
    async fn test_reload_from_adapter() {
        let (mut app, adapter) = app();
        add(&mut app, "A");
        add(&mut app, "B");
        app.handle(Request::ToggleAll(true));
        app.close().await.unwrap();

        let reopened = App::with_adapter(
            adapter,
            DisplayConfig {
                color: false,
                show_ids: false,
            },
        );
        assert_eq!(reopened.store().all_todos().len(), 2);
        assert!(reopened.store().all_completed());
    }
}
