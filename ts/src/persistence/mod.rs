//! Persistence of the store's full state to a key-value blob store
//!
//! - [`BlobStore`] - where blobs live ([`FileBlobStore`], [`MemoryBlobStore`])
//! - [`JsonAdapter`] - encodes [`AppState`] as one JSON blob under a key
//! - [`SaveWriter`] - background task that writes each committed state
//!
//! Loading never fails from the caller's point of view: any error is logged and
//! reported as "nothing stored". Saving errors are returned to the writer,
//! which logs them and carries on.

mod blob;
mod json;
mod writer;

use thiserror::Error;

use crate::domain::AppState;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use json::{JsonAdapter, STORAGE_KEY, StoredState};
pub use writer::{SaveWriter, WriterStats};

/// Errors from persistence operations
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Save writer has stopped")]
    WriterClosed,
}

/// Durable home for the store's state
pub trait PersistenceAdapter: Send + Sync {
    /// Read the persisted state, if any
    ///
    /// Absence and decode failures both yield `None`.
    fn load(&self) -> Option<AppState>;

    /// Write the full state
    fn save(&self, state: &AppState) -> Result<(), PersistError>;
}
