//! SaveWriter - actor that writes committed states in the background
//!
//! The store notifies the writer through an unbounded channel, so notifying
//! never blocks and never fails the transition. Queued states are coalesced:
//! when several arrive before the writer wakes up, only the newest is written.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use super::{PersistError, PersistenceAdapter};
use crate::domain::AppState;

/// Counters reported when the writer stops
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WriterStats {
    /// States handed to the writer
    pub received: u64,
    /// Successful writes
    pub saved: u64,
    /// Writes that failed and were logged
    pub failed: u64,
}

#[derive(Debug)]
enum WriterCommand {
    Save(Arc<AppState>),
    Flush(oneshot::Sender<WriterStats>),
    Shutdown(oneshot::Sender<WriterStats>),
}

/// Handle to the background writer
#[derive(Debug, Clone)]
pub struct SaveWriter {
    tx: mpsc::UnboundedSender<WriterCommand>,
}

impl SaveWriter {
    /// Spawn the writer task on the current tokio runtime
    pub fn spawn(adapter: Arc<dyn PersistenceAdapter>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(writer_loop(adapter, rx));
        info!("SaveWriter spawned");
        Self { tx }
    }

    /// Queue a state for writing without waiting
    pub fn notify(&self, state: Arc<AppState>) {
        if self.tx.send(WriterCommand::Save(state)).is_err() {
            warn!("SaveWriter has stopped; state not persisted");
        }
    }

    /// Listener suitable for [`crate::Store::subscribe`]
    pub fn subscriber(&self) -> impl Fn(&Arc<AppState>) + 'static {
        let writer = self.clone();
        move |state: &Arc<AppState>| writer.notify(Arc::clone(state))
    }

    /// Wait until everything queued so far has been written
    pub async fn flush(&self) -> Result<WriterStats, PersistError> {
        debug!("flush: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(WriterCommand::Flush(reply_tx))
            .map_err(|_| PersistError::WriterClosed)?;
        reply_rx.await.map_err(|_| PersistError::WriterClosed)
    }

    /// Write anything pending and stop the writer
    pub async fn shutdown(&self) -> Result<WriterStats, PersistError> {
        debug!("shutdown: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(WriterCommand::Shutdown(reply_tx))
            .map_err(|_| PersistError::WriterClosed)?;
        reply_rx.await.map_err(|_| PersistError::WriterClosed)
    }
}

async fn writer_loop(adapter: Arc<dyn PersistenceAdapter>, mut rx: mpsc::UnboundedReceiver<WriterCommand>) {
    let mut stats = WriterStats::default();

    while let Some(first) = rx.recv().await {
        let mut pending: Option<Arc<AppState>> = None;
        let mut next = Some(first);
        let mut stop = false;

        // Drain whatever is already queued before touching the backing store
        while let Some(cmd) = next.take() {
            match cmd {
                WriterCommand::Save(state) => {
                    stats.received += 1;
                    pending = Some(state);
                }
                WriterCommand::Flush(reply) => {
                    write(&adapter, pending.take(), &mut stats).await;
                    let _ = reply.send(stats);
                }
                WriterCommand::Shutdown(reply) => {
                    write(&adapter, pending.take(), &mut stats).await;
                    let _ = reply.send(stats);
                    stop = true;
                    break;
                }
            }
            next = rx.try_recv().ok();
        }

        write(&adapter, pending.take(), &mut stats).await;
        if stop {
            break;
        }
    }

    info!(
        received = stats.received,
        saved = stats.saved,
        failed = stats.failed,
        "SaveWriter stopped"
    );
}

async fn write(adapter: &Arc<dyn PersistenceAdapter>, state: Option<Arc<AppState>>, stats: &mut WriterStats) {
    let Some(state) = state else {
        return;
    };

    let adapter = Arc::clone(adapter);
    let result = tokio::task::spawn_blocking(move || adapter.save(&state)).await;

    match result {
        Ok(Ok(())) => stats.saved += 1,
        Ok(Err(e)) => {
            stats.failed += 1;
            warn!(error = %e, "Failed to save state");
        }
        Err(e) => {
            stats.failed += 1;
            warn!(error = %e, "Save task panicked");
        }
    }
}
