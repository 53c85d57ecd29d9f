// Debounced document autosave
//
// Document changes are sent to a dedicated worker over a channel. The worker
// writes only the latest content once the quiet period passes without another
// change. Dropping the handle cancels any pending write.

mod debounce;

pub use debounce::Debouncer;

use crate::events::{EditorEventEmitter, SaveStatus, SaveStatusPayload};
use crate::storage::{KeyValueStore, StorageError};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Commands sent to the autosave worker
enum AutosaveCommand {
    /// Document changed; (re)start the quiet period with this content
    Schedule(String),
    /// Write any pending content now and report whether something was written
    Flush(Sender<Result<bool, StorageError>>),
    /// Drop pending content without writing, then acknowledge
    Cancel(Sender<()>),
    /// Stop the worker, discarding pending content
    Shutdown,
}

/// Errors from autosave handle operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AutosaveError {
    /// The worker thread has exited
    #[error("Autosave worker disconnected")]
    WorkerDisconnected,
    /// Writing the document failed
    #[error("Autosave failed: {0}")]
    Storage(#[from] StorageError),
}

/// Handle to the autosave worker
///
/// Commands are sent via channel to the dedicated worker thread.
/// When dropped, the worker is shut down and pending content is discarded.
pub struct AutosaveHandle {
    sender: Sender<AutosaveCommand>,
    thread: Option<JoinHandle<()>>,
}

impl AutosaveHandle {
    /// Spawn a worker writing to `key` in `storage` after `delay` of inactivity
    pub fn spawn(
        storage: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
        delay: Duration,
        emitter: Arc<dyn EditorEventEmitter>,
    ) -> Self {
        let (sender, receiver) = mpsc::channel();
        let key = key.into();

        let thread = thread::spawn(move || {
            autosave_main(receiver, storage, key, Debouncer::new(delay), emitter);
        });

        Self {
            sender,
            thread: Some(thread),
        }
    }

    /// Schedule `content` to be written after the quiet period
    pub fn schedule(&self, content: String) -> Result<(), AutosaveError> {
        self.sender
            .send(AutosaveCommand::Schedule(content))
            .map_err(|_| AutosaveError::WorkerDisconnected)
    }

    /// Write pending content immediately.
    ///
    /// Returns whether anything was pending. Blocks until the worker responds.
    #[must_use = "this returns a Result that should be handled"]
    pub fn flush(&self) -> Result<bool, AutosaveError> {
        let (response_tx, response_rx) = mpsc::channel();
        self.sender
            .send(AutosaveCommand::Flush(response_tx))
            .map_err(|_| AutosaveError::WorkerDisconnected)?;

        response_rx
            .recv()
            .map_err(|_| AutosaveError::WorkerDisconnected)?
            .map_err(AutosaveError::from)
    }

    /// Discard pending content without writing.
    ///
    /// Blocks until the worker acknowledges, so a write already in progress
    /// has finished when this returns.
    pub fn cancel(&self) -> Result<(), AutosaveError> {
        let (response_tx, response_rx) = mpsc::channel();
        self.sender
            .send(AutosaveCommand::Cancel(response_tx))
            .map_err(|_| AutosaveError::WorkerDisconnected)?;

        response_rx
            .recv()
            .map_err(|_| AutosaveError::WorkerDisconnected)
    }
}

impl Drop for AutosaveHandle {
    /// Stop the worker and wait for it, discarding any pending write.
    fn drop(&mut self) {
        let _ = self.sender.send(AutosaveCommand::Shutdown);

        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Write `content` and report the outcome
fn write_content(
    storage: &dyn KeyValueStore,
    key: &str,
    content: &str,
    emitter: &dyn EditorEventEmitter,
) -> Result<(), StorageError> {
    let result = storage.set(key, content);
    let status = match &result {
        Ok(()) => {
            crate::debug!("Autosaved {} bytes", content.len());
            SaveStatus::Saved
        }
        Err(e) => {
            crate::warn!("Autosave failed: {}", e);
            SaveStatus::Error
        }
    };
    emitter.emit_save_status(SaveStatusPayload { status });
    result
}

/// Main loop for the autosave worker
fn autosave_main(
    receiver: Receiver<AutosaveCommand>,
    storage: Arc<dyn KeyValueStore>,
    key: String,
    mut debouncer: Debouncer<String>,
    emitter: Arc<dyn EditorEventEmitter>,
) {
    crate::debug!("Autosave worker started ({:?} quiet period)", debouncer.delay());

    loop {
        let command = match debouncer.deadline() {
            Some(deadline) => {
                let wait = deadline.saturating_duration_since(Instant::now());
                match receiver.recv_timeout(wait) {
                    Ok(command) => command,
                    Err(RecvTimeoutError::Timeout) => {
                        if let Some(content) = debouncer.take_due(Instant::now()) {
                            let _ = write_content(&*storage, &key, &content, &*emitter);
                        }
                        continue;
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            None => match receiver.recv() {
                Ok(command) => command,
                Err(_) => break,
            },
        };

        match command {
            AutosaveCommand::Schedule(content) => {
                debouncer.schedule(content, Instant::now());
                emitter.emit_save_status(SaveStatusPayload {
                    status: SaveStatus::Saving,
                });
            }
            AutosaveCommand::Flush(response_tx) => {
                let result = match debouncer.take() {
                    Some(content) => write_content(&*storage, &key, &content, &*emitter).map(|_| true),
                    None => Ok(false),
                };
                let _ = response_tx.send(result);
            }
            AutosaveCommand::Cancel(response_tx) => {
                if debouncer.cancel() {
                    crate::debug!("Pending autosave cancelled");
                }
                let _ = response_tx.send(());
            }
            AutosaveCommand::Shutdown => {
                if debouncer.cancel() {
                    crate::debug!("Autosave worker stopping, pending write discarded");
                }
                break;
            }
        }
    }

    crate::debug!("Autosave worker exited");
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
