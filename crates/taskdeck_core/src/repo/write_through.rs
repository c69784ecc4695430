//! Write-through persistence adapter.
//!
//! # Responsibility
//! - Expose the read/write contract the task store depends on.
//! - Apply writes on a dedicated writer thread so mutations never wait on
//!   storage.
//!
//! # Invariants
//! - Writes are applied in the order they were issued.
//! - A failed write is logged and dropped; it is never retried or surfaced.
//! - Dropping the adapter drains every queued write before returning.

use crate::repo::kv_repo::{KvError, KvRepository, KvResult};
use log::{debug, error, warn};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

const WRITER_THREAD_NAME: &str = "taskdeck-writer";

/// Read/write contract consumed by the task store.
pub trait PersistentStore {
    /// Reads the value stored under `key`.
    fn read(&self, key: &str) -> KvResult<Option<String>>;
    /// Schedules `value` to be stored under `key`; returns before it is
    /// durable.
    fn write(&self, key: &str, value: String);
}

enum WriteCommand {
    Put { key: String, value: String },
    Flush(Sender<()>),
}

/// Adapter that reads synchronously and writes on a background thread.
pub struct WriteThroughStore {
    backend: Arc<Mutex<dyn KvRepository>>,
    sender: Option<Sender<WriteCommand>>,
    worker: Option<JoinHandle<()>>,
}

impl WriteThroughStore {
    /// Wraps `repo` and starts the writer thread.
    ///
    /// # Errors
    /// - `Io` when the writer thread cannot be spawned.
    pub fn new<R: KvRepository + 'static>(repo: R) -> KvResult<Self> {
        let backend: Arc<Mutex<dyn KvRepository>> = Arc::new(Mutex::new(repo));
        let (sender, receiver) = mpsc::channel();
        let worker_backend = Arc::clone(&backend);
        let worker = thread::Builder::new()
            .name(WRITER_THREAD_NAME.to_string())
            .spawn(move || run_writer(worker_backend, receiver))
            .map_err(KvError::Io)?;

        Ok(Self {
            backend,
            sender: Some(sender),
            worker: Some(worker),
        })
    }

    /// Blocks until every write issued before this call has been applied.
    ///
    /// # Errors
    /// - `WriterStopped` when the writer thread is gone.
    pub fn flush(&self) -> KvResult<()> {
        let sender = self.sender.as_ref().ok_or(KvError::WriterStopped)?;
        let (ack_sender, ack_receiver) = mpsc::channel();
        sender
            .send(WriteCommand::Flush(ack_sender))
            .map_err(|_| KvError::WriterStopped)?;
        ack_receiver.recv().map_err(|_| KvError::WriterStopped)
    }
}

impl PersistentStore for WriteThroughStore {
    fn read(&self, key: &str) -> KvResult<Option<String>> {
        let backend = self.backend.lock().map_err(|_| KvError::Poisoned)?;
        backend.get(key)
    }

    fn write(&self, key: &str, value: String) {
        let Some(sender) = self.sender.as_ref() else {
            warn!("event=kv_write module=persist status=dropped reason=writer_closed key={key}");
            return;
        };
        let command = WriteCommand::Put {
            key: key.to_string(),
            value,
        };
        if sender.send(command).is_err() {
            warn!("event=kv_write module=persist status=dropped reason=writer_stopped key={key}");
        }
    }
}

impl Drop for WriteThroughStore {
    fn drop(&mut self) {
        // Closing the channel ends the writer loop once the queue is empty.
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("event=kv_writer_join module=persist status=error reason=writer_panicked");
            }
        }
    }
}

fn run_writer(backend: Arc<Mutex<dyn KvRepository>>, receiver: Receiver<WriteCommand>) {
    for command in receiver {
        match command {
            WriteCommand::Put { key, value } => {
                let result = backend
                    .lock()
                    .map_err(|_| KvError::Poisoned)
                    .and_then(|mut repo| repo.put(&key, &value));
                match result {
                    Ok(()) => debug!(
                        "event=kv_write module=persist status=ok key={key} bytes={}",
                        value.len()
                    ),
                    Err(err) => error!(
                        "event=kv_write module=persist status=error key={key} error={err}"
                    ),
                }
            }
            WriteCommand::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
}
