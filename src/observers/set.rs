//! # Non-blocking fan-out of bus records to observers.
//!
//! ## Architecture
//! ```text
//! emit(record)
//!     │
//!     ├──► [queue 1] ──► worker 1 ──► observer1.on_event()
//!     │    (bounded)         └──────► panic → tracing::error!
//!     ├──► [queue 2] ──► worker 2 ──► observer2.on_event()
//!     │    (bounded)
//!     └──► [queue N] ──► worker N ──► observerN.on_event()
//!          (bounded)
//! ```
//!
//! ## Rules
//! - **No cross-observer ordering**: use `DispatchEvent::seq`
//! - **Overflow**: record dropped for that observer only, logged as a warning
//! - **Non-blocking**: `emit()` returns immediately (uses `try_send`)
//! - **Isolation**: a slow or panicking observer doesn't affect others
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state inconsistent
//! if an observer uses `Arc<Mutex<T>>` and panics while holding the lock.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::events::DispatchEvent;
use crate::observers::Observe;

/// Per-observer channel metadata.
struct ObserverChannel {
    name: &'static str,
    sender: mpsc::Sender<Arc<DispatchEvent>>,
}

/// Fan-out coordinator for bus observers.
pub struct ObserverSet {
    channels: RwLock<Vec<ObserverChannel>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl ObserverSet {
    /// Creates a new set and spawns one worker task per observer.
    ///
    /// # Panics
    /// Panics when `observers` is non-empty and no tokio runtime is running.
    #[must_use]
    pub fn new(observers: Vec<Arc<dyn Observe>>) -> Self {
        let mut channels = Vec::with_capacity(observers.len());
        let mut workers = Vec::with_capacity(observers.len());

        for obs in observers {
            let cap = obs.queue_capacity().max(1);
            let name = obs.name();
            let (tx, mut rx) = mpsc::channel::<Arc<DispatchEvent>>(cap);

            let handle = tokio::spawn(async move {
                while let Some(ev) = rx.recv().await {
                    let fut = obs.on_event(ev.as_ref());

                    if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                        let info = if let Some(msg) = panic_err.downcast_ref::<&'static str>() {
                            (*msg).to_string()
                        } else if let Some(msg) = panic_err.downcast_ref::<String>() {
                            msg.clone()
                        } else {
                            "unknown panic".to_string()
                        };
                        tracing::error!(
                            observer = obs.name(),
                            seq = ev.seq,
                            %info,
                            "observer panicked"
                        );
                    }
                }
            });
            channels.push(ObserverChannel { name, sender: tx });
            workers.push(handle);
        }
        Self {
            channels: RwLock::new(channels),
            workers: Mutex::new(workers),
        }
    }

    /// Whether no observer is attached (or the set was shut down).
    pub fn is_empty(&self) -> bool {
        self.channels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// Sends a record to every observer without waiting.
    ///
    /// On a full or closed queue the record is dropped for that observer only.
    pub fn emit(&self, event: DispatchEvent) {
        let channels = self.channels.read().unwrap_or_else(PoisonError::into_inner);
        if channels.is_empty() {
            return;
        }
        let event = Arc::new(event);

        for channel in channels.iter() {
            match channel.sender.try_send(Arc::clone(&event)) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::warn!(
                        observer = channel.name,
                        reason = "full",
                        seq = event.seq,
                        "observer record dropped"
                    );
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    tracing::warn!(
                        observer = channel.name,
                        reason = "closed",
                        seq = event.seq,
                        "observer record dropped"
                    );
                }
            }
        }
    }

    /// Gracefully shuts down all observer workers.
    ///
    /// 1. Drops all channel senders (workers drain their queue, then exit)
    /// 2. Awaits all worker tasks to finish
    ///
    /// Records emitted afterwards are discarded silently.
    pub async fn shutdown(&self) {
        drop(std::mem::take(
            &mut *self.channels.write().unwrap_or_else(PoisonError::into_inner),
        ));
        let workers = std::mem::take(
            &mut *self.workers.lock().unwrap_or_else(PoisonError::into_inner),
        );

        for h in workers {
            let _ = h.await;
        }
    }
}

impl Default for ObserverSet {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
