//! # Non-blocking transition fan-out to multiple observers.
//!
//! Provides [`ObserverSet`], which distributes transitions to observers without
//! blocking the publisher (which holds the engine lock while emitting).
//!
//! ## Architecture
//! ```text
//! emit(transition)
//!     │
//!     ├──► [queue 1] ──► worker 1 ──► observer1.on_transition()
//!     │    (bounded)         └──────► panic → warn!, keep going
//!     ├──► [queue 2] ──► worker 2 ──► observer2.on_transition()
//!     │    (bounded)
//!     └──► [queue N] ──► worker N ──► observerN.on_transition()
//! ```
//!
//! ## Rules
//! - **Non-blocking**: `emit()` uses `try_send` and returns immediately
//! - **Overflow**: transition dropped for that observer only, logged at warn
//! - **Per-observer FIFO**: each observer sees transitions in publication order
//! - **Close**: `close()` drops all senders and waits for workers to drain
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state inconsistent
//! if an observer uses `Arc<Mutex<T>>` and panics while holding the lock.

use std::sync::{Arc, Mutex, PoisonError};

use futures::FutureExt;
use tokio::{runtime::Handle, sync::mpsc, task::JoinHandle};

use crate::events::Transition;
use crate::observers::Observe;

/// Per-observer channel metadata.
struct ObserverChannel {
    name: &'static str,
    sender: mpsc::Sender<Arc<Transition>>,
}

/// Fan-out coordinator for transition observers.
pub struct ObserverSet {
    channels: Mutex<Vec<ObserverChannel>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl ObserverSet {
    /// Creates a new set and spawns one worker task per observer on `rt`.
    #[must_use]
    pub fn new(observers: Vec<Arc<dyn Observe>>, rt: &Handle) -> Self {
        let mut channels = Vec::with_capacity(observers.len());
        let mut workers = Vec::with_capacity(observers.len());

        for obs in observers {
            let cap = obs.queue_capacity().max(1);
            let name = obs.name();
            let (tx, mut rx) = mpsc::channel::<Arc<Transition>>(cap);

            let handle = rt.spawn(async move {
                while let Some(t) = rx.recv().await {
                    let fut = obs.on_transition(t.as_ref());

                    if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                        let info = {
                            let any = &*panic_err;
                            if let Some(msg) = any.downcast_ref::<&'static str>() {
                                (*msg).to_string()
                            } else if let Some(msg) = any.downcast_ref::<String>() {
                                msg.clone()
                            } else {
                                "unknown panic".to_string()
                            }
                        };
                        tracing::warn!(observer = obs.name(), %info, "observer panicked");
                    }
                }
            });
            channels.push(ObserverChannel { name, sender: tx });
            workers.push(handle);
        }
        Self {
            channels: Mutex::new(channels),
            workers: Mutex::new(workers),
        }
    }

    /// Creates a set with no observers.
    pub fn empty() -> Self {
        Self {
            channels: Mutex::new(Vec::new()),
            workers: Mutex::new(Vec::new()),
        }
    }

    /// Emits a transition to all observers.
    ///
    /// - Uses `try_send` (non-blocking)
    /// - On queue full or closed: drops the transition for that observer and logs
    pub fn emit(&self, transition: Arc<Transition>) {
        let channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
        for channel in channels.iter() {
            match channel.sender.try_send(Arc::clone(&transition)) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::warn!(observer = channel.name, seq = transition.seq, "observer queue full; transition dropped");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    tracing::warn!(observer = channel.name, seq = transition.seq, "observer worker closed; transition dropped");
                }
            }
        }
    }

    /// Stops accepting transitions and waits for every worker to drain its queue.
    ///
    /// Idempotent: later calls return immediately.
    pub async fn close(&self) {
        self.channels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();

        let workers = std::mem::take(
            &mut *self.workers.lock().unwrap_or_else(PoisonError::into_inner),
        );
        for h in workers {
            let _ = h.await;
        }
    }
}
