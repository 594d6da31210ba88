//! Single-resolution futures.
//!
//! [`deferred`] creates a [`Promise`] / [`FutureHandle`] pair over a
//! one-slot [`crossbeam_channel`] rendezvous. The producer delivers exactly
//! once: [`Promise::deliver`] consumes the promise, so a second delivery
//! cannot be written. The consumer side blocks on the first read, caches the
//! value, and hands out clones of the cached value from then on.
//!
//! There is no cancellation and no timeout. A consumer blocks until the value
//! arrives or the promise is dropped; in the latter case the read resolves to
//! an error value instead of blocking forever.

use crate::values::Value;
use crossbeam_channel::{self as cb};
use std::fmt;
use std::sync::{Arc, OnceLock};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Returned by [`Promise::deliver`] when every handle to the future has been
/// dropped. Carries the undelivered value back to the producer.
#[derive(Debug, Clone, Error)]
#[error("deliver failed: no future is waiting for the value")]
pub struct DeliveryError(pub Value);

/// Message of the value a future resolves to when its promise is dropped
/// without delivering.
pub const ABANDONED_MESSAGE: &str = "Await: future was abandoned before a value was delivered";

// ---------------------------------------------------------------------------
// Promise
// ---------------------------------------------------------------------------

/// The producing half. Not `Clone`: there is exactly one producer.
pub struct Promise {
    tx: cb::Sender<Value>,
}

impl fmt::Debug for Promise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Promise").finish_non_exhaustive()
    }
}

impl Promise {
    /// Deliver the value. Never blocks: the slot holds exactly one value and
    /// this is the only send.
    pub fn deliver(self, value: Value) -> Result<(), DeliveryError> {
        self.tx.send(value).map_err(|e| DeliveryError(e.0))
    }
}

// ---------------------------------------------------------------------------
// FutureHandle
// ---------------------------------------------------------------------------

struct Slot {
    rx: cb::Receiver<Value>,
    value: OnceLock<Value>,
}

/// The consuming half. Clones share the same slot, so every clone observes
/// the same resolved value.
#[derive(Clone)]
pub struct FutureHandle {
    slot: Arc<Slot>,
}

impl fmt::Debug for FutureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FutureHandle")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

impl FutureHandle {
    /// A future that is already resolved to `value`.
    pub fn ready(value: Value) -> Self {
        let (_tx, rx) = cb::bounded(1);
        Self {
            slot: Arc::new(Slot {
                rx,
                value: OnceLock::from(value),
            }),
        }
    }

    /// Block until the value is delivered, then return it. Later calls return
    /// the cached value immediately. Concurrent callers wait for the first
    /// read to finish and then share its result.
    pub fn await_value(&self) -> Value {
        self.slot
            .value
            .get_or_init(|| match self.slot.rx.recv() {
                Ok(value) => value,
                Err(_) => Value::error(ABANDONED_MESSAGE),
            })
            .clone()
    }

    /// Non-blocking read: the value if it has been delivered, `None` while
    /// nothing is in the slot yet. An abandoned future is only reported by
    /// [`await_value`](Self::await_value).
    pub fn try_value(&self) -> Option<Value> {
        if let Some(v) = self.slot.value.get() {
            return Some(v.clone());
        }
        // The channel is only drained inside `await_value`'s initialiser, so a
        // concurrent awaiter never loses the value to this call.
        if self.slot.rx.is_empty() {
            return None;
        }
        Some(self.await_value())
    }

    /// Whether a value has already been read into the cache.
    pub fn is_resolved(&self) -> bool {
        self.slot.value.get().is_some()
    }
}

// ---------------------------------------------------------------------------
// Constructor
// ---------------------------------------------------------------------------

/// Create a connected promise / future pair.
pub fn deferred() -> (Promise, FutureHandle) {
    let (tx, rx) = cb::bounded(1);
    let handle = FutureHandle {
        slot: Arc::new(Slot {
            rx,
            value: OnceLock::new(),
        }),
    };
    (Promise { tx }, handle)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
