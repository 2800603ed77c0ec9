//! # Signal — Winner Election and Single Delivery
//!
//! The only shared mutable state between lanes. [`CancellationFlag`] is one
//! atomic word: lanes poll it before every candidate, and the first lane to
//! accept a candidate claims it with a compare-and-swap. Only the claimant
//! writes to the [`ResultSlot`], so the slot receives at most one value even
//! when two lanes accept candidates at the same instant.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use tracing::debug;

/// Search-wide stop signal, set exactly once by the winning lane (and again,
/// idempotently, by the coordinator).
#[derive(Debug, Default)]
pub struct CancellationFlag {
    set: AtomicBool,
}

impl CancellationFlag {
    pub fn new() -> Self {
        CancellationFlag {
            set: AtomicBool::new(false),
        }
    }

    pub fn is_set(&self) -> bool {
        self.set.load(Ordering::Acquire)
    }

    /// Atomically move the flag from clear to set. Returns true for exactly
    /// one caller over the flag's lifetime.
    pub fn try_claim(&self) -> bool {
        self.set
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Unconditionally set the flag.
    pub fn set(&self) {
        self.set.store(true, Ordering::Release);
    }
}

/// Sending half of a capacity-one result channel, with a delivery counter.
pub struct ResultSlot<T> {
    sender: SyncSender<T>,
    deliveries: AtomicUsize,
}

/// Create a slot and the receiver the coordinator waits on.
pub fn result_slot<T>() -> (ResultSlot<T>, Receiver<T>) {
    let (sender, receiver) = mpsc::sync_channel(1);
    (
        ResultSlot {
            sender,
            deliveries: AtomicUsize::new(0),
        },
        receiver,
    )
}

impl<T> ResultSlot<T> {
    /// Write a value. Callers must hold a successful
    /// [`CancellationFlag::try_claim`]; the slot itself does not enforce it.
    pub fn deliver(&self, value: T) {
        self.deliveries.fetch_add(1, Ordering::AcqRel);
        match self.sender.try_send(value) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => debug!("result slot already full, value dropped"),
            Err(TrySendError::Disconnected(_)) => debug!("result receiver gone, value dropped"),
        }
    }

    /// Number of [`deliver`](Self::deliver) calls so far.
    pub fn deliveries(&self) -> usize {
        self.deliveries.load(Ordering::Acquire)
    }
}
