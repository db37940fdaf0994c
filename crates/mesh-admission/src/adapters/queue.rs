//! # Cross-Context Queue
//!
//! Bounded hand-off of fixed-size work items between an interrupt-like
//! producer context and the cooperative consumer loop.
//!
//! ## Wait policies
//!
//! - Interrupt side: [`CrossContextQueue::try_enqueue`] never waits; a
//!   full queue fails immediately and the caller counts the drop.
//! - Cooperative side: [`CrossContextQueue::enqueue_timeout`] waits at
//!   most the given bound for space, then fails.
//! - Consumer: [`CrossContextQueue::try_dequeue`] is a non-blocking
//!   poll; the cooperative loop never stalls on an empty queue.
//!
//! Capacity is fixed at construction and never grows, bounding both
//! worst-case memory and worst-case producer latency. The queue has no
//! states beyond empty / partially-full / full; no caller loops on it
//! indefinitely.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Condvar, Mutex};
use std::time::Duration;

/// Default slot count; small enough that worst-case memory is a few
/// cache lines of items.
pub const DEFAULT_QUEUE_CAPACITY: usize = 16;

/// A failed hand-off. Ownership of the item returns to the caller.
#[derive(Debug, PartialEq, Eq)]
pub enum QueueError<T> {
    /// The queue was full and the call does not wait.
    Full(T),
    /// Space did not free up within the bounded wait.
    Timeout(T),
}

impl<T> std::fmt::Display for QueueError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueueError::Full(_) => write!(f, "queue is full"),
            QueueError::Timeout(_) => write!(f, "timed out waiting for queue space"),
        }
    }
}

impl<T: std::fmt::Debug> std::error::Error for QueueError<T> {}

impl<T> QueueError<T> {
    /// Recover the item that could not be enqueued.
    pub fn into_inner(self) -> T {
        match self {
            QueueError::Full(item) | QueueError::Timeout(item) => item,
        }
    }
}

/// Bounded queue for producer/consumer hand-off across execution
/// contexts.
///
/// The only component in the subsystem designed for concurrent access:
/// one mutex-guarded buffer, a condition variable for the bounded
/// cooperative-side wait, and an atomic counter of failed hand-offs.
#[derive(Debug)]
pub struct CrossContextQueue<T> {
    items: Mutex<VecDeque<T>>,
    space_freed: Condvar,
    capacity: usize,
    dropped: AtomicU64,
}

impl<T> CrossContextQueue<T> {
    /// Create a queue with a fixed slot count (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: Mutex::new(VecDeque::with_capacity(capacity)),
            space_freed: Condvar::new(),
            capacity,
            dropped: AtomicU64::new(0),
        }
    }

    /// Non-blocking enqueue for the interrupt-like context.
    ///
    /// Fails immediately on a full queue; the drop is counted and the
    /// item handed back. Never retried here: blocking or spinning in
    /// the producer context is unacceptable.
    pub fn try_enqueue(&self, item: T) -> Result<(), QueueError<T>> {
        let mut items = self.items.lock().unwrap();
        if items.len() >= self.capacity {
            drop(items);
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return Err(QueueError::Full(item));
        }
        items.push_back(item);
        Ok(())
    }

    /// Enqueue from the cooperative context, waiting at most `wait` for
    /// a slot.
    pub fn enqueue_timeout(&self, item: T, wait: Duration) -> Result<(), QueueError<T>> {
        let items = self.items.lock().unwrap();
        let (mut items, _timeout) = self
            .space_freed
            .wait_timeout_while(items, wait, |items| items.len() >= self.capacity)
            .unwrap();
        if items.len() >= self.capacity {
            drop(items);
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return Err(QueueError::Timeout(item));
        }
        items.push_back(item);
        Ok(())
    }

    /// Non-blocking poll from the cooperative consumer loop.
    pub fn try_dequeue(&self) -> Option<T> {
        let mut items = self.items.lock().unwrap();
        let item = items.pop_front();
        if item.is_some() {
            self.space_freed.notify_one();
        }
        item
    }

    /// Current queue depth.
    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    /// Whether the queue holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.lock().unwrap().is_empty()
    }

    /// Whether every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    /// The fixed slot count.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total hand-offs that failed since construction.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl<T> Default for CrossContextQueue<T> {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}
