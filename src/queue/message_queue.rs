use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::error::QueueError;

use super::message::Message;

/// One blocked consumer. Lives in the waiter list from the moment a blocking
/// dequeue finds the buffer empty until it is either handed a message or
/// removed on timeout. Each waiter receives at most one message, through its
/// single-use channel.
#[derive(Debug)]
struct Waiter {
    id: u64,
    tx: oneshot::Sender<Message>,
}

/// Buffer and waiter list, mutated together under one lock. The invariant
/// after every operation: buffer and waiters are never both non-empty.
#[derive(Debug)]
struct QueueState {
    buffer: VecDeque<Message>,
    waiters: VecDeque<Waiter>,
}

/// A named bounded FIFO queue.
///
/// Producers call [`enqueue`](MessageQueue::enqueue); consumers call
/// [`dequeue`](MessageQueue::dequeue), optionally blocking until a message
/// arrives. A message enqueued while a consumer is blocked is handed directly
/// to the oldest waiter and never observed sitting in the buffer.
#[derive(Debug)]
pub struct MessageQueue {
    name: String,
    capacity: usize,
    state: Mutex<QueueState>,
    next_waiter_id: AtomicU64,
    stats: QueueStats,
}

/// Per-queue operation counters.
#[derive(Debug)]
pub struct QueueStats {
    enqueued_total: AtomicU64,
    dequeued_total: AtomicU64,
    queue_full_count: AtomicU64,
    timeout_count: AtomicU64,
}

impl QueueStats {
    pub fn new() -> Self {
        Self {
            enqueued_total: AtomicU64::new(0),
            dequeued_total: AtomicU64::new(0),
            queue_full_count: AtomicU64::new(0),
            timeout_count: AtomicU64::new(0),
        }
    }

    pub fn enqueued_total(&self) -> u64 {
        self.enqueued_total.load(Ordering::Relaxed)
    }

    pub fn dequeued_total(&self) -> u64 {
        self.dequeued_total.load(Ordering::Relaxed)
    }

    pub fn queue_full_count(&self) -> u64 {
        self.queue_full_count.load(Ordering::Relaxed)
    }

    pub fn timeout_count(&self) -> u64 {
        self.timeout_count.load(Ordering::Relaxed)
    }
}

impl Default for QueueStats {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageQueue {
    pub fn new(name: String, capacity: usize) -> Self {
        Self {
            name,
            capacity,
            state: Mutex::new(QueueState {
                buffer: VecDeque::new(),
                waiters: VecDeque::new(),
            }),
            next_waiter_id: AtomicU64::new(0),
            stats: QueueStats::new(),
        }
    }

    /// Appends a message, then drains buffered messages to pending waiters.
    ///
    /// Fails with [`QueueError::QueueFull`] only when the buffer is at
    /// capacity and no waiter is pending; a blocked consumer can always
    /// absorb one more message even through a full buffer.
    pub fn enqueue(&self, body: String) -> Result<Message, QueueError> {
        let message = Message::new(body);

        let mut state = self.state.lock();
        if state.buffer.len() >= self.capacity && state.waiters.is_empty() {
            self.stats.queue_full_count.fetch_add(1, Ordering::Relaxed);
            return Err(QueueError::QueueFull);
        }

        state.buffer.push_back(message.clone());
        Self::drain_to_waiters(&mut state);
        self.stats.enqueued_total.fetch_add(1, Ordering::Relaxed);

        Ok(message)
    }

    /// Removes and returns the head message.
    ///
    /// With a zero `timeout` this is non-blocking: an empty buffer fails
    /// immediately with [`QueueError::NoMessageAvailable`]. With a positive
    /// `timeout` the call registers a waiter and suspends, returning the
    /// message a concurrent enqueue hands it, or failing with
    /// [`QueueError::WaitTimeout`] once the timeout elapses. Waiters are
    /// served strictly in registration order.
    pub async fn dequeue(&self, timeout: Duration) -> Result<Message, QueueError> {
        let (id, mut rx) = {
            let mut state = self.state.lock();

            if let Some(message) = state.buffer.pop_front() {
                self.stats.dequeued_total.fetch_add(1, Ordering::Relaxed);
                return Ok(message);
            }

            if timeout.is_zero() {
                return Err(QueueError::NoMessageAvailable);
            }

            let (tx, rx) = oneshot::channel();
            let id = self.next_waiter_id.fetch_add(1, Ordering::Relaxed);
            state.waiters.push_back(Waiter { id, tx });
            (id, rx)
        };
        // Lock released: the wait itself holds no lock, so producers on this
        // queue are free to acquire it and fulfill us.

        match tokio::time::timeout(timeout, &mut rx).await {
            Ok(Ok(message)) => {
                self.stats.dequeued_total.fetch_add(1, Ordering::Relaxed);
                Ok(message)
            }
            // The sender is only dropped if the queue itself goes away.
            Ok(Err(_)) => Err(QueueError::WaitTimeout),
            Err(_) => self.expire_waiter(id, rx),
        }
    }

    /// Timeout path: remove our waiter entry, unless a concurrent enqueue
    /// already fulfilled it — fulfillment and removal both happen under the
    /// lock, so whichever side finds the entry first wins, exactly once.
    fn expire_waiter(
        &self,
        id: u64,
        mut rx: oneshot::Receiver<Message>,
    ) -> Result<Message, QueueError> {
        let still_pending = {
            let mut state = self.state.lock();
            match state.waiters.iter().position(|w| w.id == id) {
                Some(idx) => state.waiters.remove(idx).is_some(),
                None => false,
            }
        };

        if still_pending {
            self.stats.timeout_count.fetch_add(1, Ordering::Relaxed);
            return Err(QueueError::WaitTimeout);
        }

        // Fulfillment won the race; the message was sent under the lock
        // before the waiter entry disappeared, so it is already in the
        // channel.
        match rx.try_recv() {
            Ok(message) => {
                self.stats.dequeued_total.fetch_add(1, Ordering::Relaxed);
                Ok(message)
            }
            Err(_) => Err(QueueError::WaitTimeout),
        }
    }

    /// Pairs the oldest buffered message with the oldest waiter until one of
    /// the two collections is empty. Runs after every enqueue, under the
    /// queue lock. A waiter whose receiver is gone (its dequeue future was
    /// dropped mid-wait) is skipped and the message put back at the head.
    fn drain_to_waiters(state: &mut QueueState) {
        while let Some(message) = state.buffer.pop_front() {
            match state.waiters.pop_front() {
                Some(waiter) => {
                    if let Err(message) = waiter.tx.send(message) {
                        state.buffer.push_front(message);
                    }
                }
                None => {
                    state.buffer.push_front(message);
                    break;
                }
            }
        }
    }

    pub fn size(&self) -> usize {
        self.state.lock().buffer.len()
    }

    pub fn waiter_count(&self) -> usize {
        self.state.lock().waiters.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> &QueueStats {
        &self.stats
    }
}
