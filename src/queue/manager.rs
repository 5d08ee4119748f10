use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;

use crate::error::QueueError;

use super::message::Message;
use super::message_queue::MessageQueue;

/// Registry of named queues, bounded by `max_queues`.
///
/// The registry lock covers only the lookup-or-insert step; queue operations
/// run against the returned `Arc` with the registry lock released, so
/// contention on the registry never throttles per-queue throughput.
pub struct QueueManager {
    queues: Mutex<HashMap<String, Arc<MessageQueue>>>,
    default_capacity: usize,
    max_queues: usize,
}

/// Point-in-time snapshot of every queue, served by the stats endpoint.
#[derive(Debug, Serialize)]
pub struct StatsSummary {
    pub total_queues: usize,
    pub queues: HashMap<String, QueueStatsInfo>,
}

#[derive(Debug, Serialize)]
pub struct QueueStatsInfo {
    pub size: usize,
    pub capacity: usize,
    pub waiters: usize,
    pub enqueued_total: u64,
    pub dequeued_total: u64,
    pub queue_full_count: u64,
    pub timeout_count: u64,
}

impl QueueManager {
    pub fn new(default_capacity: usize, max_queues: usize) -> Self {
        Self {
            queues: Mutex::new(HashMap::new()),
            default_capacity,
            max_queues,
        }
    }

    /// Returns the queue registered under `name`, creating it if absent.
    ///
    /// An existing name always succeeds, regardless of the queue limit; only
    /// creating a new name counts against `max_queues`. Lookup and insert
    /// happen under one lock acquisition, so two concurrent calls with the
    /// same new name resolve to a single queue instance.
    pub fn get_or_create_queue(&self, name: &str) -> Result<Arc<MessageQueue>, QueueError> {
        let mut queues = self.queues.lock();

        if let Some(queue) = queues.get(name) {
            return Ok(queue.clone());
        }

        if queues.len() >= self.max_queues {
            return Err(QueueError::QueueLimitExceeded);
        }

        let queue = Arc::new(MessageQueue::new(name.to_string(), self.default_capacity));
        queues.insert(name.to_string(), queue.clone());
        Ok(queue)
    }

    pub fn get_queue(&self, name: &str) -> Option<Arc<MessageQueue>> {
        self.queues.lock().get(name).cloned()
    }

    /// Resolves (or creates) the named queue and enqueues onto it.
    pub fn enqueue(&self, queue_name: &str, body: String) -> Result<Message, QueueError> {
        let queue = self.get_or_create_queue(queue_name)?;
        queue.enqueue(body)
    }

    /// Resolves (or creates) the named queue and dequeues from it. The
    /// registry lock is released before the potentially-blocking wait.
    pub async fn dequeue(&self, queue_name: &str, timeout: Duration) -> Result<Message, QueueError> {
        let queue = self.get_or_create_queue(queue_name)?;
        queue.dequeue(timeout).await
    }

    pub fn list_queues(&self) -> Vec<String> {
        self.queues.lock().keys().cloned().collect()
    }

    pub fn queue_count(&self) -> usize {
        self.queues.lock().len()
    }

    pub fn default_capacity(&self) -> usize {
        self.default_capacity
    }

    pub fn max_queues(&self) -> usize {
        self.max_queues
    }

    pub fn stats_summary(&self) -> StatsSummary {
        let queues = self.queues.lock();
        let per_queue = queues
            .iter()
            .map(|(name, queue)| {
                let stats = queue.stats();
                (
                    name.clone(),
                    QueueStatsInfo {
                        size: queue.size(),
                        capacity: queue.capacity(),
                        waiters: queue.waiter_count(),
                        enqueued_total: stats.enqueued_total(),
                        dequeued_total: stats.dequeued_total(),
                        queue_full_count: stats.queue_full_count(),
                        timeout_count: stats.timeout_count(),
                    },
                )
            })
            .collect();

        StatsSummary {
            total_queues: queues.len(),
            queues: per_queue,
        }
    }
}
