use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// A single queued message: the raw body handed in by the producer plus the
/// time it entered the queue (microseconds since epoch).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub body: String,
    pub enqueued_at: u64,
}

impl Message {
    pub fn new(body: String) -> Self {
        let enqueued_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as u64)
            .unwrap_or(0);

        Self { body, enqueued_at }
    }
}
