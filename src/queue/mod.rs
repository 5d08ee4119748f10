// Queue module exports

pub mod manager;
pub mod message;
pub mod message_queue;

pub use manager::{QueueManager, StatsSummary};
pub use message::Message;
pub use message_queue::{MessageQueue, QueueStats};
