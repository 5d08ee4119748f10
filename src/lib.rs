// Postbox - named, bounded, in-memory FIFO message queues with long-poll
// retrieval.
//
// This library provides the queue engine and its HTTP transport.
// Binary entry point is in src/main.rs

pub mod config;
pub mod error;
pub mod http;
pub mod queue;

pub use config::Config;
pub use error::QueueError;
pub use http::AppState;
pub use queue::{Message, MessageQueue, QueueManager, QueueStats};
