use std::time::Duration;

use clap::Parser;

/// Process-wide configuration, fixed for the process lifetime.
#[derive(Parser, Debug, Clone)]
#[command(name = "postbox", about = "In-memory FIFO message queues over HTTP")]
pub struct Config {
    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// Maximum number of distinct queues.
    #[arg(long, default_value_t = 10)]
    pub max_queues: usize,

    /// Capacity of each newly created queue.
    #[arg(long, default_value_t = 100)]
    pub default_capacity: usize,

    /// Default long-poll timeout in seconds, applied when a consume request
    /// carries no usable timeout of its own.
    #[arg(long, default_value_t = 5)]
    pub default_timeout: u64,
}

impl Config {
    pub fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.default_timeout)
    }
}
