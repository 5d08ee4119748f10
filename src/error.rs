use thiserror::Error;

/// Errors reported by queue operations.
///
/// All of these are recoverable conditions returned synchronously to the
/// caller; none of them abort the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// The buffer is at capacity and no consumer is waiting to absorb the
    /// message. The caller may retry later.
    #[error("queue is full")]
    QueueFull,

    /// The registry already holds the maximum number of distinct queues and
    /// the requested name is a new one.
    #[error("maximum number of queues reached")]
    QueueLimitExceeded,

    /// A non-blocking dequeue found the buffer empty.
    #[error("no messages available")]
    NoMessageAvailable,

    /// A blocking dequeue waited out its full timeout without a message
    /// arriving.
    #[error("timeout waiting for message")]
    WaitTimeout,
}
