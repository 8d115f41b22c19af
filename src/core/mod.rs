//! In-memory catalog, undo log and work queue.

/// Product catalog with single-step undo.
pub mod catalog;
/// Generic LIFO operation log and the undo seam.
pub mod oplog;
/// Strict FIFO queue of pending work.
pub mod queue;
/// Serializable point-in-time catalog copies.
pub mod snapshot;
