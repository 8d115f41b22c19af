use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::types::ProductId;

/// Failure raised by [`WorkQueue::dequeue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// No work is pending.
    #[error("no pending work items")]
    Empty,
}

/// Pending order referencing a catalog product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkItem {
    /// Referenced product id.
    pub product_id: ProductId,
}

/// Strict FIFO queue of pending work items.
#[derive(Debug, Clone, Default)]
pub struct WorkQueue {
    items: VecDeque<WorkItem>,
}

impl WorkQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a work item for `product_id` at the tail.
    pub fn enqueue(&mut self, product_id: ProductId) -> WorkItem {
        let item = WorkItem { product_id };
        self.items.push_back(item);
        debug!(product_id, pending = self.items.len(), "work item enqueued");
        item
    }

    /// Removes and returns the head item.
    pub fn dequeue(&mut self) -> Result<WorkItem, QueueError> {
        match self.items.pop_front() {
            Some(item) => {
                debug!(product_id = item.product_id, pending = self.items.len(), "work item dequeued");
                Ok(item)
            }
            None => {
                debug!("dequeue on empty work queue");
                Err(QueueError::Empty)
            }
        }
    }

    /// Pending items head to tail.
    pub fn list_pending(&self) -> impl Iterator<Item = &WorkItem> + Clone + '_ {
        self.items.iter()
    }

    /// Number of pending items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
