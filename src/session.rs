//! Order-placement flow over one catalog and one work queue.

use thiserror::Error;
use tracing::debug;

use crate::{
    config::CatalogConfig,
    core::{
        catalog::{Catalog, CatalogError, UndoOutcome},
        queue::{QueueError, WorkItem, WorkQueue},
    },
    types::ProductId,
};

/// Failure raised by a [`Session`] call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// Catalog rejected the call.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// Work queue rejected the call.
    #[error(transparent)]
    Queue(#[from] QueueError),
    /// Product is missing or has no stock left.
    #[error("product {0} is out of stock")]
    OutOfStock(ProductId),
}

/// Owns the catalog and the order queue and wires them together.
///
/// The queue only learns about a product after the catalog has confirmed
/// and taken the stock; afterwards the two never interact.
#[derive(Debug, Default)]
pub struct Session {
    catalog: Catalog,
    orders: WorkQueue,
}

impl Session {
    /// Creates an empty session.
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            catalog: Catalog::with_config(config),
            orders: WorkQueue::new(),
        }
    }

    /// Starts from an existing catalog.
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog,
            orders: WorkQueue::new(),
        }
    }

    /// Read access to the catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Mutable access for admin operations (insert/update/delete).
    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    /// Pending orders.
    pub fn orders(&self) -> &WorkQueue {
        &self.orders
    }

    /// Takes one unit of `product_id` and queues an order for it.
    pub fn place_order(&mut self, product_id: ProductId) -> Result<WorkItem, SessionError> {
        if !self.catalog.decrement_stock(product_id) {
            return Err(SessionError::OutOfStock(product_id));
        }
        let item = self.orders.enqueue(product_id);
        debug!(product_id, "order placed");
        Ok(item)
    }

    /// Removes the oldest pending order.
    pub fn process_next_order(&mut self) -> Result<WorkItem, SessionError> {
        Ok(self.orders.dequeue()?)
    }

    /// Reverses the most recent logged catalog mutation. Orders are untouched.
    pub fn undo(&mut self) -> Result<UndoOutcome, SessionError> {
        Ok(self.catalog.undo_last()?)
    }
}
