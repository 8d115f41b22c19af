//! Undo log entries and the applied-change journal.

use serde::{Deserialize, Serialize};

use crate::{
    product::{ProductPatch, ProductRecord},
    types::{ChangeSeq, ProductId, Quantity},
};

/// Which catalog mutation produced a [`LogEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// A record was inserted.
    Insert,
    /// Price and quantity of a record were overwritten.
    Update,
    /// A record was removed.
    Delete,
}

/// Compensating entry recorded for every logged catalog mutation.
///
/// `record` is the state before the mutation, except for [`EntryKind::Insert`]
/// where it is the state at insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Mutation kind.
    pub kind: EntryKind,
    /// Snapshot copy of the affected record.
    pub record: ProductRecord,
}

impl LogEntry {
    /// Entry for a freshly inserted record.
    pub fn insert(record: ProductRecord) -> Self {
        Self {
            kind: EntryKind::Insert,
            record,
        }
    }

    /// Entry holding the pre-update state.
    pub fn update(before: ProductRecord) -> Self {
        Self {
            kind: EntryKind::Update,
            record: before,
        }
    }

    /// Entry holding the removed record.
    pub fn delete(removed: ProductRecord) -> Self {
        Self {
            kind: EntryKind::Delete,
            record: removed,
        }
    }

    /// Id of the affected record.
    pub fn id(&self) -> ProductId {
        self.record.id
    }
}

/// Change applied to the catalog, as reported through the change journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Change {
    /// A record was inserted.
    Inserted {
        /// Inserted record.
        record: ProductRecord,
    },
    /// A record's price and quantity were overwritten.
    Updated {
        /// Mutated record id.
        id: ProductId,
        /// Fields written.
        patch: ProductPatch,
        /// Fields as they were before the write.
        prev: ProductPatch,
    },
    /// A record was removed.
    Deleted {
        /// Removed record.
        record: ProductRecord,
    },
    /// One unit was taken off a record's stock.
    StockDecremented {
        /// Mutated record id.
        id: ProductId,
        /// Units left after the decrement.
        remaining: Quantity,
    },
    /// A log entry was popped and its inverse applied.
    Undone {
        /// The consumed entry.
        entry: LogEntry,
    },
}

/// Journal row metadata plus change payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredChange {
    /// Monotonic change sequence.
    pub seq: ChangeSeq,
    /// Wall-clock timestamp in milliseconds.
    pub ts_ms: u64,
    /// Change body.
    pub change: Change,
}
