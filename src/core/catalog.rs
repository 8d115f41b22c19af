use std::time::{SystemTime, UNIX_EPOCH};

use hashbrown::HashMap;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::{
    config::CatalogConfig,
    op::{Change, EntryKind, LogEntry, StoredChange},
    product::{ProductPatch, ProductRecord},
    types::{ChangeSeq, Price, ProductId, Quantity},
};

use super::{
    oplog::{LogError, OperationLog, UndoLog},
    snapshot::{CatalogSnapshot, SnapshotError},
};

/// Failure raised by a [`Catalog`] operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// No record with this id exists.
    #[error("product {0} not found")]
    NotFound(ProductId),
    /// A record with this id already exists.
    #[error("product {0} already exists")]
    DuplicateId(ProductId),
    /// The undo log is empty.
    #[error("nothing to undo")]
    NothingToUndo,
    /// Quantity is negative or too large.
    #[error("invalid quantity {quantity} for product {id}")]
    InvalidQuantity {
        /// Target product.
        id: ProductId,
        /// Rejected value.
        quantity: i64,
    },
    /// Price is negative or not finite.
    #[error("invalid price {price} for product {id}")]
    InvalidPrice {
        /// Target product.
        id: ProductId,
        /// Rejected value.
        price: Price,
    },
}

impl From<LogError> for CatalogError {
    fn from(value: LogError) -> Self {
        match value {
            LogError::Empty => Self::NothingToUndo,
        }
    }
}

/// What a single [`Catalog::undo_last`] call did.
#[derive(Debug, Clone, PartialEq)]
pub enum UndoOutcome {
    /// An insert was reversed; the record was removed.
    Removed(ProductRecord),
    /// An update was reversed; the record was restored.
    Restored(ProductRecord),
    /// A delete was reversed; the record was appended at the tail.
    Reinserted(ProductRecord),
    /// The entry was consumed but its target was missing (or, for a delete,
    /// already live) so nothing changed.
    Skipped {
        /// Kind of the consumed entry.
        kind: EntryKind,
        /// Id the entry referred to.
        id: ProductId,
    },
}

/// Ordered product collection with single-step undo.
///
/// Records live in an arena of slots addressed through an id-to-slot map.
/// Deleted slots become tombstones until enough accumulate to compact.
#[derive(Debug)]
pub struct Catalog<L = OperationLog<LogEntry>> {
    slots: Vec<Option<ProductRecord>>,
    slot_of: HashMap<ProductId, usize>,
    live: usize,
    log: L,
    pending_changes: Vec<StoredChange>,
    next_seq: ChangeSeq,
    config: CatalogConfig,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Empty catalog with an unbounded undo log.
    pub fn new() -> Self {
        Self::with_config(CatalogConfig::default())
    }

    /// Empty catalog whose undo log honours `config.max_undo_depth`.
    pub fn with_config(config: CatalogConfig) -> Self {
        let log = match config.max_undo_depth {
            Some(depth) => OperationLog::with_max_depth(depth),
            None => OperationLog::new(),
        };
        Self::with_log(log, config)
    }

    /// Rebuilds a catalog from `snapshot` with an empty undo log.
    pub fn from_snapshot(snapshot: CatalogSnapshot, config: CatalogConfig) -> Result<Self, CatalogError> {
        let mut catalog = Self::with_config(config);
        for rec in snapshot.records {
            if catalog.slot_of.contains_key(&rec.id) {
                return Err(CatalogError::DuplicateId(rec.id));
            }
            validate_price(rec.id, rec.unit_price)?;
            catalog.push_slot(rec);
        }
        debug!(records = catalog.live, "catalog restored from snapshot");
        Ok(catalog)
    }

    /// Parses a JSON snapshot and rebuilds a catalog from it.
    pub fn from_json(json: &str, config: CatalogConfig) -> Result<Self, SnapshotError> {
        let snapshot = CatalogSnapshot::from_json(json)?;
        Ok(Self::from_snapshot(snapshot, config)?)
    }
}

impl<L: UndoLog> Catalog<L> {
    /// Empty catalog recording into `log`.
    pub fn with_log(log: L, config: CatalogConfig) -> Self {
        Self {
            slots: Vec::new(),
            slot_of: HashMap::new(),
            live: 0,
            log,
            pending_changes: Vec::new(),
            next_seq: 1,
            config,
        }
    }

    /// Appends a new record and logs its insertion.
    pub fn insert(
        &mut self,
        id: ProductId,
        name: impl Into<String>,
        unit_price: Price,
        quantity: i64,
    ) -> Result<(), CatalogError> {
        if self.slot_of.contains_key(&id) {
            return Err(CatalogError::DuplicateId(id));
        }
        let unit_price = validate_price(id, unit_price)?;
        let quantity_on_hand = validate_quantity(id, quantity)?;

        let record = ProductRecord::new(id, name, unit_price, quantity_on_hand);
        self.push_slot(record.clone());
        self.log.record(LogEntry::insert(record.clone()));
        debug!(id, quantity_on_hand, "product inserted");
        self.push_change(Change::Inserted { record });
        Ok(())
    }

    /// Overwrites price and quantity of an existing record.
    pub fn update(&mut self, id: ProductId, new_quantity: i64, new_price: Price) -> Result<(), CatalogError> {
        let patch = ProductPatch {
            unit_price: Some(validate_price(id, new_price)?),
            quantity_on_hand: Some(validate_quantity(id, new_quantity)?),
        };

        let rec = self.record_mut(id).ok_or(CatalogError::NotFound(id))?;
        let before = rec.clone();
        let prev = patch.capture_inverse_for(rec);
        patch.apply_to(rec);

        self.log.record(LogEntry::update(before));
        debug!(id, "product updated");
        self.push_change(Change::Updated { id, patch, prev });
        Ok(())
    }

    /// Removes a record and logs its full state.
    pub fn delete(&mut self, id: ProductId) -> Result<ProductRecord, CatalogError> {
        let removed = self.remove_slot(id).ok_or(CatalogError::NotFound(id))?;
        self.log.record(LogEntry::delete(removed.clone()));
        debug!(id, "product deleted");
        self.push_change(Change::Deleted {
            record: removed.clone(),
        });
        Ok(removed)
    }

    /// Takes one unit off `id`'s stock.
    ///
    /// Returns false when the record is missing or already at zero. Not
    /// recorded in the undo log.
    pub fn decrement_stock(&mut self, id: ProductId) -> bool {
        let Some(rec) = self.record_mut(id) else {
            debug!(id, "decrement on missing product");
            return false;
        };
        if rec.quantity_on_hand == 0 {
            debug!(id, "decrement refused, out of stock");
            return false;
        }
        rec.quantity_on_hand -= 1;
        let remaining = rec.quantity_on_hand;

        debug!(id, remaining, "stock decremented");
        self.push_change(Change::StockDecremented { id, remaining });
        true
    }

    /// Pops the most recent log entry and applies its inverse.
    ///
    /// Undo never records entries of its own.
    pub fn undo_last(&mut self) -> Result<UndoOutcome, CatalogError> {
        let entry = self.log.take_last()?;
        let id = entry.id();

        let outcome = match entry.kind {
            EntryKind::Insert => match self.remove_slot(id) {
                Some(rec) => UndoOutcome::Removed(rec),
                None => UndoOutcome::Skipped { kind: entry.kind, id },
            },
            EntryKind::Update => {
                let restore = ProductPatch {
                    unit_price: Some(entry.record.unit_price),
                    quantity_on_hand: Some(entry.record.quantity_on_hand),
                };
                match self.record_mut(id) {
                    Some(rec) => {
                        restore.apply_to(rec);
                        UndoOutcome::Restored(rec.clone())
                    }
                    None => UndoOutcome::Skipped { kind: entry.kind, id },
                }
            }
            EntryKind::Delete => {
                // Only reachable through a foreign UndoLog: LIFO replay plus
                // DuplicateId on insert keep the id absent here.
                if self.slot_of.contains_key(&id) {
                    UndoOutcome::Skipped { kind: entry.kind, id }
                } else {
                    self.push_slot(entry.record.clone());
                    UndoOutcome::Reinserted(entry.record.clone())
                }
            }
        };

        if let UndoOutcome::Skipped { kind, id } = &outcome {
            warn!(?kind, id, "undo entry skipped, target state diverged");
        } else {
            debug!(kind = ?entry.kind, id, remaining = self.log.len(), "undo applied");
            self.push_change(Change::Undone { entry });
        }
        Ok(outcome)
    }

    /// Records with at least one unit on hand, in collection order.
    pub fn list_in_stock(&self) -> impl Iterator<Item = &ProductRecord> + Clone + '_ {
        self.iter().filter(|rec| rec.in_stock())
    }

    /// Records with zero units on hand, in collection order.
    pub fn list_out_of_stock(&self) -> impl Iterator<Item = &ProductRecord> + Clone + '_ {
        self.iter().filter(|rec| !rec.in_stock())
    }

    /// Every live record in collection order.
    pub fn iter(&self) -> impl Iterator<Item = &ProductRecord> + Clone + '_ {
        self.slots.iter().flatten()
    }

    /// Live record ids in collection order.
    pub fn ordered_ids(&self) -> Vec<ProductId> {
        self.iter().map(|rec| rec.id).collect()
    }

    /// Record with `id`, if live.
    pub fn get(&self, id: ProductId) -> Option<&ProductRecord> {
        let slot = *self.slot_of.get(&id)?;
        self.slots.get(slot)?.as_ref()
    }

    /// Returns true when `id` is live.
    pub fn contains(&self, id: ProductId) -> bool {
        self.slot_of.contains_key(&id)
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns true when no records are live.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of entries available to [`undo_last`](Self::undo_last).
    pub fn undo_depth(&self) -> usize {
        self.log.len()
    }

    /// Undo log backing this catalog.
    pub fn log(&self) -> &L {
        &self.log
    }

    /// Active configuration.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Copies live records, in order, into a snapshot.
    pub fn export_snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot::new(self.iter().cloned().collect())
    }

    /// Hands over every change buffered since the last drain.
    pub fn drain_changes(&mut self) -> Vec<StoredChange> {
        std::mem::take(&mut self.pending_changes)
    }

    /// Sequence number of the most recent applied change (0 if none).
    pub fn latest_seq(&self) -> ChangeSeq {
        self.next_seq.saturating_sub(1)
    }

    fn record_mut(&mut self, id: ProductId) -> Option<&mut ProductRecord> {
        let slot = *self.slot_of.get(&id)?;
        self.slots.get_mut(slot)?.as_mut()
    }

    fn push_slot(&mut self, rec: ProductRecord) {
        self.slot_of.insert(rec.id, self.slots.len());
        self.slots.push(Some(rec));
        self.live += 1;
    }

    fn remove_slot(&mut self, id: ProductId) -> Option<ProductRecord> {
        let slot = self.slot_of.remove(&id)?;
        let rec = self.slots.get_mut(slot)?.take()?;
        self.live -= 1;
        self.maybe_compact();
        Some(rec)
    }

    fn maybe_compact(&mut self) {
        let dead = self.slots.len() - self.live;
        if dead < self.config.compact_threshold.max(1) || dead <= self.live {
            return;
        }

        self.slots.retain(Option::is_some);
        self.slot_of.clear();
        for (slot, rec) in self.slots.iter().enumerate() {
            if let Some(rec) = rec {
                self.slot_of.insert(rec.id, slot);
            }
        }
        trace!(dead, live = self.live, "catalog arena compacted");
    }

    fn push_change(&mut self, change: Change) {
        let seq = self.next_seq;
        self.next_seq += 1;
        if self.config.track_changes {
            self.pending_changes.push(StoredChange {
                seq,
                ts_ms: now_ms(),
                change,
            });
        }
    }
}

fn validate_price(id: ProductId, price: Price) -> Result<Price, CatalogError> {
    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(CatalogError::InvalidPrice { id, price })
    }
}

fn validate_quantity(id: ProductId, quantity: i64) -> Result<Quantity, CatalogError> {
    Quantity::try_from(quantity).map_err(|_| CatalogError::InvalidQuantity { id, quantity })
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
