//! Product record and patch types.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId, Quantity};

/// Authoritative catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Stable product identifier.
    pub id: ProductId,
    /// Display name. Never changed by updates.
    pub name: String,
    /// Price per unit.
    pub unit_price: Price,
    /// Units currently available.
    pub quantity_on_hand: Quantity,
}

impl ProductRecord {
    /// Builds a record from already-validated parts.
    pub fn new(id: ProductId, name: impl Into<String>, unit_price: Price, quantity_on_hand: Quantity) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
            quantity_on_hand,
        }
    }

    /// Returns true when at least one unit is on hand.
    pub fn in_stock(&self) -> bool {
        self.quantity_on_hand > 0
    }
}

/// Sparse patch where each `Some` field overwrites the record value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    /// Optional replacement for unit price.
    pub unit_price: Option<Price>,
    /// Optional replacement for quantity on hand.
    pub quantity_on_hand: Option<Quantity>,
}

impl ProductPatch {
    /// Captures an inverse patch for all fields present in `self`.
    pub fn capture_inverse_for(&self, rec: &ProductRecord) -> Self {
        Self {
            unit_price: self.unit_price.map(|_| rec.unit_price),
            quantity_on_hand: self.quantity_on_hand.map(|_| rec.quantity_on_hand),
        }
    }

    /// Applies this patch in place to `rec`.
    pub fn apply_to(&self, rec: &mut ProductRecord) {
        if let Some(v) = self.unit_price {
            rec.unit_price = v;
        }
        if let Some(v) = self.quantity_on_hand {
            rec.quantity_on_hand = v;
        }
    }
}
