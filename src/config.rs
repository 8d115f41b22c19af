//! Catalog configuration.

use serde::{Deserialize, Serialize};

/// Tunables for a [`Catalog`](crate::core::catalog::Catalog).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Maximum entries retained by the undo log (`None` = unbounded).
    pub max_undo_depth: Option<usize>,

    /// Whether applied changes are buffered for [`drain_changes`](crate::core::catalog::Catalog::drain_changes).
    pub track_changes: bool,

    /// Minimum number of tombstoned slots before the arena is compacted.
    pub compact_threshold: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            max_undo_depth: None,
            track_changes: true,
            compact_threshold: 32,
        }
    }
}

impl CatalogConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds the undo log; the oldest entry is dropped once full.
    #[must_use]
    pub const fn max_undo_depth(mut self, depth: usize) -> Self {
        self.max_undo_depth = Some(depth);
        self
    }

    /// Enables or disables the change journal.
    #[must_use]
    pub const fn track_changes(mut self, value: bool) -> Self {
        self.track_changes = value;
        self
    }

    /// Sets the tombstone count that triggers compaction.
    #[must_use]
    pub const fn compact_threshold(mut self, value: usize) -> Self {
        self.compact_threshold = value;
        self
    }
}
