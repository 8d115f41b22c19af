use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::product::ProductRecord;

use super::catalog::CatalogError;

/// Version number for serialized [`CatalogSnapshot`] payloads.
pub const SNAPSHOT_FORMAT_VERSION: u16 = 1;

/// Failure while decoding or restoring a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Payload is not valid snapshot JSON.
    #[error("snapshot decode failed: {0}")]
    Json(#[from] serde_json::Error),
    /// Payload was written by an unknown format version.
    #[error("unsupported snapshot format version {0}")]
    UnsupportedVersion(u16),
    /// Records violate catalog invariants.
    #[error("snapshot rejected: {0}")]
    Catalog(#[from] CatalogError),
}

/// Point-in-time copy of catalog records in collection order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// Payload format version.
    pub format_version: u16,
    /// Records in collection order.
    pub records: Vec<ProductRecord>,
}

impl CatalogSnapshot {
    /// Wraps `records` using [`SNAPSHOT_FORMAT_VERSION`].
    pub fn new(records: Vec<ProductRecord>) -> Self {
        Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            records,
        }
    }

    /// Encodes the snapshot as JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a snapshot, rejecting unknown format versions.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        if snapshot.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(snapshot.format_version));
        }
        Ok(snapshot)
    }
}
