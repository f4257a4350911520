//! # Snapshot Format
//!
//! The whole store state as one JSON document:
//!
//! ```json
//! { "promoters": [...], "clients": [...], "ui": { "simpleMode": true } }
//! ```
//!
//! `clients` is required; `promoters` and `ui` default when absent. A
//! document that does not match this shape is malformed and the store falls
//! back to seed data.
//!
//! The size limit is validated BEFORE parsing.

use crate::primitives::MAX_SNAPSHOT_SIZE;
use crate::{Lead, LeadError, Promoter, UiPrefs};
use serde::{Deserialize, Serialize};

/// Everything persisted in the storage slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub promoters: Vec<Promoter>,
    pub clients: Vec<Lead>,
    #[serde(default)]
    pub ui: UiPrefs,
}

impl Snapshot {
    /// Promoter names in stored order.
    #[must_use]
    pub fn promoter_names(&self) -> Vec<&str> {
        self.promoters.iter().map(|p| p.name.as_str()).collect()
    }
}

/// Serialize a snapshot to its JSON slot value.
pub fn snapshot_to_json(snapshot: &Snapshot) -> Result<String, LeadError> {
    serde_json::to_string(snapshot).map_err(|e| LeadError::SerializationError(e.to_string()))
}

/// Parse a slot value.
pub fn snapshot_from_json(raw: &str) -> Result<Snapshot, LeadError> {
    if raw.len() > MAX_SNAPSHOT_SIZE {
        return Err(LeadError::SerializationError(format!(
            "Snapshot size {} bytes exceeds maximum allowed {} bytes",
            raw.len(),
            MAX_SNAPSHOT_SIZE
        )));
    }

    serde_json::from_str(raw).map_err(|e| {
        LeadError::SerializationError(format!("Failed to parse snapshot: {}", e))
    })
}

// =============================================================================
// TESTS
// =============================================================================
