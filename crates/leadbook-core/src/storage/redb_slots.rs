//! # redb-backed Slots
//!
//! Slots as rows of a single redb table, giving:
//! - ACID writes (a snapshot is either fully replaced or untouched)
//! - Crash safety (copy-on-write B-trees)
//! - Zero configuration

use super::{SlotStorage, validate_key};
use crate::LeadError;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;

/// Table for slots: key -> JSON value
const SLOTS: TableDefinition<&str, &str> = TableDefinition::new("slots");

pub struct RedbSlots {
    db: Database,
}

impl std::fmt::Debug for RedbSlots {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbSlots").finish_non_exhaustive()
    }
}

fn storage_err(e: impl std::fmt::Display) -> LeadError {
    LeadError::StorageError(e.to_string())
}

impl RedbSlots {
    /// Open or create a slot database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LeadError> {
        let db = Database::create(path.as_ref()).map_err(storage_err)?;

        // Create the table up front so reads never see a missing table.
        {
            let write_txn = db.begin_write().map_err(storage_err)?;
            let _ = write_txn.open_table(SLOTS).map_err(storage_err)?;
            write_txn.commit().map_err(storage_err)?;
        }

        Ok(Self { db })
    }

    /// Number of stored slots.
    pub fn slot_count(&self) -> Result<usize, LeadError> {
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(SLOTS).map_err(storage_err)?;
        let mut count = 0usize;
        for entry in table.iter().map_err(storage_err)? {
            entry.map_err(storage_err)?;
            count = count.saturating_add(1);
        }
        Ok(count)
    }
}

impl SlotStorage for RedbSlots {
    fn read(&self, key: &str) -> Result<Option<String>, LeadError> {
        validate_key(key)?;
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(SLOTS).map_err(storage_err)?;
        let value = table
            .get(key)
            .map_err(storage_err)?
            .map(|guard| guard.value().to_string());
        Ok(value)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), LeadError> {
        validate_key(key)?;
        let write_txn = self.db.begin_write().map_err(storage_err)?;
        {
            let mut table = write_txn.open_table(SLOTS).map_err(storage_err)?;
            table.insert(key, value).map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)?;
        Ok(())
    }
}
