//! # Storage Module
//!
//! Durable key/value slots behind the store.
//!
//! The store only ever reads and writes whole string values under one key,
//! so every backend implements the same two-method contract:
//! - `MemorySlots`: in-memory map (tests, `--backend memory`)
//! - `FileSlots`: one `<key>.json` file per slot in a directory
//! - `RedbSlots`: a `slots` table in a redb database (ACID)

mod file;
mod memory;
mod redb_slots;

pub use file::FileSlots;
pub use memory::MemorySlots;
pub use redb_slots::RedbSlots;

use crate::LeadError;
use crate::primitives::MAX_SLOT_KEY_LENGTH;

/// Read/write contract of a durable key/value slot.
pub trait SlotStorage {
    /// Current value of the slot, `None` if it was never written.
    fn read(&self, key: &str) -> Result<Option<String>, LeadError>;

    /// Replace the value of the slot.
    fn write(&mut self, key: &str, value: &str) -> Result<(), LeadError>;
}

impl<S: SlotStorage + ?Sized> SlotStorage for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>, LeadError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), LeadError> {
        (**self).write(key, value)
    }
}

/// Reject keys that could escape a directory or a table namespace.
///
/// Keys are limited to ASCII alphanumerics, `_` and `-`.
pub fn validate_key(key: &str) -> Result<(), LeadError> {
    if key.is_empty() || key.len() > MAX_SLOT_KEY_LENGTH {
        return Err(LeadError::InvalidInput(format!(
            "Slot key must be 1..={} characters",
            MAX_SLOT_KEY_LENGTH
        )));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(LeadError::InvalidInput(format!(
            "Slot key '{}' may only contain letters, digits, '_' and '-'",
            key
        )));
    }
    Ok(())
}

// =============================================================================
// RUNTIME-SELECTED BACKEND
// =============================================================================

/// Backend chosen at runtime (CLI flag or config file).
#[derive(Debug)]
pub enum SlotBackend {
    Memory(MemorySlots),
    File(FileSlots),
    Redb(RedbSlots),
}

impl SlotBackend {
    /// Backend name as accepted on the command line.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            SlotBackend::Memory(_) => "memory",
            SlotBackend::File(_) => "file",
            SlotBackend::Redb(_) => "redb",
        }
    }
}

impl SlotStorage for SlotBackend {
    fn read(&self, key: &str) -> Result<Option<String>, LeadError> {
        match self {
            SlotBackend::Memory(s) => s.read(key),
            SlotBackend::File(s) => s.read(key),
            SlotBackend::Redb(s) => s.read(key),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), LeadError> {
        match self {
            SlotBackend::Memory(s) => s.write(key, value),
            SlotBackend::File(s) => s.write(key, value),
            SlotBackend::Redb(s) => s.write(key, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_validation() {
        assert!(validate_key("eleva_crm_v1").is_ok());
        assert!(validate_key("a-b").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("with space").is_err());
        assert!(validate_key(&"k".repeat(MAX_SLOT_KEY_LENGTH + 1)).is_err());
    }

    #[test]
    fn backend_delegates() {
        let mut backend = SlotBackend::Memory(MemorySlots::new());
        backend.write("k", "v").expect("write");
        assert_eq!(backend.read("k").expect("read").as_deref(), Some("v"));
        assert_eq!(backend.name(), "memory");
    }
}
