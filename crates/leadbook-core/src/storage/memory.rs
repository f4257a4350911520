//! In-memory slots.
//!
//! Stands in for a durable backend in tests. Reads and writes can be made to
//! fail to exercise the store's degrade-and-continue path.

use super::SlotStorage;
use crate::LeadError;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct MemorySlots {
    slots: BTreeMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
    writes: usize,
}

impl MemorySlots {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a slot.
    #[must_use]
    pub fn with_slot(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.slots.insert(key.into(), value.into());
        self
    }

    /// Make every read fail.
    #[must_use]
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Make every write fail.
    #[must_use]
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Toggle write failures after construction.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Raw slot value, bypassing failure injection.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }

    /// Number of successful writes.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl SlotStorage for MemorySlots {
    fn read(&self, key: &str) -> Result<Option<String>, LeadError> {
        if self.fail_reads {
            return Err(LeadError::StorageError(format!("read of '{}' refused", key)));
        }
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), LeadError> {
        if self.fail_writes {
            return Err(LeadError::StorageError(format!("write of '{}' refused", key)));
        }
        self.slots.insert(key.to_string(), value.to_string());
        self.writes = self.writes.saturating_add(1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_slot_reads_none() {
        assert_eq!(MemorySlots::new().read("k").expect("read"), None);
    }

    #[test]
    fn failure_injection() {
        let mut slots = MemorySlots::new().with_slot("k", "v").failing_writes();
        assert!(slots.write("k", "w").is_err());
        assert_eq!(slots.get("k"), Some("v"));
        assert_eq!(slots.write_count(), 0);

        slots.set_fail_writes(false);
        slots.write("k", "w").expect("write");
        assert_eq!(slots.get("k"), Some("w"));
        assert_eq!(slots.write_count(), 1);

        let slots = MemorySlots::new().failing_reads();
        assert!(matches!(slots.read("k"), Err(LeadError::StorageError(_))));
    }
}
