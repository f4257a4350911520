//! # Store Persistence Tests
//!
//! The store against every backend, reopened from the same slot.
//!
//! ## Groups
//! - memory: reload from an in-memory slot
//! - file: reload from a slot file in a temp directory
//! - redb: reload from a redb database in a temp directory

use chrono::NaiveDate;
use leadbook_core::primitives::SLOT_KEY;
use leadbook_core::{
    FileSlots, Interest, LeadDraft, LoadOutcome, MemorySlots, RedbSlots, SchedulePreset, SlotStorage,
    Stage, Store,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).expect("valid date")
}

fn full_draft() -> LeadDraft {
    LeadDraft {
        name: "Marta Ruiz".to_string(),
        phone: "+52 686 444 4444".to_string(),
        email: "marta@example.com".to_string(),
        source: "WhatsApp".to_string(),
        interest: Some(Interest::Sell),
        promoter: "María López".to_string(),
        next_follow_up: NaiveDate::from_ymd_opt(2024, 6, 11),
        notes: "Casa en Valle".to_string(),
    }
}

/// Create through one store, reopen from the same storage, compare.
fn create_then_reload<S: SlotStorage>(storage: S) -> S {
    let mut store = Store::open(storage, today());
    let created = store.create(full_draft(), today()).expect("create").clone();
    let storage = store.into_storage();

    let reopened = Store::open(storage, today());
    assert_eq!(reopened.last_load(), LoadOutcome::Restored);

    let reloaded = reopened.get(created.id.as_str()).expect("reloaded lead");
    assert_eq!(reloaded, &created);

    // Equal to the payload plus the assigned fields.
    let expected = full_draft().into_lead(created.id.clone(), today());
    assert_eq!(reloaded, &expected);

    reopened.into_storage()
}

// =============================================================================
// MEMORY
// =============================================================================

mod memory {
    use super::*;

    #[test]
    fn create_roundtrips_through_slot() {
        let storage = create_then_reload(MemorySlots::new());
        assert!(storage.get(SLOT_KEY).is_some());
    }

    #[test]
    fn mutations_survive_reload() {
        let mut store = Store::open(MemorySlots::new(), today());
        store.advance("C-003");
        store.schedule("C-003", SchedulePreset::Today, today());
        store.remove("C-001");

        let reopened = Store::open(store.into_storage(), today());
        let lead = reopened.get("C-003").expect("lead");
        assert_eq!(lead.stage, Stage::FollowingUp);
        assert_eq!(lead.next_follow_up, Some(today()));
        assert!(reopened.get("C-001").is_none());
    }

    #[test]
    fn write_failures_lose_changes_on_reload() {
        let seeded = Store::open(MemorySlots::new(), today()).into_storage();

        let mut failing = Store::open(seeded.failing_writes(), today());
        failing.remove("C-001");
        assert!(failing.get("C-001").is_none());

        let reopened = Store::open(failing.into_storage(), today());
        assert_eq!(reopened.last_load(), LoadOutcome::Restored);
        assert!(reopened.get("C-001").is_some());
    }

    #[test]
    fn named_slots_are_independent() {
        let mut store = Store::open_with_key(MemorySlots::new(), "office_a", today());
        store.remove("C-001");

        let other = Store::open_with_key(store.into_storage(), "office_b", today());
        assert!(other.get("C-001").is_some());
        assert_eq!(other.last_load(), LoadOutcome::SeededMissing);
    }
}

// =============================================================================
// FILE
// =============================================================================

mod file {
    use super::*;

    #[test]
    fn create_roundtrips_through_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        create_then_reload(FileSlots::new(dir.path()));
        assert!(dir.path().join(format!("{}.json", SLOT_KEY)).is_file());
    }

    #[test]
    fn corrupt_file_falls_back_to_seed_and_is_replaced() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(format!("{}.json", SLOT_KEY));
        std::fs::write(&path, "][").expect("write corrupt");

        let store = Store::open(FileSlots::new(dir.path()), today());
        assert_eq!(store.last_load(), LoadOutcome::SeededMalformed);
        assert_eq!(store.leads().len(), 3);

        let rewritten = std::fs::read_to_string(&path).expect("read");
        assert!(rewritten.contains("\"clients\""));
    }

    #[test]
    fn legacy_browser_export_loads() {
        let dir = tempfile::tempdir().expect("tempdir");
        let legacy = r#"{
            "promoters": [{"id":"u1","name":"Fer Labrador"}],
            "clients": [{
                "id": "C-1718000000000", "name": "Pedro Soto", "phone": "686 555 5555",
                "email": "", "source": "WhatsApp", "firstContact": "2024-06-01",
                "interest": "", "stage": "En negociación", "promoter": "Fer Labrador",
                "nextFollowUp": "2024-06-08", "notes": ""
            }],
            "ui": {"simpleMode": true}
        }"#;
        std::fs::write(dir.path().join(format!("{}.json", SLOT_KEY)), legacy).expect("write");

        let store = Store::open(FileSlots::new(dir.path()), today());
        assert_eq!(store.last_load(), LoadOutcome::Restored);

        let lead = store.get("C-1718000000000").expect("lead");
        assert_eq!(lead.stage, Stage::Negotiating);
        assert_eq!(lead.interest, None);
        assert_eq!(leadbook_core::score(lead, today()), 3);
    }

    #[test]
    fn null_text_field_keeps_every_lead() {
        let dir = tempfile::tempdir().expect("tempdir");
        let stored = r#"{
            "clients": [
                {"id":"C-10","name":"Pedro Soto","phone":"1","firstContact":"2024-06-01","notes":null},
                {"id":"C-11","name":"Rosa Díaz","phone":"2","firstContact":"2024-06-02","notes":"Llamar"}
            ]
        }"#;
        std::fs::write(dir.path().join(format!("{}.json", SLOT_KEY)), stored).expect("write");

        let store = Store::open(FileSlots::new(dir.path()), today());
        assert_eq!(store.last_load(), LoadOutcome::Restored);

        let ids: Vec<_> = store.leads().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["C-10", "C-11"]);
        assert_eq!(store.get("C-10").expect("lead").notes, "");
    }

    #[test]
    fn oversized_file_falls_back_to_seed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = std::fs::File::create(dir.path().join(format!("{}.json", SLOT_KEY)))
            .expect("create");
        file.set_len(leadbook_core::primitives::MAX_SNAPSHOT_SIZE as u64 + 1)
            .expect("grow");

        let store = Store::open(FileSlots::new(dir.path()), today());
        assert_eq!(store.last_load(), LoadOutcome::SeededUnreadable);
        assert_eq!(store.leads().len(), 3);
    }
}

// =============================================================================
// REDB
// =============================================================================

mod redb {
    use super::*;

    #[test]
    fn create_roundtrips_through_redb() {
        let dir = tempfile::tempdir().expect("tempdir");
        let slots = RedbSlots::open(dir.path().join("leadbook.redb")).expect("open");
        let slots = create_then_reload(slots);
        assert_eq!(slots.slot_count().expect("count"), 1);
    }

    #[test]
    fn reopen_database_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("leadbook.redb");

        {
            let mut store = Store::open(RedbSlots::open(&path).expect("open"), today());
            store.set_simple_mode(false);
        }

        let store = Store::open(RedbSlots::open(&path).expect("reopen"), today());
        assert_eq!(store.last_load(), LoadOutcome::Restored);
        assert!(!store.ui().simple_mode);
    }
}
