//! # leadbook-core
//!
//! The lead pipeline engine for Leadbook - THE LOGIC.
//!
//! A lead is a prospective client tracked through a fixed, ordered sales
//! pipeline. This crate owns everything about leads that has rules:
//! - how urgently a lead needs contact (`ranking`)
//! - how a lead moves through the pipeline (`pipeline`)
//! - how dial and messaging targets are derived from a phone (`contact`)
//! - how the whole collection is persisted in one key/value slot (`store`)
//!
//! ## Architectural Constraints
//!
//! - Has NO async, NO network dependencies (pure Rust)
//! - Never reads "today" from the clock; callers pass it in
//! - Reaches durable storage only through [`SlotStorage`]
//! - Persistence failures never abort a mutation; in-memory state stays
//!   authoritative for the session

// =============================================================================
// MODULES
// =============================================================================

pub mod contact;
pub mod edit;
pub mod formats;
pub mod pipeline;
pub mod primitives;
pub mod ranking;
pub mod seed;
pub mod storage;
pub mod store;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    DATE_FORMAT, Interest, Lead, LeadDraft, LeadError, LeadId, LeadPatch, Promoter, UiPrefs,
    add_days, parse_date,
};

// =============================================================================
// RE-EXPORTS: Pipeline & Ranking
// =============================================================================

pub use pipeline::{Stage, next_stage};
pub use ranking::{FollowUpStatus, follow_up_status, rank, score};

// =============================================================================
// RE-EXPORTS: Contact links
// =============================================================================

pub use contact::{ContactLinks, dial_target, digits_only, greeting, message_target};

// =============================================================================
// RE-EXPORTS: Store & Storage
// =============================================================================

pub use edit::{EditField, EditRequest};
pub use formats::{Snapshot, snapshot_from_json, snapshot_to_json};
pub use seed::seed_snapshot;
pub use storage::{FileSlots, MemorySlots, RedbSlots, SlotBackend, SlotStorage};
pub use store::{LoadOutcome, SchedulePreset, Store};
