//! # Store Module
//!
//! The lead collection and its single-slot persistence.
//!
//! ## Lifecycle
//!
//! - `open`: read the slot; missing, unreadable or malformed content is
//!   replaced by seed data (and the seed is written back)
//! - every mutation: update in memory, then write the whole snapshot
//! - `into_storage`: hand the backend back (tests reopen from it)
//!
//! ## Failure Model
//!
//! Storage failures are logged and swallowed. The in-memory state stays
//! authoritative for the rest of the session; losing changes on reload is
//! the accepted failure mode.

use crate::formats::{Snapshot, snapshot_from_json, snapshot_to_json};
use crate::primitives::{LEAD_ID_PREFIX, SLOT_KEY};
use crate::seed::seed_snapshot;
use crate::storage::SlotStorage;
use crate::types::add_days;
use crate::{Lead, LeadDraft, LeadError, LeadId, LeadPatch, Promoter, Stage, UiPrefs, rank};
use chrono::NaiveDate;

// =============================================================================
// LOAD OUTCOME
// =============================================================================

/// What `load` found in the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The slot held a valid snapshot.
    Restored,
    /// The slot was never written; seed data installed.
    SeededMissing,
    /// The slot held data that did not parse; seed data installed.
    SeededMalformed,
    /// The backend failed to read; seed data installed.
    SeededUnreadable,
}

impl LoadOutcome {
    #[must_use]
    pub fn is_seeded(&self) -> bool {
        !matches!(self, LoadOutcome::Restored)
    }
}

// =============================================================================
// SCHEDULE PRESETS
// =============================================================================

/// One-tap follow-up choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulePreset {
    Today,
    Tomorrow,
    ThreeDays,
}

impl SchedulePreset {
    /// Days ahead of today.
    #[must_use]
    pub fn days(&self) -> i64 {
        match self {
            SchedulePreset::Today => 0,
            SchedulePreset::Tomorrow => 1,
            SchedulePreset::ThreeDays => 3,
        }
    }
}

// =============================================================================
// STORE
// =============================================================================

/// The lead collection bound to one storage slot.
#[derive(Debug)]
pub struct Store<S: SlotStorage> {
    storage: S,
    key: String,
    state: Snapshot,
    last_load: LoadOutcome,
}

impl<S: SlotStorage> Store<S> {
    /// Open the store on the default slot.
    pub fn open(storage: S, today: NaiveDate) -> Self {
        Self::open_with_key(storage, SLOT_KEY, today)
    }

    /// Open the store on a named slot.
    pub fn open_with_key(storage: S, key: impl Into<String>, today: NaiveDate) -> Self {
        let mut store = Self {
            storage,
            key: key.into(),
            state: Snapshot::default(),
            last_load: LoadOutcome::SeededMissing,
        };
        store.load(today);
        store
    }

    /// Replace in-memory state with the slot contents (or seed data).
    pub fn load(&mut self, today: NaiveDate) -> LoadOutcome {
        let outcome = match self.storage.read(&self.key) {
            Ok(Some(raw)) => match snapshot_from_json(&raw) {
                Ok(snapshot) => {
                    self.state = snapshot;
                    LoadOutcome::Restored
                }
                Err(e) => {
                    tracing::warn!(slot = %self.key, error = %e, "malformed snapshot, using seed data");
                    LoadOutcome::SeededMalformed
                }
            },
            Ok(None) => {
                tracing::debug!(slot = %self.key, "empty slot, using seed data");
                LoadOutcome::SeededMissing
            }
            Err(e) => {
                tracing::warn!(slot = %self.key, error = %e, "slot unreadable, using seed data");
                LoadOutcome::SeededUnreadable
            }
        };

        if outcome.is_seeded() {
            self.state = seed_snapshot(today);
            self.persist();
        } else {
            tracing::debug!(slot = %self.key, leads = self.state.clients.len(), "snapshot restored");
        }

        self.last_load = outcome;
        outcome
    }

    /// Write the whole snapshot. Returns whether the write succeeded.
    ///
    /// Failures are logged, never returned.
    pub fn persist(&mut self) -> bool {
        let result = snapshot_to_json(&self.state)
            .and_then(|json| self.storage.write(&self.key, &json));
        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(slot = %self.key, error = %e, "snapshot not persisted, keeping in-memory state");
                false
            }
        }
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Quick-add a lead.
    ///
    /// The draft is validated before anything changes. The new lead gets a
    /// fresh id, stage "Prospecto nuevo" and `first_contact = today`, and is
    /// placed first in the collection.
    pub fn create(&mut self, draft: LeadDraft, today: NaiveDate) -> Result<&Lead, LeadError> {
        draft.validate()?;

        let id = self.fresh_id(chrono::Utc::now().timestamp_millis());
        let lead = draft.into_lead(id, today);
        tracing::info!(id = %lead.id, "lead created");

        self.state.clients.insert(0, lead);
        self.persist();
        Ok(&self.state.clients[0])
    }

    /// Merge `patch` into the lead with `id`. No-op when not found.
    ///
    /// Returns whether a lead matched.
    pub fn update(&mut self, id: &str, patch: LeadPatch) -> bool {
        let Some(lead) = self.lead_mut(id) else {
            tracing::debug!(id, "update ignored, lead not found");
            return false;
        };
        patch.apply_to(lead);
        self.persist();
        true
    }

    /// Delete the lead with `id`. No-op when not found.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.state.clients.len();
        self.state.clients.retain(|lead| lead.id.as_str() != id);
        if self.state.clients.len() == before {
            tracing::debug!(id, "remove ignored, lead not found");
            return false;
        }
        tracing::info!(id, "lead removed");
        self.persist();
        true
    }

    /// Move the lead one stage forward. Returns the new stage.
    pub fn advance(&mut self, id: &str) -> Option<Stage> {
        let next = self.get(id)?.stage.next();
        self.update(id, LeadPatch::new().stage(next));
        Some(next)
    }

    /// Set the next follow-up to `today + preset`.
    pub fn schedule(&mut self, id: &str, preset: SchedulePreset, today: NaiveDate) -> Option<NaiveDate> {
        self.schedule_in_days(id, preset.days(), today)
    }

    /// Set the next follow-up to `today + days`.
    pub fn schedule_in_days(&mut self, id: &str, days: i64, today: NaiveDate) -> Option<NaiveDate> {
        let date = add_days(today, days);
        self.update(id, LeadPatch::new().next_follow_up(Some(date)))
            .then_some(date)
    }

    /// Switch between compact and detailed listing.
    pub fn set_simple_mode(&mut self, simple: bool) {
        self.state.ui.simple_mode = simple;
        self.persist();
    }

    /// Discard everything and install seed data.
    pub fn reset(&mut self, today: NaiveDate) {
        self.state = seed_snapshot(today);
        tracing::info!(slot = %self.key, "store reset to seed data");
        self.persist();
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Leads in insertion order (most recent first).
    #[must_use]
    pub fn leads(&self) -> &[Lead] {
        &self.state.clients
    }

    #[must_use]
    pub fn promoters(&self) -> &[Promoter] {
        &self.state.promoters
    }

    #[must_use]
    pub fn ui(&self) -> &UiPrefs {
        &self.state.ui
    }

    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.state
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Lead> {
        self.state.clients.iter().find(|lead| lead.id.as_str() == id)
    }

    /// Like `get`, but a missing lead is an error.
    pub fn require(&self, id: &str) -> Result<&Lead, LeadError> {
        self.get(id)
            .ok_or_else(|| LeadError::LeadNotFound(id.to_string()))
    }

    /// Case-insensitive substring match on name and phone.
    ///
    /// An empty query matches everything.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Lead> {
        let needle = query.to_lowercase();
        self.state
            .clients
            .iter()
            .filter(|lead| {
                needle.is_empty()
                    || lead.name.to_lowercase().contains(&needle)
                    || lead.phone.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Search, then order by urgency.
    #[must_use]
    pub fn ranked(&self, query: &str, today: NaiveDate) -> Vec<&Lead> {
        rank(self.search(query), today)
    }

    /// Outcome of the most recent `load`.
    #[must_use]
    pub fn last_load(&self) -> LoadOutcome {
        self.last_load
    }

    #[must_use]
    pub fn slot_key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn lead_mut(&mut self, id: &str) -> Option<&mut Lead> {
        self.state
            .clients
            .iter_mut()
            .find(|lead| lead.id.as_str() == id)
    }

    /// `C-<millis>`, bumped until no existing lead uses it.
    fn fresh_id(&self, now_millis: i64) -> LeadId {
        let mut millis = now_millis;
        loop {
            let candidate = format!("{}{}", LEAD_ID_PREFIX, millis);
            if self.get(&candidate).is_none() {
                return LeadId::new(candidate);
            }
            millis = millis.saturating_add(1);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
