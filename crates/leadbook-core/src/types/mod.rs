//! # Core Type Definitions
//!
//! This module contains the records of the lead pipeline:
//! - Identifiers (`LeadId`)
//! - The lead record and its creation/patch payloads (`Lead`, `LeadDraft`, `LeadPatch`)
//! - Reference data (`Promoter`, `Interest`) and UI preferences (`UiPrefs`)
//! - Error types (`LeadError`)
//!
//! ## Wire Shape
//!
//! Field names serialize in camelCase (`firstContact`, `nextFollowUp`), dates
//! as `YYYY-MM-DD`, stages and interests as their Spanish labels. An absent
//! interest serializes as the empty string.

use crate::pipeline::Stage;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Date format used everywhere a date is rendered or parsed.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Shift a date by whole days. Out-of-range results keep the input date.
#[must_use]
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let magnitude = Days::new(days.unsigned_abs());
    let shifted = if days < 0 {
        date.checked_sub_days(magnitude)
    } else {
        date.checked_add_days(magnitude)
    };
    shifted.unwrap_or(date)
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, LeadError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|e| LeadError::InvalidInput(format!("Invalid date '{}': {}", raw, e)))
}

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Unique identifier of a lead.
///
/// Assigned once by the store and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadId(pub String);

impl LeadId {
    /// Create an identifier from any string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// INTEREST
// =============================================================================

/// What the lead wants to do with a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Interest {
    /// "Compra"
    Buy,
    /// "Venta"
    Sell,
    /// "Renta"
    Rent,
}

impl Interest {
    /// All interests in display order.
    pub const ALL: [Interest; 3] = [Interest::Buy, Interest::Sell, Interest::Rent];

    /// The stored label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Interest::Buy => "Compra",
            Interest::Sell => "Venta",
            Interest::Rent => "Renta",
        }
    }

    /// Look up an interest by its exact stored label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Interest> {
        Self::ALL.into_iter().find(|i| i.label() == label)
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Interest {
    type Err = LeadError;

    /// Accepts the stored label (any case) or the English name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        match wanted.as_str() {
            "compra" | "buy" => Ok(Interest::Buy),
            "venta" | "sell" => Ok(Interest::Sell),
            "renta" | "rent" => Ok(Interest::Rent),
            _ => Err(LeadError::InvalidInput(format!(
                "Unknown interest '{}'. Use: Compra, Venta, Renta",
                s
            ))),
        }
    }
}

// =============================================================================
// PROMOTER
// =============================================================================

/// A salesperson leads can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promoter {
    pub id: String,
    pub name: String,
}

impl Promoter {
    /// Create a new promoter.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

// =============================================================================
// UI PREFERENCES
// =============================================================================

/// Presentation preferences persisted alongside the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiPrefs {
    /// Compact listing when true, detailed cards when false.
    #[serde(default = "default_simple_mode")]
    pub simple_mode: bool,
}

fn default_simple_mode() -> bool {
    true
}

impl Default for UiPrefs {
    fn default() -> Self {
        Self { simple_mode: true }
    }
}

// =============================================================================
// LEAD
// =============================================================================

/// A prospective client tracked through the sales pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: LeadId,
    pub name: String,
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source: String,
    /// Set at creation, never mutated.
    pub first_contact: NaiveDate,
    #[serde(default, with = "interest_label")]
    pub interest: Option<Interest>,
    #[serde(default)]
    pub stage: Stage,
    /// Promoter name. Not checked against the promoter list.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub promoter: String,
    #[serde(default, with = "follow_up_date")]
    pub next_follow_up: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,
}

impl Lead {
    /// First whitespace-separated token of the name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }
}

// =============================================================================
// LEAD DRAFT (creation payload)
// =============================================================================

/// Payload of the quick-add action.
///
/// The store assigns `id`, `stage` and `first_contact`; everything else comes
/// from the draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub source: String,
    pub interest: Option<Interest>,
    pub promoter: String,
    pub next_follow_up: Option<NaiveDate>,
    pub notes: String,
}

impl LeadDraft {
    /// Create a draft with the two required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            ..Self::default()
        }
    }

    /// Reject drafts missing a name or phone.
    ///
    /// Whitespace-only values count as missing.
    pub fn validate(&self) -> Result<(), LeadError> {
        if self.name.trim().is_empty() {
            return Err(LeadError::MissingField("name"));
        }
        if self.phone.trim().is_empty() {
            return Err(LeadError::MissingField("phone"));
        }
        Ok(())
    }

    /// Build the stored lead. Stage is always the first pipeline stage.
    #[must_use]
    pub fn into_lead(self, id: LeadId, today: NaiveDate) -> Lead {
        Lead {
            id,
            name: self.name,
            phone: self.phone,
            email: self.email,
            source: self.source,
            first_contact: today,
            interest: self.interest,
            stage: Stage::default(),
            promoter: self.promoter,
            next_follow_up: self.next_follow_up,
            notes: self.notes,
        }
    }
}

// =============================================================================
// LEAD PATCH
// =============================================================================

/// A partial update merged into an existing lead.
///
/// `None` leaves a field untouched. `id` and `first_contact` are not
/// patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub source: Option<String>,
    pub interest: Option<Option<Interest>>,
    pub stage: Option<Stage>,
    pub promoter: Option<String>,
    pub next_follow_up: Option<Option<NaiveDate>>,
    pub notes: Option<String>,
}

impl LeadPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn interest(mut self, interest: Option<Interest>) -> Self {
        self.interest = Some(interest);
        self
    }

    #[must_use]
    pub fn stage(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    #[must_use]
    pub fn promoter(mut self, promoter: impl Into<String>) -> Self {
        self.promoter = Some(promoter.into());
        self
    }

    #[must_use]
    pub fn next_follow_up(mut self, date: Option<NaiveDate>) -> Self {
        self.next_follow_up = Some(date);
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// True when the patch would not change anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the set fields into `lead`.
    pub fn apply_to(&self, lead: &mut Lead) {
        if let Some(name) = &self.name {
            lead.name.clone_from(name);
        }
        if let Some(phone) = &self.phone {
            lead.phone.clone_from(phone);
        }
        if let Some(email) = &self.email {
            lead.email.clone_from(email);
        }
        if let Some(source) = &self.source {
            lead.source.clone_from(source);
        }
        if let Some(interest) = self.interest {
            lead.interest = interest;
        }
        if let Some(stage) = self.stage {
            lead.stage = stage;
        }
        if let Some(promoter) = &self.promoter {
            lead.promoter.clone_from(promoter);
        }
        if let Some(next) = self.next_follow_up {
            lead.next_follow_up = next;
        }
        if let Some(notes) = &self.notes {
            lead.notes.clone_from(notes);
        }
    }
}

// =============================================================================
// SERDE HELPERS
// =============================================================================

/// Optional text field; `null` reads as the empty string.
fn null_as_empty<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// `Option<Interest>` as a label, with `""` for none.
///
/// Unknown labels read back as none.
mod interest_label {
    use super::Interest;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        interest: &Option<Interest>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(interest.map(|i| i.label()).unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Interest>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(Interest::from_label))
    }
}

/// `Option<NaiveDate>` as `YYYY-MM-DD` or null. An empty string reads as none.
mod follow_up_date {
    use super::DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.serialize_str(&d.format(DATE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in Leadbook.
///
/// Store mutations never fail because of storage; those failures are logged
/// and swallowed. The variants below reach callers through validation,
/// explicit storage access, parsing and configuration.
#[derive(Debug, Error)]
pub enum LeadError {
    /// A required field was empty on creation or edit.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// No lead has the given identifier.
    #[error("Lead not found: {0}")]
    LeadNotFound(String),

    /// Input could not be interpreted (unknown stage, bad date, ...).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The storage backend failed.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// The configuration file is malformed.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn sample_lead() -> Lead {
        LeadDraft::new("Ana García", "+52 686 111 1111").into_lead(LeadId::new("C-1"), date(2024, 6, 10))
    }

    #[test]
    fn draft_requires_name_and_phone() {
        assert!(matches!(
            LeadDraft::new("", "123").validate(),
            Err(LeadError::MissingField("name"))
        ));
        assert!(matches!(
            LeadDraft::new("Ana", "   ").validate(),
            Err(LeadError::MissingField("phone"))
        ));
        assert!(LeadDraft::new("Ana", "123").validate().is_ok());
    }

    #[test]
    fn draft_forces_first_stage_and_first_contact() {
        let lead = sample_lead();
        assert_eq!(lead.stage, Stage::NewProspect);
        assert_eq!(lead.first_contact, date(2024, 6, 10));
    }

    #[test]
    fn patch_merges_only_set_fields() {
        let mut lead = sample_lead();
        lead.notes = "keep".to_string();

        LeadPatch::new()
            .promoter("María López")
            .next_follow_up(Some(date(2024, 6, 12)))
            .apply_to(&mut lead);

        assert_eq!(lead.promoter, "María López");
        assert_eq!(lead.next_follow_up, Some(date(2024, 6, 12)));
        assert_eq!(lead.notes, "keep");
        assert_eq!(lead.name, "Ana García");
    }

    #[test]
    fn patch_can_clear_optional_fields() {
        let mut lead = sample_lead();
        lead.interest = Some(Interest::Rent);
        lead.next_follow_up = Some(date(2024, 6, 11));

        LeadPatch::new()
            .interest(None)
            .next_follow_up(None)
            .apply_to(&mut lead);

        assert_eq!(lead.interest, None);
        assert_eq!(lead.next_follow_up, None);
    }

    #[test]
    fn empty_patch_is_empty() {
        assert!(LeadPatch::new().is_empty());
        assert!(!LeadPatch::new().notes("").is_empty());
    }

    #[test]
    fn lead_json_shape() {
        let mut lead = sample_lead();
        lead.next_follow_up = Some(date(2024, 6, 11));

        let json = serde_json::to_value(&lead).expect("serialize");
        assert_eq!(json["firstContact"], "2024-06-10");
        assert_eq!(json["nextFollowUp"], "2024-06-11");
        assert_eq!(json["stage"], "Prospecto nuevo");
        assert_eq!(json["interest"], "");
    }

    #[test]
    fn lead_reads_lenient_fields() {
        let json = r#"{
            "id": "C-9", "name": "Luis", "phone": "1",
            "firstContact": "2024-06-01",
            "interest": "Trueque", "stage": "Archivado", "nextFollowUp": ""
        }"#;
        let lead: Lead = serde_json::from_str(json).expect("parse");

        assert_eq!(lead.interest, None);
        assert_eq!(lead.stage, Stage::NewProspect);
        assert_eq!(lead.next_follow_up, None);
        assert_eq!(lead.notes, "");
    }

    #[test]
    fn lead_reads_null_text_fields_as_empty() {
        let json = r#"{
            "id": "C-9", "name": "Luis", "phone": "1",
            "firstContact": "2024-06-01",
            "email": null, "source": null, "promoter": null, "notes": null
        }"#;
        let lead: Lead = serde_json::from_str(json).expect("parse");

        assert_eq!(lead.email, "");
        assert_eq!(lead.source, "");
        assert_eq!(lead.promoter, "");
        assert_eq!(lead.notes, "");
    }

    #[test]
    fn lead_rejects_bad_follow_up_date() {
        let json = r#"{"id":"C-9","name":"Luis","phone":"1","firstContact":"2024-06-01","nextFollowUp":"mañana"}"#;
        assert!(serde_json::from_str::<Lead>(json).is_err());
    }

    #[test]
    fn interest_parses_labels_and_aliases() {
        assert_eq!("renta".parse::<Interest>().ok(), Some(Interest::Rent));
        assert_eq!("Buy".parse::<Interest>().ok(), Some(Interest::Buy));
        assert!("lease".parse::<Interest>().is_err());
    }

    #[test]
    fn add_days_crosses_month_boundaries() {
        assert_eq!(add_days(date(2024, 2, 28), 2), date(2024, 3, 1));
        assert_eq!(add_days(date(2024, 3, 1), -1), date(2024, 2, 29));
        assert_eq!(add_days(date(2024, 3, 1), 0), date(2024, 3, 1));
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert_eq!(parse_date(" 2024-06-10 ").ok(), Some(date(2024, 6, 10)));
        assert!(matches!(parse_date("10/06/2024"), Err(LeadError::InvalidInput(_))));
    }

    #[test]
    fn first_name_is_first_token() {
        assert_eq!(sample_lead().first_name(), "Ana");
    }
}
