//! # Primitives
//!
//! Fixed constants of the lead pipeline.
//!
//! These are compiled into the binary and are immutable at runtime. The
//! configuration file can override presentation defaults (business name,
//! default source) but never the ranking windows or the slot key format.

/// The storage slot that holds the whole snapshot.
///
/// Kept identical to the key used by earlier browser builds so an exported
/// slot can be dropped in as-is.
pub const SLOT_KEY: &str = "eleva_crm_v1";

/// Prefix of generated lead identifiers (`C-<unix millis>`).
pub const LEAD_ID_PREFIX: &str = "C-";

// =============================================================================
// RANKING WINDOWS
// =============================================================================

/// A follow-up at most this many days ahead scores as urgent (2).
pub const URGENT_WINDOW_DAYS: i64 = 1;

/// A follow-up at most this many days ahead scores as soon (1).
///
/// Also the horizon of [`crate::FollowUpStatus::Soon`].
pub const SOON_WINDOW_DAYS: i64 = 2;

// =============================================================================
// DEFAULTS
// =============================================================================

/// Business name used in the messaging greeting when none is configured.
pub const DEFAULT_BUSINESS_NAME: &str = "Eleva Inmobiliaria";

/// Phrase used in the greeting when the lead has no interest recorded.
pub const DEFAULT_INTEREST_PHRASE: &str = "la propiedad";

/// Source recorded for leads created through quick-add.
pub const DEFAULT_SOURCE: &str = "WhatsApp";

/// Days ahead of today for the first follow-up of a quick-added lead.
pub const DEFAULT_FOLLOW_UP_DAYS: i64 = 1;

/// Base URL of the messaging link.
pub const MESSAGE_BASE_URL: &str = "https://wa.me/";

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum accepted snapshot size (16 MiB).
///
/// Checked before any parsing so an oversized slot falls back to seed data
/// without allocating the parsed structure.
pub const MAX_SNAPSHOT_SIZE: usize = 16 * 1024 * 1024;

/// Maximum length of a slot key.
pub const MAX_SLOT_KEY_LENGTH: usize = 128;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_are_ordered() {
        assert!(URGENT_WINDOW_DAYS < SOON_WINDOW_DAYS);
    }

    #[test]
    fn slot_key_is_stable() {
        assert_eq!(SLOT_KEY, "eleva_crm_v1");
    }
}
