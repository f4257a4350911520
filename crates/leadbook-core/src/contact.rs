//! # Contact Links
//!
//! Dial and messaging targets derived from a lead's phone.
//!
//! Pure string transforms. Nothing here opens the link; the platform's
//! default handler does that.

use crate::primitives::{DEFAULT_INTEREST_PHRASE, MESSAGE_BASE_URL};
use crate::Lead;
use serde::Serialize;

/// `tel:` target with spaces and hyphens removed.
///
/// Every other character, including a leading `+` or parentheses, passes
/// through unchanged.
#[must_use]
pub fn dial_target(phone: &str) -> String {
    let stripped: String = phone.chars().filter(|c| *c != ' ' && *c != '-').collect();
    format!("tel:{}", stripped)
}

/// ASCII digits of a phone, in order.
#[must_use]
pub fn digits_only(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Messaging link to `phone` with `text` prefilled.
#[must_use]
pub fn message_target(phone: &str, text: &str) -> String {
    format!(
        "{}{}?text={}",
        MESSAGE_BASE_URL,
        digits_only(phone),
        urlencoding::encode(text)
    )
}

/// Greeting prefilled in the messaging link.
#[must_use]
pub fn greeting(lead: &Lead, business: &str) -> String {
    let interest = lead
        .interest
        .map(|i| i.label())
        .unwrap_or(DEFAULT_INTEREST_PHRASE);
    format!(
        "Hola {}, te escribe {}. ¿Seguimos con tu interés en {}?",
        lead.first_name(),
        business,
        interest
    )
}

/// Both outbound targets of a lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactLinks {
    pub dial: String,
    pub message: String,
}

impl ContactLinks {
    #[must_use]
    pub fn for_lead(lead: &Lead, business: &str) -> Self {
        Self {
            dial: dial_target(&lead.phone),
            message: message_target(&lead.phone, &greeting(lead, business)),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Interest, LeadDraft, LeadId};
    use chrono::NaiveDate;

    fn lead(name: &str, phone: &str, interest: Option<Interest>) -> Lead {
        let mut draft = LeadDraft::new(name, phone);
        draft.interest = interest;
        draft.into_lead(
            LeadId::new("C-1"),
            NaiveDate::from_ymd_opt(2024, 6, 10).expect("valid date"),
        )
    }

    #[test]
    fn digits_drop_everything_else() {
        assert_eq!(digits_only("+52 686 111 1111"), "526861111111");
        assert_eq!(digits_only("(686) 111-2222 ext."), "6861112222");
        assert_eq!(digits_only(""), "");
    }

    #[test]
    fn dial_strips_spaces_and_hyphens_only() {
        assert_eq!(dial_target("+52 686-111-1111"), "tel:+526861111111");
        assert_eq!(dial_target("(686) 111.2222"), "tel:(686)111.2222");
    }

    #[test]
    fn message_link_embeds_digits_and_encoded_text() {
        let url = message_target("+52 686 111 1111", "Hola Ana");
        assert_eq!(url, "https://wa.me/526861111111?text=Hola%20Ana");
    }

    #[test]
    fn greeting_uses_first_name_and_interest() {
        let with_interest = lead("Luis Martínez", "1", Some(Interest::Rent));
        assert_eq!(
            greeting(&with_interest, "Eleva Inmobiliaria"),
            "Hola Luis, te escribe Eleva Inmobiliaria. ¿Seguimos con tu interés en Renta?"
        );

        let without = lead("Sofía Herrera", "1", None);
        assert!(greeting(&without, "X").ends_with("en la propiedad?"));
    }

    #[test]
    fn links_for_lead() {
        let links = ContactLinks::for_lead(&lead("Ana García", "+52 686 111 1111", None), "Eleva");
        assert_eq!(links.dial, "tel:+526861111111");
        assert!(links.message.starts_with("https://wa.me/526861111111?text=Hola%20Ana%2C"));
    }
}
