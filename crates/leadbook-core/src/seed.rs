//! # Seed Data
//!
//! Built-in sample records used when the storage slot is missing or
//! unreadable. Dates are relative to the supplied `today`.

use crate::formats::Snapshot;
use crate::{Interest, Lead, LeadId, Promoter, Stage, UiPrefs};
use crate::types::add_days;
use chrono::NaiveDate;

#[allow(clippy::too_many_arguments)]
fn seed_lead(
    today: NaiveDate,
    id: &str,
    name: &str,
    phone: &str,
    source: &str,
    first_contact_offset: i64,
    interest: Interest,
    stage: Stage,
    promoter: &str,
    follow_up_offset: i64,
    notes: &str,
) -> Lead {
    Lead {
        id: LeadId::new(id),
        name: name.to_string(),
        phone: phone.to_string(),
        email: String::new(),
        source: source.to_string(),
        first_contact: add_days(today, first_contact_offset),
        interest: Some(interest),
        stage,
        promoter: promoter.to_string(),
        next_follow_up: Some(add_days(today, follow_up_offset)),
        notes: notes.to_string(),
    }
}

/// Three sample promoters and three sample leads.
#[must_use]
pub fn seed_snapshot(today: NaiveDate) -> Snapshot {
    Snapshot {
        promoters: vec![
            Promoter::new("u1", "Fer Labrador"),
            Promoter::new("u2", "María López"),
            Promoter::new("u3", "Carlos Pérez"),
        ],
        clients: vec![
            seed_lead(
                today,
                "C-001",
                "Ana García",
                "+52 686 111 1111",
                "Facebook",
                -10,
                Interest::Buy,
                Stage::FollowingUp,
                "Fer Labrador",
                2,
                "Le interesa Modelo Olivo",
            ),
            seed_lead(
                today,
                "C-002",
                "Luis Martínez",
                "+52 686 222 2222",
                "Marketplace",
                -5,
                Interest::Rent,
                Stage::Interested,
                "María López",
                1,
                "Pet-friendly",
            ),
            seed_lead(
                today,
                "C-003",
                "Sofía Herrera",
                "+52 686 333 3333",
                "Recomendación",
                -2,
                Interest::Buy,
                Stage::NewProspect,
                "Carlos Pérez",
                3,
                "3 recámaras",
            ),
        ],
        ui: UiPrefs::default(),
    }
}
