//! # Lead Ranking
//!
//! Urgency score used as the sort key of the lead list.
//!
//! | Condition | Score |
//! |-----------|-------|
//! | no follow-up, or terminal stage | 0 |
//! | follow-up before today | 3 |
//! | follow-up today or tomorrow | 2 |
//! | follow-up in two days | 1 |
//! | later | 0 |
//!
//! Dates are calendar dates with no time of day. Both windows are inclusive
//! at whole-day boundaries: a follow-up exactly `URGENT_WINDOW_DAYS` ahead is
//! urgent, one exactly `SOON_WINDOW_DAYS` ahead is soon.

use crate::primitives::{SOON_WINDOW_DAYS, URGENT_WINDOW_DAYS};
use crate::Lead;
use chrono::NaiveDate;
use std::cmp::Reverse;

/// Score of an overdue follow-up.
pub const SCORE_OVERDUE: u8 = 3;
/// Score of a follow-up within the urgent window.
pub const SCORE_URGENT: u8 = 2;
/// Score of a follow-up within the soon window.
pub const SCORE_SOON: u8 = 1;
/// Score of a lead that needs no attention.
pub const SCORE_NONE: u8 = 0;

/// How urgently a lead needs contact, in `0..=3`.
#[must_use]
pub fn score(lead: &Lead, today: NaiveDate) -> u8 {
    let Some(next) = lead.next_follow_up else {
        return SCORE_NONE;
    };
    if lead.stage.is_terminal() {
        return SCORE_NONE;
    }
    if next < today {
        return SCORE_OVERDUE;
    }

    let days_ahead = next.signed_duration_since(today).num_days();
    if days_ahead <= URGENT_WINDOW_DAYS {
        SCORE_URGENT
    } else if days_ahead <= SOON_WINDOW_DAYS {
        SCORE_SOON
    } else {
        SCORE_NONE
    }
}

/// Sort leads by descending score. Equal scores keep their input order.
#[must_use]
pub fn rank<'a, I>(leads: I, today: NaiveDate) -> Vec<&'a Lead>
where
    I: IntoIterator<Item = &'a Lead>,
{
    let mut ranked: Vec<&Lead> = leads.into_iter().collect();
    ranked.sort_by_cached_key(|lead| Reverse(score(lead, today)));
    ranked
}

// =============================================================================
// FOLLOW-UP STATUS
// =============================================================================

/// Display classification of a lead's next follow-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUpStatus {
    /// No follow-up scheduled.
    None,
    /// Active lead whose follow-up date has passed.
    Overdue,
    /// Active lead with a follow-up between today and the soon window.
    Soon,
    /// Any other scheduled follow-up, including those of closed/lost leads.
    Scheduled,
}

impl FollowUpStatus {
    /// Short tag for listings.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            FollowUpStatus::None => "",
            FollowUpStatus::Overdue => "VENCIDO",
            FollowUpStatus::Soon => "PRONTO",
            FollowUpStatus::Scheduled => "",
        }
    }
}

/// Classify a lead's follow-up relative to `today`.
#[must_use]
pub fn follow_up_status(lead: &Lead, today: NaiveDate) -> FollowUpStatus {
    let Some(next) = lead.next_follow_up else {
        return FollowUpStatus::None;
    };
    if lead.stage.is_terminal() {
        return FollowUpStatus::Scheduled;
    }
    if next < today {
        return FollowUpStatus::Overdue;
    }
    if next.signed_duration_since(today).num_days() <= SOON_WINDOW_DAYS {
        FollowUpStatus::Soon
    } else {
        FollowUpStatus::Scheduled
    }
}

// =============================================================================
// TESTS
// =============================================================================
