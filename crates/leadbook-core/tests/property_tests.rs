//! # Property-Based Tests
//!
//! Ranking and stage invariants checked with proptest.

use chrono::NaiveDate;
use leadbook_core::{Lead, LeadDraft, LeadId, Stage, add_days, next_stage, rank, score};
use proptest::collection::vec;
use proptest::prelude::*;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).expect("valid date")
}

fn lead_with(stage: Stage, next: Option<NaiveDate>) -> Lead {
    let mut lead = LeadDraft::new("Prop", "1").into_lead(LeadId::new("C-1"), base_date());
    lead.stage = stage;
    lead.next_follow_up = next;
    lead
}

fn any_stage() -> impl Strategy<Value = Stage> {
    (0usize..Stage::ALL.len()).prop_map(|i| Stage::ALL[i])
}

fn active_stage() -> impl Strategy<Value = Stage> {
    any_stage().prop_filter("non-terminal", |s| !s.is_terminal())
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Terminal leads never need contact, whatever the dates.
    #[test]
    fn terminal_stage_scores_zero(
        terminal in prop_oneof![Just(Stage::Closed), Just(Stage::Lost)],
        today_offset in -3650i64..3650,
        follow_offset in -3650i64..3650,
    ) {
        let today = add_days(base_date(), today_offset);
        let lead = lead_with(terminal, Some(add_days(base_date(), follow_offset)));
        prop_assert_eq!(score(&lead, today), 0);
    }

    /// No follow-up date means no urgency.
    #[test]
    fn absent_follow_up_scores_zero(stage in any_stage(), today_offset in -3650i64..3650) {
        let lead = lead_with(stage, None);
        prop_assert_eq!(score(&lead, add_days(base_date(), today_offset)), 0);
    }

    /// Scores stay in 0..=3.
    #[test]
    fn score_in_range(stage in any_stage(), offset in -400i64..400) {
        let lead = lead_with(stage, Some(add_days(base_date(), offset)));
        prop_assert!(score(&lead, base_date()) <= 3);
    }

    /// Moving the follow-up later never raises the score.
    #[test]
    fn score_non_increasing_in_follow_up_date(
        stage in active_stage(),
        earlier in -30i64..30,
        gap in 0i64..30,
    ) {
        let today = base_date();
        let near = lead_with(stage, Some(add_days(today, earlier)));
        let far = lead_with(stage, Some(add_days(today, earlier + gap)));
        prop_assert!(score(&far, today) <= score(&near, today));
    }

    /// Advancing enough times reaches a fixed point, which then never moves.
    #[test]
    fn advancing_reaches_fixed_point(stage in any_stage(), extra in 0usize..10) {
        let mut current = stage;
        for _ in 0..Stage::ALL.len() {
            current = next_stage(current);
        }
        let fixed = current;
        for _ in 0..extra {
            current = next_stage(current);
        }
        prop_assert_eq!(current, fixed);
        prop_assert_eq!(next_stage(fixed), fixed);
    }

    /// Advancing never moves backwards and moves at most one position.
    #[test]
    fn advancing_moves_at_most_one_step(stage in any_stage()) {
        let next = next_stage(stage);
        prop_assert!(next >= stage);
        prop_assert!(next.index() <= stage.index() + 1);
    }

    /// Ranking is a permutation sorted by descending score.
    #[test]
    fn rank_sorted_descending(offsets in vec(proptest::option::of(-10i64..10), 0..40)) {
        let today = base_date();
        let leads: Vec<Lead> = offsets
            .iter()
            .enumerate()
            .map(|(i, off)| {
                let mut lead = lead_with(Stage::Interested, off.map(|d| add_days(today, d)));
                lead.id = LeadId::new(format!("C-{}", i));
                lead
            })
            .collect();

        let ranked = rank(&leads, today);
        prop_assert_eq!(ranked.len(), leads.len());
        for pair in ranked.windows(2) {
            prop_assert!(score(pair[0], today) >= score(pair[1], today));
        }
    }
}
