//! # Sales Stages
//!
//! | Index | Stage | Terminal |
//! |-------|-------|----------|
//! | 0 | Prospecto nuevo | no |
//! | 1 | En seguimiento | no |
//! | 2 | Interesado | no |
//! | 3 | En negociación | no |
//! | 4 | Cerrado | yes |
//! | 5 | Perdido | yes |
//!
//! Order defines progression. Advancing saturates at the last stage, so a
//! lead never leaves the pipeline by advancing. There is no regression rule;
//! moving a lead backwards is a manual field edit.

use crate::LeadError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// STAGE ENUM
// =============================================================================

/// A position in the sales pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Stage {
    /// "Prospecto nuevo"
    #[default]
    NewProspect,
    /// "En seguimiento"
    FollowingUp,
    /// "Interesado"
    Interested,
    /// "En negociación"
    Negotiating,
    /// "Cerrado"
    Closed,
    /// "Perdido"
    Lost,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Stage; 6] = [
        Stage::NewProspect,
        Stage::FollowingUp,
        Stage::Interested,
        Stage::Negotiating,
        Stage::Closed,
        Stage::Lost,
    ];

    /// The stored label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Stage::NewProspect => "Prospecto nuevo",
            Stage::FollowingUp => "En seguimiento",
            Stage::Interested => "Interesado",
            Stage::Negotiating => "En negociación",
            Stage::Closed => "Cerrado",
            Stage::Lost => "Perdido",
        }
    }

    /// Position in the pipeline.
    #[must_use]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Stage at a pipeline position, if any.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Stage> {
        Self::ALL.get(index).copied()
    }

    /// Look up a stage by its exact stored label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Stage> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }

    /// Look up a stage by label, treating unknown labels as the first stage.
    #[must_use]
    pub fn from_label_lenient(label: &str) -> Stage {
        Self::from_label(label).unwrap_or_default()
    }

    /// The following stage, saturating at the last one.
    #[must_use]
    pub fn next(&self) -> Stage {
        let last = Self::ALL.len().saturating_sub(1);
        Self::ALL[self.index().saturating_add(1).min(last)]
    }

    /// Closed and lost leads are out of the follow-up rotation.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Closed | Stage::Lost)
    }

    /// True for the last stage of the pipeline.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.next() == *self
    }
}

/// Advance a stage by one position; idempotent at the last stage.
#[must_use]
pub fn next_stage(current: Stage) -> Stage {
    current.next()
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Stage {
    type Err = LeadError;

    /// Accepts the stored label (any case) or a short English name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if let Some(stage) = Self::ALL
            .into_iter()
            .find(|st| st.label().to_lowercase() == wanted)
        {
            return Ok(stage);
        }
        match wanted.as_str() {
            "new" | "new-prospect" => Ok(Stage::NewProspect),
            "following-up" | "follow-up" => Ok(Stage::FollowingUp),
            "interested" => Ok(Stage::Interested),
            "negotiating" | "negotiation" => Ok(Stage::Negotiating),
            "closed" | "won" => Ok(Stage::Closed),
            "lost" => Ok(Stage::Lost),
            _ => Err(LeadError::InvalidInput(format!("Unknown stage '{}'", s))),
        }
    }
}

impl Serialize for Stage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Stage {
    /// Unknown labels read back as the first stage.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Stage::from_label_lenient(&label))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_ordering() {
        assert!(Stage::NewProspect < Stage::FollowingUp);
        assert!(Stage::Negotiating < Stage::Closed);
        assert!(Stage::Closed < Stage::Lost);
    }

    #[test]
    fn new_prospect_advances_to_following_up() {
        assert_eq!(next_stage(Stage::NewProspect), Stage::FollowingUp);
    }

    #[test]
    fn advancing_saturates_at_last_stage() {
        assert_eq!(next_stage(Stage::Lost), Stage::Lost);
        assert_eq!(next_stage(Stage::Closed), Stage::Lost);
        assert!(Stage::Lost.is_last());
        assert!(!Stage::Closed.is_last());
    }

    #[test]
    fn unknown_label_advances_from_first_stage() {
        let stage = Stage::from_label_lenient("Archivado");
        assert_eq!(stage, Stage::NewProspect);
        assert_eq!(next_stage(stage), Stage::FollowingUp);
    }

    #[test]
    fn index_roundtrip() {
        for stage in Stage::ALL {
            assert_eq!(Stage::from_index(stage.index()), Some(stage));
        }
        assert_eq!(Stage::from_index(6), None);
    }

    #[test]
    fn terminal_stages() {
        let terminal: Vec<_> = Stage::ALL.into_iter().filter(Stage::is_terminal).collect();
        assert_eq!(terminal, vec![Stage::Closed, Stage::Lost]);
    }

    #[test]
    fn parse_accepts_labels_and_aliases() {
        assert_eq!("en negociación".parse::<Stage>().ok(), Some(Stage::Negotiating));
        assert_eq!("lost".parse::<Stage>().ok(), Some(Stage::Lost));
        assert!("archived".parse::<Stage>().is_err());
    }

    #[test]
    fn stage_display() {
        assert_eq!(format!("{}", Stage::Interested), "Interesado");
    }
}
