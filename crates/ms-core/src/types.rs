//! Core vocabulary types for rosters and schedules.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Unrecognized gender vocabulary.
    #[error("invalid gender: {value}")]
    InvalidGender { value: String },
}

/// Athlete gender, the vocabulary shared by rosters and schedules.
///
/// Rosters spell it out (`"Male"`/`"Female"`); schedules abbreviate to a
/// single letter, where `W` (women) normalizes to `Female`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Single-letter code used by schedule gender restrictions.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }

    /// Roster spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("male") || trimmed.eq_ignore_ascii_case("m") {
            Ok(Self::Male)
        } else if trimmed.eq_ignore_ascii_case("female")
            || trimmed.eq_ignore_ascii_case("f")
            || trimmed.eq_ignore_ascii_case("w")
        {
            Ok(Self::Female)
        } else {
            Err(ValidationError::InvalidGender {
                value: s.to_string(),
            })
        }
    }
}

/// Marker substring identifying the masters track in free-text meet labels.
pub const MASTERS_MARKER: &str = "UMWF";

/// Marker substring identifying the finals track in schedule meet labels.
pub const FINALS_MARKER: &str = "FINALS";

/// One of the two parallel competition tracks a meet runs.
///
/// Track membership is a marker-substring convention: labels are free text
/// upstream, so a combined label like `"FINALS + UMWF"` counts as masters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeetTrack {
    Masters,
    Finals,
}

impl MeetTrack {
    /// Track an athlete's meet label places them in.
    #[must_use]
    pub fn of_athlete(label: &str) -> Self {
        if label.to_uppercase().contains(MASTERS_MARKER) {
            Self::Masters
        } else {
            Self::Finals
        }
    }

    /// Track a schedule row's meet label belongs to, if any.
    ///
    /// Schedule rows must name a track explicitly; a label carrying neither
    /// marker belongs to no track and matches no athlete.
    #[must_use]
    pub fn of_session(label: &str) -> Option<Self> {
        let upper = label.to_uppercase();
        if upper.contains(MASTERS_MARKER) {
            Some(Self::Masters)
        } else if upper.contains(FINALS_MARKER) {
            Some(Self::Finals)
        } else {
            None
        }
    }
}

/// One roster row, as handed over by the start-list scrapers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Athlete {
    /// Display name; never used for matching.
    pub name: String,

    /// Competition age. `None` when the source row was missing or garbled;
    /// such athletes cannot be resolved.
    pub age: Option<u32>,

    pub gender: Gender,

    /// Raw weight-class token, e.g. `"69"` or `"86+"`.
    pub weight_class: String,

    /// Projected competition total in kilograms; `0` means unknown.
    #[serde(default)]
    pub entry_total: u32,

    /// Free-text meet-variant label.
    pub meet: String,
}

/// One schedule row, read-only input to the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub platform: String,

    /// Free-text meet-variant label; must agree with the athlete's track.
    pub meet: String,

    /// Optional gender restriction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,

    /// Combined age-bracket and weight-class spec, e.g. `"W60 48kg - 86+kg"`.
    pub age_group_weight_spec: String,

    /// Projected-total range, e.g. `"100-160"`.
    #[serde(default)]
    pub total_range_spec: String,
}

/// The identifying pair written back onto an assigned athlete.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionRef {
    pub session_id: String,
    pub platform: String,
}

impl SessionRef {
    /// Identifying pair of a schedule row.
    #[must_use]
    pub fn of(session: &Session) -> Self {
        Self {
            session_id: session.session_id.clone(),
            platform: session.platform.clone(),
        }
    }
}
