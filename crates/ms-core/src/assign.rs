//! Tie-break scoring and the roster assignment driver.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::eligibility::eligible_sessions;
use crate::ranges::parse_entry_total_range;
use crate::types::{Athlete, Gender, Session, SessionRef};

/// Configuration for a roster assignment run.
#[derive(Debug, Clone)]
pub struct AssignConfig {
    /// First synthetic member identifier handed out, independent of any
    /// identifiers already present upstream.
    pub member_id_start: u32,
}

impl Default for AssignConfig {
    fn default() -> Self {
        Self {
            member_id_start: 1400,
        }
    }
}

/// Resolution for a single roster row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Synthetic identifier, assigned whether or not a session was found.
    pub member_id: u32,

    /// The chosen session, `None` when the athlete is unresolved.
    pub session: Option<SessionRef>,
}

/// Identifying snapshot of an athlete no session could be found for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnassignedAthlete {
    pub member_id: u32,
    pub name: String,
    pub age: Option<u32>,
    pub gender: Gender,
    pub weight_class: String,
    pub entry_total: u32,
    pub meet: String,
}

/// Result of assigning a whole roster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentOutcome {
    /// One entry per roster row, in roster order.
    pub assignments: Vec<Assignment>,

    /// Athletes with no candidate session, in roster order.
    pub unassigned: Vec<UnassignedAthlete>,

    /// Athletes per session/platform pair, sorted by key.
    pub session_counts: BTreeMap<SessionRef, usize>,
}

impl AssignmentOutcome {
    /// Number of roster rows that received a session.
    #[must_use]
    pub fn assigned_count(&self) -> usize {
        self.assignments
            .iter()
            .filter(|a| a.session.is_some())
            .count()
    }
}

/// Assigns every athlete in `roster` to at most one session from `schedule`.
///
/// Athletes resolve independently, so the per-athlete work fans out over the
/// thread pool; the tally pass afterwards runs sequentially in roster order,
/// keeping counts and diagnostics byte-stable across runs.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    reason = "roster sizes sit far below u32::MAX"
)]
pub fn assign_sessions(
    roster: &[Athlete],
    schedule: &[Session],
    config: &AssignConfig,
) -> AssignmentOutcome {
    let selections: Vec<Option<SessionRef>> = roster
        .par_iter()
        .map(|athlete| select_session(athlete, schedule).map(SessionRef::of))
        .collect();

    let mut outcome = AssignmentOutcome::default();
    for (index, (athlete, session)) in roster.iter().zip(selections).enumerate() {
        let member_id = config.member_id_start + index as u32;
        if let Some(session_ref) = &session {
            *outcome.session_counts.entry(session_ref.clone()).or_insert(0) += 1;
        } else {
            warn!(
                name = %athlete.name,
                age = ?athlete.age,
                gender = %athlete.gender,
                weight_class = %athlete.weight_class,
                entry_total = athlete.entry_total,
                meet = %athlete.meet,
                "could not assign a session"
            );
            outcome.unassigned.push(UnassignedAthlete {
                member_id,
                name: athlete.name.clone(),
                age: athlete.age,
                gender: athlete.gender,
                weight_class: athlete.weight_class.clone(),
                entry_total: athlete.entry_total,
                meet: athlete.meet.clone(),
            });
        }
        outcome.assignments.push(Assignment { member_id, session });
    }
    outcome
}

/// Picks the best candidate session for one athlete.
///
/// With a known positive total, the candidate whose total-range midpoint
/// lies closest wins; equal scores keep the earlier candidate. Without a
/// scoreable total the first candidate in schedule order stands in as a
/// deterministic default.
fn select_session<'s>(athlete: &Athlete, schedule: &'s [Session]) -> Option<&'s Session> {
    let candidates = eligible_sessions(athlete, schedule);
    if candidates.is_empty() {
        return None;
    }

    if athlete.entry_total > 0 {
        let mut best: Option<(&Session, f64)> = None;
        for &session in &candidates {
            let Some(range) = parse_entry_total_range(&session.total_range_spec) else {
                continue;
            };
            let score = (f64::from(athlete.entry_total) - range.midpoint()).abs();
            if best.is_none_or(|(_, s)| score < s) {
                best = Some((session, score));
            }
        }
        if let Some((session, _)) = best {
            return Some(session);
        }
    }

    if candidates.len() > 1 {
        debug!(
            athlete = %athlete.name,
            candidates = candidates.len(),
            "no scoreable total; falling back to first candidate in schedule order"
        );
    }
    candidates.first().copied()
}
