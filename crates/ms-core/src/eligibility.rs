//! Session eligibility filtering for one athlete.

use tracing::trace;

use crate::matcher::weight_class_matches;
use crate::ranges::{parse_age_group, parse_entry_total_range};
use crate::types::{Athlete, MeetTrack, Session};

/// Narrows the schedule to the sessions `athlete` may lift in.
///
/// Survivors keep their schedule order. Sessions whose age or total specs do
/// not parse are unconstrained on that axis; an unmatchable weight spec fails
/// closed inside [`weight_class_matches`]. An athlete without a usable age
/// has no candidates at all.
#[must_use]
pub fn eligible_sessions<'s>(athlete: &Athlete, schedule: &'s [Session]) -> Vec<&'s Session> {
    let Some(age) = athlete.age else {
        return Vec::new();
    };
    let track = MeetTrack::of_athlete(&athlete.meet);

    let mut candidates = Vec::new();
    for session in schedule {
        if MeetTrack::of_session(&session.meet) != Some(track) {
            continue;
        }
        if session.gender.is_some_and(|g| g != athlete.gender) {
            continue;
        }
        if let Some(window) = parse_age_group(&session.age_group_weight_spec) {
            // The bracket letter is a gender restriction of its own.
            if window.gender != athlete.gender || !window.contains(age) {
                continue;
            }
        }
        if !weight_class_matches(&athlete.weight_class, &session.age_group_weight_spec) {
            continue;
        }
        if let Some(range) = parse_entry_total_range(&session.total_range_spec) {
            // A zero total means "unknown" and never rejects a candidate.
            if athlete.entry_total > 0 && !range.contains(athlete.entry_total) {
                continue;
            }
        }
        candidates.push(session);
    }
    trace!(
        athlete = %athlete.name,
        candidates = candidates.len(),
        "eligibility filter applied"
    );
    candidates
}
