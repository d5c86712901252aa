//! Core domain logic for meet session assignment.
//!
//! This crate contains the fundamental types and logic for:
//! - Range parsing: the age-bracket, weight-class, and entry-total mini-languages
//! - Eligibility: narrowing a schedule to the sessions one athlete may lift in
//! - Assignment: tie-break scoring and the roster driver

mod assign;
mod eligibility;
mod matcher;
pub mod ranges;
pub mod types;

pub use assign::{
    AssignConfig, Assignment, AssignmentOutcome, UnassignedAthlete, assign_sessions,
};
pub use eligibility::eligible_sessions;
pub use matcher::weight_class_matches;
pub use ranges::{
    AgeWindow, TotalRange, WeightRange, parse_age_group, parse_entry_total_range,
    parse_weight_range,
};
pub use types::{Athlete, Gender, MeetTrack, Session, SessionRef, ValidationError};
