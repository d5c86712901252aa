//! Schedule validation: run every spec parser over every row.
//!
//! Lets operators catch typo'd schedule rows before an assignment run. A row
//! without a parseable age bracket or total range is merely unconstrained on
//! that axis, but a row whose weight spec yields no classes matches no
//! athletes at all.

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use ms_core::{Session, parse_age_group, parse_entry_total_range, parse_weight_range};

use crate::commands::util::load_schedule;

/// Runs the check command.
pub fn run<W: Write>(writer: &mut W, schedule_path: &Path) -> Result<()> {
    let schedule = load_schedule(schedule_path)?;
    report(writer, &schedule)
}

fn report<W: Write>(writer: &mut W, schedule: &[Session]) -> Result<()> {
    writeln!(writer, "Schedule check: {} rows", schedule.len())?;

    let mut clean = 0usize;
    for session in schedule {
        let mut notes: Vec<String> = Vec::new();
        if parse_age_group(&session.age_group_weight_spec).is_none() {
            notes.push("no age bracket (age-unconstrained)".to_string());
        }
        if parse_weight_range(&session.age_group_weight_spec).is_none() {
            notes.push(format!(
                "weight spec {:?} matches no athletes",
                session.age_group_weight_spec
            ));
        }
        if parse_entry_total_range(&session.total_range_spec).is_none() {
            notes.push("no total range (total-unconstrained)".to_string());
        }
        if notes.is_empty() {
            clean += 1;
        } else {
            writeln!(
                writer,
                "  Session {}, Platform {}: {}",
                session.session_id,
                session.platform,
                notes.join("; ")
            )?;
        }
    }
    writeln!(writer, "{clean} of {} rows parse cleanly", schedule.len())?;
    Ok(())
}
