//! Implementation of the `ms assign` command.
//!
//! Reads the roster and schedule, resolves every athlete to a session, and
//! writes the augmented roster back out with an end-of-run summary.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use ms_core::{AssignConfig, AssignmentOutcome, UnassignedAthlete, assign_sessions};

use crate::Config;
use crate::commands::util::{RosterRow, load_roster, load_schedule};

/// How many unassigned athletes the human report lists before truncating.
const MAX_UNASSIGNED_LISTED: usize = 10;

/// Runs the assign command.
pub fn run(
    start_list: &Path,
    schedule_path: &Path,
    output_path: &Path,
    json: bool,
    config: &Config,
) -> Result<()> {
    let rows = load_roster(start_list)?;
    let schedule = load_schedule(schedule_path)?;
    tracing::info!(
        athletes = rows.len(),
        sessions = schedule.len(),
        "loaded inputs"
    );

    let athletes = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            row.to_athlete()
                .with_context(|| format!("invalid roster row {}", idx + 1))
        })
        .collect::<Result<Vec<_>>>()?;

    let assign_config = AssignConfig {
        member_id_start: config.member_id_start,
    };
    let outcome = assign_sessions(&athletes, &schedule, &assign_config);

    write_output(&rows, &outcome, config.meet_name.as_deref(), output_path)?;
    tracing::info!(path = %output_path.display(), "wrote augmented roster");

    if json {
        println!("{}", serde_json::to_string_pretty(&summarize(&outcome))?);
    } else {
        print!("{}", format_report(&outcome));
    }
    Ok(())
}

/// One augmented roster row on its way back to disk.
#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    member_id: u32,
    name: &'a str,
    age: Option<u32>,
    gender: &'a str,
    weight_class: &'a str,
    entry_total: Option<u32>,
    session_number: &'a str,
    session_platform: &'a str,
    meet: &'a str,
    #[serde(flatten)]
    extra: &'a serde_json::Map<String, Value>,
}

/// Writes the augmented roster as JSON Lines, one row per input row in
/// input order.
fn write_output(
    rows: &[RosterRow],
    outcome: &AssignmentOutcome,
    meet_name: Option<&str>,
    path: &Path,
) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for (row, assignment) in rows.iter().zip(&outcome.assignments) {
        let (session_number, session_platform) = assignment
            .session
            .as_ref()
            .map_or(("", ""), |s| (s.session_id.as_str(), s.platform.as_str()));
        let record = OutputRow {
            member_id: assignment.member_id,
            name: &row.name,
            age: row.age,
            gender: &row.gender,
            weight_class: &row.weight_class,
            entry_total: row.entry_total,
            session_number,
            session_platform,
            meet: meet_name.unwrap_or(&row.meet),
            extra: &row.extra,
        };
        serde_json::to_writer(&mut writer, &record).context("failed to serialize roster row")?;
        writeln!(writer)?;
    }
    writer.flush().context("failed to flush output")?;
    Ok(())
}

// ========== Report Formatting ==========

/// Formats the human-readable end-of-run report.
#[must_use]
pub fn format_report(outcome: &AssignmentOutcome) -> String {
    let mut output = String::new();
    writeln!(output, "Assignment complete:").unwrap();
    writeln!(output, "  Assigned: {}", outcome.assigned_count()).unwrap();
    writeln!(output, "  Unassigned: {}", outcome.unassigned.len()).unwrap();

    if !outcome.session_counts.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "Session assignment counts:").unwrap();
        for (session, count) in &outcome.session_counts {
            writeln!(
                output,
                "  Session {}, Platform {}: {count} athletes",
                session.session_id, session.platform
            )
            .unwrap();
        }
    }

    if !outcome.unassigned.is_empty() {
        writeln!(output).unwrap();
        writeln!(
            output,
            "Could not assign {} athletes:",
            outcome.unassigned.len()
        )
        .unwrap();
        for athlete in outcome.unassigned.iter().take(MAX_UNASSIGNED_LISTED) {
            writeln!(output, "  - {}", describe(athlete)).unwrap();
        }
        if outcome.unassigned.len() > MAX_UNASSIGNED_LISTED {
            writeln!(
                output,
                "  ... and {} more",
                outcome.unassigned.len() - MAX_UNASSIGNED_LISTED
            )
            .unwrap();
        }
    }
    output
}

/// Identifying one-liner for an unassigned athlete.
fn describe(athlete: &UnassignedAthlete) -> String {
    let age = athlete
        .age
        .map_or_else(|| "?".to_string(), |a| a.to_string());
    format!(
        "{} ({}, {}, {}, {}, {})",
        athlete.name, age, athlete.gender, athlete.weight_class, athlete.entry_total, athlete.meet
    )
}

// ========== JSON Output ==========

/// Machine-readable run summary.
#[derive(Debug, Serialize)]
pub struct JsonSummary {
    pub assigned: usize,
    pub unassigned: usize,
    pub session_counts: Vec<JsonSessionCount>,
    pub unassigned_athletes: Vec<JsonUnassigned>,
}

#[derive(Debug, Serialize)]
pub struct JsonSessionCount {
    pub session_id: String,
    pub platform: String,
    pub athletes: usize,
}

#[derive(Debug, Serialize)]
pub struct JsonUnassigned {
    pub member_id: u32,
    pub name: String,
    pub age: Option<u32>,
    pub gender: String,
    pub weight_class: String,
    pub entry_total: u32,
    pub meet: String,
}

fn summarize(outcome: &AssignmentOutcome) -> JsonSummary {
    JsonSummary {
        assigned: outcome.assigned_count(),
        unassigned: outcome.unassigned.len(),
        session_counts: outcome
            .session_counts
            .iter()
            .map(|(session, count)| JsonSessionCount {
                session_id: session.session_id.clone(),
                platform: session.platform.clone(),
                athletes: *count,
            })
            .collect(),
        unassigned_athletes: outcome
            .unassigned
            .iter()
            .map(|athlete| JsonUnassigned {
                member_id: athlete.member_id,
                name: athlete.name.clone(),
                age: athlete.age,
                gender: athlete.gender.to_string(),
                weight_class: athlete.weight_class.clone(),
                entry_total: athlete.entry_total,
                meet: athlete.meet.clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use ms_core::{Assignment, Gender, SessionRef};

    fn sample_outcome() -> AssignmentOutcome {
        let mut outcome = AssignmentOutcome::default();
        let first = SessionRef {
            session_id: "1".to_string(),
            platform: "Red".to_string(),
        };
        let second = SessionRef {
            session_id: "2".to_string(),
            platform: "Blue".to_string(),
        };
        outcome.assignments = vec![
            Assignment {
                member_id: 1400,
                session: Some(first.clone()),
            },
            Assignment {
                member_id: 1401,
                session: Some(second.clone()),
            },
            Assignment {
                member_id: 1402,
                session: None,
            },
        ];
        outcome.session_counts.insert(first, 1);
        outcome.session_counts.insert(second, 1);
        outcome.unassigned = vec![UnassignedAthlete {
            member_id: 1402,
            name: "No Match".to_string(),
            age: Some(29),
            gender: Gender::Female,
            weight_class: "63".to_string(),
            entry_total: 120,
            meet: "UMWF".to_string(),
        }];
        outcome
    }

    #[test]
    fn report_lists_counts_and_unassigned() {
        assert_snapshot!(format_report(&sample_outcome()), @r"
Assignment complete:
  Assigned: 2
  Unassigned: 1

Session assignment counts:
  Session 1, Platform Red: 1 athletes
  Session 2, Platform Blue: 1 athletes

Could not assign 1 athletes:
  - No Match (29, Female, 63, 120, UMWF)
");
    }

    #[test]
    fn report_for_empty_run_is_minimal() {
        assert_snapshot!(format_report(&AssignmentOutcome::default()), @r"
Assignment complete:
  Assigned: 0
  Unassigned: 0
");
    }

    #[test]
    fn report_truncates_long_unassigned_lists() {
        let mut outcome = AssignmentOutcome::default();
        for i in 0..12 {
            outcome.unassigned.push(UnassignedAthlete {
                member_id: 1400 + i,
                name: format!("Athlete {i}"),
                age: None,
                gender: Gender::Male,
                weight_class: "89".to_string(),
                entry_total: 0,
                meet: "FINALS".to_string(),
            });
        }

        let report = format_report(&outcome);
        assert!(report.contains("- Athlete 9 (?, Male, 89, 0, FINALS)"));
        assert!(!report.contains("- Athlete 10"));
        assert!(report.contains("... and 2 more"));
    }

    #[test]
    fn json_summary_mirrors_the_outcome() {
        let summary = summarize(&sample_outcome());
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["assigned"], 2);
        assert_eq!(value["unassigned"], 1);
        assert_eq!(value["session_counts"][0]["session_id"], "1");
        assert_eq!(value["session_counts"][0]["athletes"], 1);
        assert_eq!(value["unassigned_athletes"][0]["name"], "No Match");
        assert_eq!(value["unassigned_athletes"][0]["gender"], "Female");
    }
}
