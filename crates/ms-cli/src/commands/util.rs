//! Shared record shapes and JSON Lines helpers for the CLI commands.
//!
//! Upstream scrapers are loose about types (ages and totals arrive as
//! numbers or numeric strings, session ids sometimes as numbers), so the
//! row shapes here deserialize leniently and normalize before anything
//! reaches the resolver.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use ms_core::{Athlete, Session};

/// Columns the resolver regenerates on every run. Stripped from the
/// pass-through map on load so re-feeding an output file never duplicates
/// keys.
const RESOLVER_COLUMNS: &[&str] = &["member_id", "session_number", "session_platform"];

/// Reads one record per non-empty line from a JSON Lines file.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", idx + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let record: T = serde_json::from_str(trimmed)
            .with_context(|| format!("invalid JSON on line {} of {}", idx + 1, path.display()))?;
        records.push(record);
    }
    Ok(records)
}

/// One roster row as found on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterRow {
    pub name: String,

    #[serde(default, deserialize_with = "lenient_u32")]
    pub age: Option<u32>,

    pub gender: String,

    #[serde(default)]
    pub weight_class: String,

    #[serde(default, deserialize_with = "lenient_u32")]
    pub entry_total: Option<u32>,

    #[serde(default)]
    pub meet: String,

    /// Upstream columns the resolver does not touch ride along unchanged.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl RosterRow {
    /// Normalizes the row into the resolver's input shape.
    pub fn to_athlete(&self) -> Result<Athlete> {
        let gender = self.gender.parse()?;
        Ok(Athlete {
            name: self.name.clone(),
            // Scrapers emit 0 for unknown ages; resolution needs a real one.
            age: self.age.filter(|&age| age > 0),
            gender,
            weight_class: self.weight_class.trim().to_string(),
            entry_total: self.entry_total.unwrap_or(0),
            meet: self.meet.clone(),
        })
    }
}

/// Loads a roster file, dropping any resolver-owned columns from a previous
/// run.
pub fn load_roster(path: &Path) -> Result<Vec<RosterRow>> {
    let mut rows: Vec<RosterRow> = read_jsonl(path)?;
    for row in &mut rows {
        for column in RESOLVER_COLUMNS {
            row.extra.remove(*column);
        }
    }
    Ok(rows)
}

/// One schedule row as found on disk. The field aliases cover the column
/// names the schedule scraper emits.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleRow {
    #[serde(alias = "sess", deserialize_with = "lenient_string")]
    pub session_id: String,

    #[serde(default, alias = "plat")]
    pub platform: String,

    #[serde(default)]
    pub meet: String,

    #[serde(default)]
    pub gender: String,

    #[serde(default, alias = "age_group_weight_category")]
    pub age_group_weight_spec: String,

    #[serde(default, alias = "estimated_entry_totals")]
    pub total_range_spec: String,
}

impl ScheduleRow {
    fn into_session(self) -> Session {
        // An unparseable restriction is no restriction; the bracket letter
        // inside the spec still applies either way.
        let gender = self.gender.parse().ok();
        Session {
            session_id: self.session_id,
            platform: self.platform,
            meet: self.meet,
            gender,
            age_group_weight_spec: self.age_group_weight_spec,
            total_range_spec: self.total_range_spec,
        }
    }
}

/// Loads a schedule file into resolver sessions.
pub fn load_schedule(path: &Path) -> Result<Vec<Session>> {
    let rows: Vec<ScheduleRow> = read_jsonl(path)?;
    Ok(rows.into_iter().map(ScheduleRow::into_session).collect())
}

/// Accepts numbers, numeric strings, or nothing; anything else is `None`.
fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Accepts strings or bare scalars, stringifying the latter.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        other => other.to_string(),
    })
}
