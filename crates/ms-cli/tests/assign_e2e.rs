//! End-to-end tests for the `ms` binary.
//!
//! Exercise the full flow: roster + schedule JSONL in, augmented roster +
//! report out, including the re-input idempotence guarantee.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn ms_binary() -> String {
    env!("CARGO_BIN_EXE_ms").to_string()
}

const ROSTER: &str = r#"{"name":"Maria Huste","age":62,"gender":"Female","weight_class":"77","entry_total":150,"meet":"UMWF","club":"Team A"}
{"name":"Ben Cohen","age":"29","gender":"Male","weight_class":"89","entry_total":0,"meet":"2025 FINALS","club":"Team B"}
{"name":"No Age","gender":"Female","weight_class":"63","entry_total":100,"meet":"UMWF"}
"#;

const SCHEDULE: &str = r#"{"session_id":"1","platform":"Red","meet":"2025 UMWF","gender":"F","age_group_weight_spec":"W60 69kg - 86+kg","total_range_spec":"100-160"}
{"session_id":"2","platform":"Blue","meet":"2025 FINALS","age_group_weight_spec":"81kg - 102kg","total_range_spec":""}
"#;

fn write_inputs(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let roster = dir.join("roster.jsonl");
    let schedule = dir.join("schedule.jsonl");
    std::fs::write(&roster, ROSTER).unwrap();
    std::fs::write(&schedule, SCHEDULE).unwrap();
    (roster, schedule)
}

fn run_assign(home: &Path, roster: &Path, schedule: &Path, output: &Path) -> std::process::Output {
    Command::new(ms_binary())
        .env("HOME", home)
        .arg("assign")
        .arg("--start-list")
        .arg(roster)
        .arg("--schedule")
        .arg(schedule)
        .arg("--output")
        .arg(output)
        .output()
        .expect("failed to run ms assign")
}

fn parse_output(path: &Path) -> Vec<serde_json::Value> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn assign_resolves_roster_in_input_order() {
    let temp = TempDir::new().unwrap();
    let (roster, schedule) = write_inputs(temp.path());
    let output = temp.path().join("assigned.jsonl");

    let result = run_assign(temp.path(), &roster, &schedule, &output);
    assert!(
        result.status.success(),
        "ms assign should succeed: {}",
        String::from_utf8_lossy(&result.stderr)
    );

    let rows = parse_output(&output);
    assert_eq!(rows.len(), 3);

    // Maria: masters track, W60 window, 77 in range, total in range.
    assert_eq!(rows[0]["member_id"], 1400);
    assert_eq!(rows[0]["session_number"], "1");
    assert_eq!(rows[0]["session_platform"], "Red");
    assert_eq!(rows[0]["club"], "Team A");

    // Ben: finals track, unbracketed spec is age-unconstrained.
    assert_eq!(rows[1]["member_id"], 1401);
    assert_eq!(rows[1]["session_number"], "2");

    // Missing age: identifier assigned, session fields blank.
    assert_eq!(rows[2]["member_id"], 1402);
    assert_eq!(rows[2]["session_number"], "");
    assert_eq!(rows[2]["session_platform"], "");

    let report = String::from_utf8_lossy(&result.stdout);
    assert!(report.contains("Assigned: 2"));
    assert!(report.contains("Unassigned: 1"));
    assert!(report.contains("No Age (?, Female, 63, 100, UMWF)"));
}

#[test]
fn feeding_output_back_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let (roster, schedule) = write_inputs(temp.path());
    let first = temp.path().join("first.jsonl");
    let second = temp.path().join("second.jsonl");

    let result = run_assign(temp.path(), &roster, &schedule, &first);
    assert!(result.status.success());

    // The first output, resolver columns included, goes straight back in.
    let result = run_assign(temp.path(), &first, &schedule, &second);
    assert!(result.status.success());

    let first_content = std::fs::read_to_string(&first).unwrap();
    let second_content = std::fs::read_to_string(&second).unwrap();
    assert_eq!(first_content, second_content, "assignments must not churn");
}

#[test]
fn identical_inputs_produce_identical_bytes() {
    let temp = TempDir::new().unwrap();
    let (roster, schedule) = write_inputs(temp.path());
    let first = temp.path().join("first.jsonl");
    let second = temp.path().join("second.jsonl");

    assert!(run_assign(temp.path(), &roster, &schedule, &first).status.success());
    assert!(run_assign(temp.path(), &roster, &schedule, &second).status.success());

    assert_eq!(
        std::fs::read_to_string(&first).unwrap(),
        std::fs::read_to_string(&second).unwrap()
    );
}

#[test]
fn member_id_offset_comes_from_config() {
    let temp = TempDir::new().unwrap();
    let (roster, schedule) = write_inputs(temp.path());
    let output = temp.path().join("assigned.jsonl");

    let result = Command::new(ms_binary())
        .env("HOME", temp.path())
        .env("MS_MEMBER_ID_START", "2000")
        .arg("assign")
        .arg("--start-list")
        .arg(&roster)
        .arg("--schedule")
        .arg(&schedule)
        .arg("--output")
        .arg(&output)
        .output()
        .expect("failed to run ms assign");
    assert!(result.status.success());

    let rows = parse_output(&output);
    assert_eq!(rows[0]["member_id"], 2000);
    assert_eq!(rows[2]["member_id"], 2002);
}

#[test]
fn meet_name_config_overrides_labels() {
    let temp = TempDir::new().unwrap();
    let (roster, schedule) = write_inputs(temp.path());
    let output = temp.path().join("assigned.jsonl");

    let result = Command::new(ms_binary())
        .env("HOME", temp.path())
        .env("MS_MEET_NAME", "2025 Virus Weightlifting Finals")
        .arg("assign")
        .arg("--start-list")
        .arg(&roster)
        .arg("--schedule")
        .arg(&schedule)
        .arg("--output")
        .arg(&output)
        .output()
        .expect("failed to run ms assign");
    assert!(result.status.success());

    let rows = parse_output(&output);
    for row in &rows {
        assert_eq!(row["meet"], "2025 Virus Weightlifting Finals");
    }
}

#[test]
fn empty_roster_completes_with_zero_assignments() {
    let temp = TempDir::new().unwrap();
    let roster = temp.path().join("roster.jsonl");
    let schedule = temp.path().join("schedule.jsonl");
    std::fs::write(&roster, "").unwrap();
    std::fs::write(&schedule, SCHEDULE).unwrap();
    let output = temp.path().join("assigned.jsonl");

    let result = run_assign(temp.path(), &roster, &schedule, &output);
    assert!(result.status.success());
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "");

    let report = String::from_utf8_lossy(&result.stdout);
    assert!(report.contains("Assigned: 0"));
}

#[test]
fn check_reports_unparseable_schedule_rows() {
    let temp = TempDir::new().unwrap();
    let schedule = temp.path().join("schedule.jsonl");
    std::fs::write(
        &schedule,
        r#"{"session_id":"1","platform":"A","meet":"UMWF","age_group_weight_spec":"W60 48kg - 86+kg","total_range_spec":"100-160"}
{"session_id":"2","platform":"A","meet":"UMWF","age_group_weight_spec":"W45 TBD","total_range_spec":""}
"#,
    )
    .unwrap();

    let result = Command::new(ms_binary())
        .env("HOME", temp.path())
        .arg("check")
        .arg("--schedule")
        .arg(&schedule)
        .output()
        .expect("failed to run ms check");
    assert!(result.status.success());

    let report = String::from_utf8_lossy(&result.stdout);
    assert!(report.contains("Schedule check: 2 rows"));
    assert!(report.contains("matches no athletes"));
    assert!(report.contains("1 of 2 rows parse cleanly"));
}
