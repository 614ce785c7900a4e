use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn c311_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("c311");
    path
}

const SAMPLE_EXTRACT: &str = "\
Created_date,Complaint_type,Incident_zip,Borough,Descriptor,Status,Closed_Date
01/02/2023,Noise,10001,,Loud,Open,
01/03/2023,Heat,11201,BROOKLYN,No heat,Closed,01/05/2023
garbage-date,Rodent,10002,MANHATTAN,Rats,Open,02/01/2023
";

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let data_dir = root.join("data");
    fs::create_dir_all(&data_dir).unwrap();

    fs::write(root.join("extract.csv"), SAMPLE_EXTRACT).unwrap();

    let config_content = format!(
        r#"[db]
path = "{}/data/complaints.sqlite"

[extract]
path = "{}/extract.csv"
row_cap = 100000
"#,
        root.display(),
        root.display()
    );

    let config_path = config_dir.join("c311.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_c311(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = c311_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run c311 binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

fn records_lines(config_path: &Path) -> Vec<serde_json::Value> {
    let (stdout, stderr, success) = run_c311(config_path, &["records"]);
    assert!(success, "records failed: stderr={}", stderr);
    stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn test_init_creates_store() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_c311(&config_path, &["init"]);
    assert!(success, "init failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("initialized"));
}

#[test]
fn test_init_idempotent() {
    let (_tmp, config_path) = setup_test_env();

    let (_, _, success1) = run_c311(&config_path, &["init"]);
    assert!(success1, "First init failed");

    let (_, _, success2) = run_c311(&config_path, &["init"]);
    assert!(success2, "Second init failed (not idempotent)");
}

#[test]
fn test_load_inserts_all_rows() {
    let (_tmp, config_path) = setup_test_env();

    run_c311(&config_path, &["init"]);
    let (stdout, stderr, success) = run_c311(&config_path, &["load"]);
    assert!(success, "load failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("rows read: 3"));
    assert!(stdout.contains("records inserted: 3"));
    assert!(stdout.contains("ok"));
}

#[test]
fn test_load_without_prior_init() {
    let (_tmp, config_path) = setup_test_env();

    // load creates the collection itself; init is not a prerequisite
    let (stdout, stderr, success) = run_c311(&config_path, &["load"]);
    assert!(success, "load failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("records inserted: 3"));
}

#[test]
fn test_scenario_row_normalized() {
    let (_tmp, config_path) = setup_test_env();

    run_c311(&config_path, &["init"]);
    run_c311(&config_path, &["load"]);

    let records = records_lines(&config_path);
    let rec = &records[0];
    assert_eq!(rec["created_date"], "2023-01-02");
    assert_eq!(rec["complaint_type"], "Noise");
    assert_eq!(rec["incident_zip"], "10001");
    assert_eq!(rec["borough"], "UNKNOWN");
    assert_eq!(rec["descriptor"], "Loud");
    assert_eq!(rec["status"], "Open");
    assert!(rec["closed_date"].is_null());
}

#[test]
fn test_unparsable_date_is_null_not_sentinel() {
    let (_tmp, config_path) = setup_test_env();

    run_c311(&config_path, &["init"]);
    run_c311(&config_path, &["load"]);

    let records = records_lines(&config_path);
    let rec = &records[2];
    assert!(rec["created_date"].is_null());
    assert_eq!(rec["closed_date"], "2023-02-01");
}

#[test]
fn test_records_exclude_identity_field() {
    let (_tmp, config_path) = setup_test_env();

    run_c311(&config_path, &["init"]);
    run_c311(&config_path, &["load"]);

    for rec in records_lines(&config_path) {
        let obj = rec.as_object().unwrap();
        assert_eq!(obj.len(), 7, "expected exactly seven fields, got {:?}", obj);
        assert!(!obj.contains_key("id"));
    }
}

#[test]
fn test_records_empty_before_load() {
    let (_tmp, config_path) = setup_test_env();

    run_c311(&config_path, &["init"]);
    assert!(records_lines(&config_path).is_empty());
}

#[test]
fn test_load_replaces_previous_generation() {
    let (tmp, config_path) = setup_test_env();

    run_c311(&config_path, &["init"]);
    run_c311(&config_path, &["load"]);
    assert_eq!(records_lines(&config_path).len(), 3);

    // Second generation: two different rows, one overlapping zip
    fs::write(
        tmp.path().join("extract.csv"),
        "Created_date,Complaint_type,Incident_zip,Borough,Descriptor,Status,Closed_Date\n\
         02/01/2023,Water,10001,QUEENS,Leak,Open,\n\
         02/02/2023,Sewer,11101,QUEENS,Backup,Open,\n",
    )
    .unwrap();

    let (stdout, _, success) = run_c311(&config_path, &["load"]);
    assert!(success);
    assert!(stdout.contains("records inserted: 2"));

    let records = records_lines(&config_path);
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r["borough"] == "QUEENS"));
    assert!(!records.iter().any(|r| r["complaint_type"] == "Noise"));
}

#[test]
fn test_missing_column_backfilled_for_every_row() {
    let (tmp, config_path) = setup_test_env();

    fs::write(
        tmp.path().join("extract.csv"),
        "Created_date,Complaint_type,Incident_zip,Descriptor,Status,Closed_Date\n\
         01/02/2023,Noise,10001,Loud,Open,\n\
         01/03/2023,Heat,11201,No heat,Closed,01/05/2023\n",
    )
    .unwrap();

    run_c311(&config_path, &["init"]);
    let (stdout, _, success) = run_c311(&config_path, &["load"]);
    assert!(success);
    assert!(stdout.contains("backfilled columns: borough"));

    let records = records_lines(&config_path);
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r["borough"] == "UNKNOWN"));
}

#[test]
fn test_load_limit_caps_rows_read() {
    let (_tmp, config_path) = setup_test_env();

    run_c311(&config_path, &["init"]);
    let (stdout, _, success) = run_c311(&config_path, &["load", "--limit", "1"]);
    assert!(success);
    assert!(stdout.contains("rows read: 1"));
    assert!(stdout.contains("records inserted: 1"));
    assert_eq!(records_lines(&config_path).len(), 1);
}

#[test]
fn test_load_dry_run_touches_nothing() {
    let (tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_c311(&config_path, &["load", "--dry-run"]);
    assert!(success);
    assert!(stdout.contains("dry-run"));
    assert!(stdout.contains("records normalized: 3"));

    let db_path = tmp.path().join("data").join("complaints.sqlite");
    assert!(!db_path.exists(), "dry-run must not create the store");
}

#[test]
fn test_load_extract_override() {
    let (tmp, config_path) = setup_test_env();

    let other = tmp.path().join("other.csv");
    fs::write(
        &other,
        "Created_date,Complaint_type,Incident_zip,Borough,Descriptor,Status,Closed_Date\n\
         03/01/2023,Tree,10301,STATEN ISLAND,Fallen limb,Open,\n",
    )
    .unwrap();

    run_c311(&config_path, &["init"]);
    let (stdout, _, success) = run_c311(
        &config_path,
        &["load", "--extract", other.to_str().unwrap()],
    );
    assert!(success);
    assert!(stdout.contains("records inserted: 1"));

    let records = records_lines(&config_path);
    assert_eq!(records[0]["complaint_type"], "Tree");
}

#[test]
fn test_load_missing_extract_fails_before_store() {
    let (tmp, config_path) = setup_test_env();

    fs::remove_file(tmp.path().join("extract.csv")).unwrap();

    let (_, stderr, success) = run_c311(&config_path, &["load"]);
    assert!(!success, "load with missing extract should fail");
    assert!(
        stderr.contains("extract"),
        "Should name the extract failure, got: {}",
        stderr
    );

    let db_path = tmp.path().join("data").join("complaints.sqlite");
    assert!(
        !db_path.exists(),
        "failed extract read must abort before any store interaction"
    );
}

#[tokio::test]
async fn test_load_twice_leaves_one_index_per_definition() {
    let (tmp, config_path) = setup_test_env();

    run_c311(&config_path, &["init"]);
    let (_, _, first) = run_c311(&config_path, &["load"]);
    assert!(first, "first load failed");
    let (_, _, second) = run_c311(&config_path, &["load"]);
    assert!(second, "second load failed (index creation not idempotent?)");

    let db_path = tmp.path().join("data").join("complaints.sqlite");
    let pool = sqlx::SqlitePool::connect(&format!("sqlite:{}", db_path.display()))
        .await
        .unwrap();
    let names: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'index' AND name LIKE 'idx_complaints_%' ORDER BY name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();
    pool.close().await;

    assert_eq!(
        names,
        vec![
            "idx_complaints_complaint_type",
            "idx_complaints_created_zip",
            "idx_complaints_incident_zip",
        ]
    );
}
