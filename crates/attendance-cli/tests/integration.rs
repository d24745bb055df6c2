#![allow(deprecated)]
use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use tempfile::TempDir;

fn admin(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("attendance-admin").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("ATTENDANCE_CONFIG")
        .env_remove("ATTENDANCE_BASE_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn admin_against(dir: &TempDir, server: &Server) -> Command {
    let mut cmd = admin(dir);
    cmd.args(["--base-url", &server.url()]);
    cmd
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn missing_required_field_warns_without_request() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/api/admin/system/teacher/remove")
        .expect(0)
        .create();

    admin_against(&dir, &server)
        .args(["--yes", "teacher", "remove", "--search", "T-104"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Please fill in all required fields (missing: reason)",
        ))
        .stderr(predicate::str::contains("remove_teacher failed (validation)"));

    mock.assert();
}

#[test]
fn password_mismatch_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/api/admin/system/admin/update")
        .expect(0)
        .create();

    admin_against(&dir, &server)
        .args([
            "admin",
            "update",
            "--new-password",
            "hunter22",
            "--confirm-password",
            "hunter23",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Passwords do not match"));

    mock.assert();
}

// ---------------------------------------------------------------------------
// Confirmation
// ---------------------------------------------------------------------------

#[test]
fn declined_remove_sends_nothing() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/api/admin/system/teacher/remove")
        .expect(0)
        .create();

    admin_against(&dir, &server)
        .args(["teacher", "remove", "--search", "T-104", "--reason", "resigned"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Are you sure"))
        .stderr(predicate::str::contains("Cancelled."));

    mock.assert();
}

#[test]
fn confirmed_remove_posts_form() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/api/admin/system/teacher/remove")
        .match_body(Matcher::Json(serde_json::json!({
            "search": "T-104",
            "reason": "resigned",
            "reasonText": "",
        })))
        .with_status(200)
        .with_body(r#"{"message":"ok"}"#)
        .create();

    admin_against(&dir, &server)
        .args(["teacher", "remove", "--search", "T-104", "--reason", "resigned"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Teacher removed successfully"));

    mock.assert();
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

#[test]
fn fetch_students_empty_shows_placeholder() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    server
        .mock("GET", "/api/admin/system/student/fetch")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("branch".into(), "CS".into()),
            Matcher::UrlEncoded("year".into(), "2".into()),
            Matcher::UrlEncoded("division".into(), "A".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"students": []}"#)
        .create();

    admin_against(&dir, &server)
        .args([
            "student", "fetch", "--branch", "CS", "--year", "2", "--division", "A",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No students found for the selected criteria.",
        ));
}

#[test]
fn fetch_students_prints_table() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    server
        .mock("GET", "/api/admin/system/student/fetch")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"students": [
                {"id":"s1","name":"Ravi","email":"ravi@x.edu","studentId":"S-1","totalAttendance":82.4}
            ]}"#,
        )
        .create();

    admin_against(&dir, &server)
        .args([
            "student", "fetch", "--branch", "IT", "--year", "1", "--division", "B",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("ATTENDANCE"))
        .stdout(predicate::str::contains("ravi@x.edu | S-1"))
        .stdout(predicate::str::contains("82.4%"));
}

#[test]
fn search_teacher_not_found_fails() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    server
        .mock("GET", "/api/admin/system/teacher/search")
        .match_query(Matcher::UrlEncoded("query".into(), "nobody".into()))
        .with_status(404)
        .with_body(r#"{"error":"Teacher not found"}"#)
        .create();

    admin_against(&dir, &server)
        .args(["teacher", "search", "nobody"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("✗ Teacher not found"))
        .stderr(predicate::str::contains("search_teacher failed (server)"));
}

#[test]
fn search_teacher_json_output() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    server
        .mock("GET", "/api/admin/system/teacher/search")
        .match_query(Matcher::UrlEncoded("query".into(), "T-7".into()))
        .with_status(200)
        .with_body(r#"{"teacher":{"id":"t7","name":"Meera","email":"meera@x.edu"}}"#)
        .create();

    let output = admin_against(&dir, &server)
        .args(["--json", "teacher", "search", "T-7"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["action"], "search_teacher");
    assert_eq!(value["outcome"], "completed");
    assert_eq!(value["status"], 200);
    assert_eq!(value["view"]["name"], "Meera");
    assert_eq!(value["notification"]["severity"], "success");
}

#[test]
fn generic_run_accepts_raw_fields() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/api/admin/system/teacher/add-bluetooth")
        .match_body(Matcher::Json(serde_json::json!({
            "teacherId": "t1",
            "bluetoothId": "AA:BB:CC",
        })))
        .with_status(200)
        .with_body("{}")
        .create();
    server
        .mock("GET", "/api/admin/system/teacher/missing-bluetooth")
        .with_status(200)
        .with_body(r#"{"teachers": []}"#)
        .create();

    admin_against(&dir, &server)
        .args([
            "run",
            "assign-device",
            "-f",
            "teacherId=t1",
            "-f",
            "bluetoothId=AA:BB:CC",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("All teachers have Bluetooth IDs assigned."))
        .stdout(predicate::str::contains("✓ Bluetooth ID added successfully"));

    mock.assert();
}

#[test]
fn unreachable_server_reports_network_error() {
    let dir = TempDir::new().unwrap();
    admin(&dir)
        .args(["--base-url", "http://127.0.0.1:1", "branches"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Network error occurred"));
}

#[test]
fn unknown_action_is_rejected() {
    let dir = TempDir::new().unwrap();
    admin(&dir)
        .args(["run", "launch_rockets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown action 'launch_rockets'"));
}

#[test]
fn actions_lists_every_action() {
    let dir = TempDir::new().unwrap();
    admin(&dir)
        .arg("actions")
        .assert()
        .success()
        .stdout(predicate::str::contains("update_admin"))
        .stdout(predicate::str::contains("/teacher/missing-bluetooth"))
        .stdout(predicate::str::contains("list_branches"));
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn config_show_reads_local_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("attendance-admin.yaml"),
        "base_url: http://campus.example:8080\n",
    )
    .unwrap();

    admin(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://campus.example:8080"))
        .stdout(predicate::str::contains("/api/admin/system"));
}

#[test]
fn config_validate_flags_bad_scheme() {
    let dir = TempDir::new().unwrap();
    admin(&dir)
        .args(["--base-url", "ftp://campus.example", "config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[error] base_url"))
        .stderr(predicate::str::contains("config validation found errors"));
}

#[test]
fn config_validate_defaults_are_clean() {
    let dir = TempDir::new().unwrap();
    admin(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid"));
}
