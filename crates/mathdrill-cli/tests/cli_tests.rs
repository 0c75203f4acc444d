//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Run inside an empty directory with an empty HOME so no stray config
/// file or environment override is picked up.
fn mathdrill(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("mathdrill").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("MATHDRILL_DEFAULT_DIFFICULTY")
        .env_remove("MATHDRILL_ALLOWED_ORIGINS");
    cmd
}

#[test]
fn next_prints_fraction_instance_by_default() {
    let dir = TempDir::new().unwrap();
    mathdrill(&dir)
        .arg("next")
        .arg("--seed")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"template_id\": \"math_frac_compare_v1\""))
        .stdout(predicate::str::contains("\"difficulty\": \"normal\""));
}

#[test]
fn next_gcd_with_level_alias() {
    let dir = TempDir::new().unwrap();
    mathdrill(&dir)
        .args(["next", "--unit", "gcd", "--level", "3", "--seed", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("math_gcd_v1"))
        .stdout(predicate::str::contains("\"difficulty\": \"hard\""));
}

#[test]
fn grade_from_stdin() {
    let dir = TempDir::new().unwrap();
    mathdrill(&dir)
        .arg("grade")
        .write_stdin(r#"{"template_id":"math_gcd_v1","answer":"6","payload":{"X":48,"Y":18}}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"correct\": true"))
        .stdout(predicate::str::contains("\"ground_truth\": \"6\""));
}

#[test]
fn grade_leading_zero_is_wrong_but_not_an_error() {
    let dir = TempDir::new().unwrap();
    mathdrill(&dir)
        .arg("grade")
        .write_stdin(r#"{"template_id":"math_gcd_v1","answer":"06","payload":{"X":48,"Y":18}}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"correct\": false"));
}

#[test]
fn grade_from_file_rejects_invalid_body() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("body.json");
    std::fs::write(
        &path,
        r#"{"template_id":"math_frac_compare_v1","answer":">","payload":{"A":3,"B":4,"C":1}}"#,
    )
    .unwrap();

    mathdrill(&dir)
        .arg("grade")
        .arg("--body")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("payload.D"))
        .stderr(predicate::str::contains("invalid-input"));
}

#[test]
fn grade_unknown_template() {
    let dir = TempDir::new().unwrap();
    mathdrill(&dir)
        .arg("grade")
        .write_stdin(r#"{"template_id":"unknown_template","answer":">","payload":{"A":3,"B":4,"C":1,"D":2}}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown-template"));
}

#[test]
fn validate_grade_request_reports_paths() {
    let dir = TempDir::new().unwrap();
    mathdrill(&dir)
        .args(["validate", "--kind", "grade"])
        .write_stdin(r#"{"answer":">","payload":{"A":3,"B":4,"C":1,"D":2},"extra":1}"#)
        .assert()
        .failure()
        .stdout(predicate::str::contains("template_id: is required"))
        .stdout(predicate::str::contains("extra: is not an allowed field"));
}

#[test]
fn validate_instance_from_next() {
    let dir = TempDir::new().unwrap();
    let output = mathdrill(&dir)
        .args(["next", "--unit", "gcd", "--seed", "3"])
        .output()
        .unwrap();
    assert!(output.status.success());

    mathdrill(&dir)
        .args(["validate", "--kind", "instance"])
        .write_stdin(output.stdout)
        .assert()
        .success()
        .stdout(predicate::str::contains("Valid."));
}

#[test]
fn next_then_grade_round_trip() {
    let dir = TempDir::new().unwrap();
    let output = mathdrill(&dir)
        .args(["next", "--unit", "fraction", "--seed", "4"])
        .output()
        .unwrap();
    let instance: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    let p = &instance["payload"];
    let lhs = p["A"].as_i64().unwrap() * p["D"].as_i64().unwrap();
    let rhs = p["C"].as_i64().unwrap() * p["B"].as_i64().unwrap();
    let answer = if lhs > rhs { ">" } else if lhs < rhs { "<" } else { "=" };

    let body = serde_json::json!({
        "template_id": instance["template_id"],
        "answer": answer,
        "payload": instance["payload"],
    });
    mathdrill(&dir)
        .arg("grade")
        .write_stdin(body.to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"correct\": true"));
}

#[test]
fn tiers_shows_table() {
    let dir = TempDir::new().unwrap();
    mathdrill(&dir)
        .arg("tiers")
        .assert()
        .success()
        .stdout(predicate::str::contains("gcd operand"))
        .stdout(predicate::str::contains("[10, 120]"));
}

#[test]
fn tiers_reads_config_override() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("mathdrill.toml"),
        "[tiers.gcd.hard]\noperand = [20, 200]\n",
    )
    .unwrap();
    mathdrill(&dir)
        .arg("tiers")
        .assert()
        .success()
        .stdout(predicate::str::contains("[20, 200]"));
}

#[test]
fn bad_config_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("mathdrill.toml"),
        "[tiers.fraction.easy]\nnumerator = [1, 7]\ndenominator = [0, 8]\n",
    )
    .unwrap();
    mathdrill(&dir)
        .arg("next")
        .assert()
        .failure()
        .stderr(predicate::str::contains("fraction.easy.denominator"));
}

#[test]
fn practice_session_scores_answers() {
    let dir = TempDir::new().unwrap();
    mathdrill(&dir)
        .args(["practice", "--unit", "gcd", "--count", "2", "--seed", "9"])
        .write_stdin("not a number\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[1/2]"))
        .stdout(predicate::str::contains("Not quite."))
        .stdout(predicate::str::contains("Score: 0/1 correct"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    mathdrill(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created mathdrill.toml"));
    assert!(dir.path().join("mathdrill.toml").exists());

    // The starter config must load cleanly.
    mathdrill(&dir).arg("tiers").assert().success();

    mathdrill(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    mathdrill(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Math practice problems"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    mathdrill(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mathdrill"));
}
