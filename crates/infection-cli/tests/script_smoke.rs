use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn infection_odds() -> Command {
    let mut cmd = Command::cargo_bin("infection-odds").expect("binary built");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn script_file_replays_epidemic_and_prints_table() {
    let dir = tempdir().expect("temp dir");
    let script = dir.path().join("session.txt");
    fs::write(
        &script,
        "draw Atlanta\nepidemic\nselect Denver\n# new round\ndraw Denver\n",
    )
    .expect("write script");

    infection_odds()
        .arg("--script")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("round R2 opened"))
        .stdout(predicate::str::contains("mode: tracking | open round: R2"));
}

#[test]
fn stdin_commands_with_json_report() {
    infection_odds()
        .arg("--json")
        .write_stdin("draw \"New York\"\nundraw Cairo\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("refused: Cairo"))
        .stdout(predicate::str::contains("\"deck_total\": 39"))
        .stdout(predicate::str::contains("\"mode\": \"tracking\""));
}

#[test]
fn config_roster_replaces_standard_deck() {
    let dir = tempdir().expect("temp dir");
    let config = dir.path().join("tracker.yaml");
    fs::write(
        &config,
        "roster:\n  - name: Lima\n    total: 3\n  - name: Paris\n    total: 1\n",
    )
    .expect("write config");

    infection_odds()
        .arg("--config")
        .arg(&config)
        .write_stdin("draw Lima\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Paris"))
        .stdout(predicate::str::contains("Atlanta").not())
        .stdout(predicate::str::contains("66.7%"));
}

#[test]
fn structured_logging_writes_json_lines() {
    let dir = tempdir().expect("temp dir");
    let log_file = dir.path().join("logs").join("session.jsonl");
    let config = dir.path().join("tracker.yaml");
    fs::write(
        &config,
        format!(
            "logging:\n  enable_structured: true\n  tracing_level: debug\n  log_file: \"{}\"\n",
            log_file.display()
        ),
    )
    .expect("write config");

    infection_odds()
        .arg("--config")
        .arg(&config)
        .write_stdin("epidemic\nselect Denver\n")
        .assert()
        .success();

    let logs = fs::read_to_string(&log_file).expect("log file written");
    assert!(logs.contains("session started"));
    assert!(logs.contains("Pandemic Calculator"));
    assert!(logs.contains("select_epidemic_city"));
}

#[test]
fn invalid_config_fails_with_field_name() {
    let dir = tempdir().expect("temp dir");
    let config = dir.path().join("tracker.yaml");
    fs::write(&config, "roster:\n  - name: \"\"\n    total: 1\n").expect("write config");

    infection_odds()
        .arg("--config")
        .arg(&config)
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("roster[0].name"));
}
