use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn ptimer(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ptimer").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_calc_json_contract() {
    let home = TempDir::new().unwrap();

    let output = ptimer(&home)
        .args([
            "calc",
            "--start",
            "2020-01-01T00:00:00Z",
            "--days",
            "2",
            "--potions",
            "1",
            "--format",
            "json",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["effective_ms"], 136_800_000);
    assert_eq!(json["reduction_ms"], 36_000_000);
    assert_eq!(json["potions"], 1);
    assert_eq!(json["nominal"]["days"], 2);
    assert_eq!(json["target"], "2020-01-02T14:00:00Z");
    // Started long ago, so already done
    assert_eq!(json["completed"], true);
    assert_eq!(json["text"], "Completed!");
}

#[test]
fn test_calc_text_from_now() {
    let home = TempDir::new().unwrap();

    ptimer(&home)
        .args(["calc", "--start", "now", "--days", "3", "--potions", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Duration:  3d 0h 0m (0 potion(s))"))
        .stdout(predicate::str::contains(
            "3 day(s) 0 hour(s) 0 minute(s) remaining",
        ));
}

#[test]
fn test_calc_missing_start_fails_validation() {
    let home = TempDir::new().unwrap();

    ptimer(&home)
        .args(["calc", "--days", "1", "--potions", "0"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("remaining").not())
        .stderr(predicate::str::contains("Missing required input: start time"));
}

#[test]
fn test_calc_rejects_negative_duration() {
    let home = TempDir::new().unwrap();

    ptimer(&home)
        .args(["calc", "--start", "now", "--hours", "-2", "--potions", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("hours must not be negative"));
}

#[test]
fn test_zero_potions_unset_policy_from_config() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join(".potion-timer");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[speedup]\nzero_means_unset = true\n",
    )
    .unwrap();

    ptimer(&home)
        .args(["calc", "--start", "now", "--days", "1", "--potions", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("potion count"));
}

#[test]
fn test_env_override_reduction() {
    let home = TempDir::new().unwrap();

    let output = ptimer(&home)
        .env("PTIMER__SPEEDUP__REDUCTION_PER_ITEM_HOURS", "1")
        .args([
            "calc",
            "--start",
            "2020-01-01T00:00:00Z",
            "--hours",
            "5",
            "--potions",
            "2",
            "--format",
            "json",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["effective_ms"], 3 * 60 * 60 * 1000);
}

#[test]
fn test_config_get() {
    let home = TempDir::new().unwrap();

    ptimer(&home)
        .args(["config", "get", "countdown.completed_message"])
        .assert()
        .success()
        .stdout("Completed!\n");
}

#[test]
fn test_watch_completes_immediately_when_clamped() {
    let home = TempDir::new().unwrap();

    ptimer(&home)
        .args(["watch", "--start", "now", "--hours", "5", "--potions", "1"])
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed!"));
}

#[test]
fn test_watch_counts_down_to_completion() {
    let home = TempDir::new().unwrap();

    // One minute, started 58 seconds ago: done within a few ticks.
    let start = (chrono::Utc::now() - chrono::Duration::seconds(58)).to_rfc3339();
    ptimer(&home)
        .args(["watch", "--start", &start, "--minutes", "1", "--potions", "0"])
        .timeout(std::time::Duration::from_secs(15))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "0 day(s) 0 hour(s) 0 minute(s) remaining",
        ))
        .stdout(predicate::str::contains("Completed!"));
}
