use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;

use tempfile::TempDir;

fn firesheet_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("firesheet"));
    cmd.env("HOME", home).env("USERPROFILE", home);
    cmd.env_remove("FIRESHEET_TOKEN");
    cmd
}

#[test]
fn help_lists_both_entry_points() {
    let home = TempDir::new().expect("home");
    firesheet_cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("sync"))
        .stdout(contains("handle"));
}

#[test]
fn sync_without_config_reports_a_readable_error() {
    let home = TempDir::new().expect("home");
    firesheet_cmd(home.path())
        .arg("sync")
        .assert()
        .failure()
        .stderr(contains("config"));
}

#[test]
fn sync_with_explicit_missing_config_names_the_path() {
    let home = TempDir::new().expect("home");
    let path = home.path().join("nope.yaml");
    firesheet_cmd(home.path())
        .args(["sync", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(contains("nope.yaml"));
}

#[test]
fn sync_without_token_fails_before_any_network_call() {
    let home = TempDir::new().expect("home");
    let config_path = home.path().join("config.yaml");
    std::fs::write(
        &config_path,
        "spreadsheet_id: doc\nsheet_name: Incidents\napi_base_url: https://incidents.invalid/api\n",
    )
    .expect("write config");

    firesheet_cmd(home.path())
        .args(["sync", "--config"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(contains("access token"));
}

#[test]
fn handle_folds_setup_failures_into_a_500_response() {
    let home = TempDir::new().expect("home");
    let assert = firesheet_cmd(home.path()).arg("handle").assert().success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("stdout utf8");
    let response: serde_json::Value = serde_json::from_str(stdout.trim()).expect("json response");
    assert_eq!(response["statusCode"], 500);
    assert!(response["body"]
        .as_str()
        .expect("body string")
        .starts_with("Error:"));
}
