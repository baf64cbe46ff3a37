//! Integration tests for the demo binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn configkit(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("configkit"));
    cmd.current_dir(dir.path())
        .env_remove("CONFIGKIT_CONFIG")
        .env_remove("CONFIGKIT_PORT")
        .env_remove("CONFIGKIT_DB_URL");
    cmd
}

#[test]
fn test_cli_version() {
    let dir = TempDir::new().expect("tmp");
    configkit(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_version_ignores_missing_config() {
    let dir = TempDir::new().expect("tmp");
    configkit(&dir).args(["-v", "--config", "nonexistent.yaml"]).assert().success();
}

#[test]
fn test_cli_help() {
    let dir = TempDir::new().expect("tmp");
    configkit(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("CONFIGKIT_* environment overrides"))
        .stdout(predicate::str::contains("--config <PATH>"))
        .stdout(predicate::str::contains("--version"));
}

#[test]
fn test_cli_missing_default_config_fails() {
    let dir = TempDir::new().expect("tmp");
    configkit(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn test_cli_rejects_unknown_flag() {
    let dir = TempDir::new().expect("tmp");
    configkit(&dir)
        .arg("--no-such-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse command line arguments"));
}

#[test]
fn test_cli_loads_default_config() {
    let dir = TempDir::new().expect("tmp");
    fs::write(dir.path().join("config.yaml"), "port: 9000\ndb:\n  url: postgres://file\n")
        .expect("write config");

    configkit(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("port: 9000"))
        .stdout(predicate::str::contains("log_level: info"))
        .stdout(predicate::str::contains("url: postgres://file"))
        .stdout(predicate::str::contains("pool_size: 4"));
}

#[test]
fn test_cli_env_and_flag_precedence() {
    let dir = TempDir::new().expect("tmp");
    fs::write(dir.path().join("config.yaml"), "port: 9000\n").expect("write default");
    fs::write(dir.path().join("env.json"), r#"{"port": 9100, "log_level": "warn"}"#)
        .expect("write env config");
    fs::write(dir.path().join("flag.toml"), "port = 9200\n").expect("write flag config");

    configkit(&dir)
        .env("CONFIGKIT_CONFIG", "env.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("port: 9100"))
        .stdout(predicate::str::contains("log_level: warn"));

    configkit(&dir)
        .env("CONFIGKIT_CONFIG", "env.json")
        .args(["-c", "flag.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("port: 9200"));

    configkit(&dir)
        .env("CONFIGKIT_PORT", "7070")
        .env("CONFIGKIT_DB_URL", "postgres://env")
        .assert()
        .success()
        .stdout(predicate::str::contains("port: 7070"))
        .stdout(predicate::str::contains("url: postgres://env"));
}
