use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("docqa")
        .env("DOCQA_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    assert!(!config_path.exists());

    cargo_bin_cmd!("docqa")
        .env("DOCQA_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("base_url ="));
    assert!(contents.contains("stale_responses ="));
    assert!(contents.contains("# level ="));
}

#[test]
fn test_config_init_fails_if_exists() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    fs::write(&config_path, "# existing config").unwrap();

    cargo_bin_cmd!("docqa")
        .env("DOCQA_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_path_ignores_broken_config() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "[server\nbroken").unwrap();

    cargo_bin_cmd!("docqa")
        .env("DOCQA_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success();
}

#[test]
fn test_config_show_applies_overrides() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[server]\nbase_url = \"http://files.example:9000\"\n\n[session]\nstale_responses = \"drop\"\n",
    )
    .unwrap();

    cargo_bin_cmd!("docqa")
        .env("DOCQA_HOME", dir.path())
        .env_remove("DOCQA_SERVER_URL")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://files.example:9000"))
        .stdout(predicate::str::contains("stale_responses = \"drop\""));

    cargo_bin_cmd!("docqa")
        .env("DOCQA_HOME", dir.path())
        .args(["--server", "http://override:1234", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://override:1234"));
}
