use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn top_level_help_lists_commands() {
    let mut cmd = cargo_bin_cmd!("partfinderctl");
    let output = cmd.arg("--help").assert().success().get_output().stdout.clone();
    let text = String::from_utf8_lossy(&output);
    for command in ["brands", "categories", "models", "years", "search", "upload"] {
        assert!(text.contains(command), "help missing '{command}'");
    }
    assert!(text.contains("--base-url"), "help missing --base-url");
}

#[test]
fn search_help_documents_filters() {
    let mut cmd = cargo_bin_cmd!("partfinderctl");
    let output = cmd
        .arg("search")
        .arg("--help")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&output);
    for flag in ["--brand", "--model", "--year", "--category", "--page"] {
        assert!(text.contains(flag), "search help missing {flag}");
    }
}

#[test]
fn model_filter_requires_brand() {
    let mut cmd = cargo_bin_cmd!("partfinderctl");
    cmd.arg("search")
        .arg("--model")
        .arg("250 SX")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--brand"));
}

#[test]
fn missing_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("partfinderctl");
    cmd.current_dir(dir.path())
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg("brands")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}
