//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;

fn qr_audio_bin() -> Command {
    Command::cargo_bin("qr-audio").expect("binary should build")
}

#[test]
fn help_output() {
    qr_audio_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("QR codes"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("scan"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn version_output() {
    qr_audio_bin()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("qr-audio"));
}

#[test]
fn requires_a_subcommand() {
    qr_audio_bin().assert().failure();
}

#[test]
fn config_help() {
    qr_audio_bin()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("set"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("path"));
}

#[test]
fn config_path_command() {
    qr_audio_bin()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("qr-audio"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_set_rejects_unknown_key() {
    qr_audio_bin()
        .args(["config", "set", "bogus_key", "value"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown key"));
}

#[test]
fn create_rejects_invalid_duration() {
    qr_audio_bin()
        .args(["create", "--duration", "invalid"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn create_rejects_file_with_duration() {
    qr_audio_bin()
        .args(["create", "--file", "clip.wav", "--duration", "30s"])
        .assert()
        .failure();
}

#[test]
fn play_unknown_id_fails_with_message() {
    qr_audio_bin()
        .args(["play", "zz-test-does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No message with id"));
}

#[test]
fn delete_unknown_id_is_a_noop() {
    qr_audio_bin()
        .args(["delete", "zz-test-does-not-exist", "--yes"])
        .assert()
        .success()
        .stderr(predicate::str::contains("nothing to delete"));
}

#[test]
fn export_unknown_id_fails() {
    qr_audio_bin()
        .args(["export", "zz-test-does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No message with id"));
}
