//! Tests for the plugin installation helpers.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_kind() {
    let t = Test::new();

    t.cmd()
        .arg("kind")
        .assert()
        .success()
        .stdout(predicate::eq("SOPSGenerator\n"));
}

#[test]
fn test_subcommand_rejects_config() {
    let t = Test::new();

    t.cmd()
        .args(["kind", "generator.yaml"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_subdir() {
    let t = Test::new();

    let output = t.cmd().arg("subdir").output().unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output), "sopsgen.io/v1beta/sopsgenerator\n");
}

#[test]
fn test_plugin_home_from_env() {
    let t = Test::new();
    let home = t.path("plugins");
    std::fs::create_dir_all(&home).unwrap();

    let output = t
        .cmd()
        .env("KUSTOMIZE_PLUGIN_HOME", &home)
        .arg("plugin-home")
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), home.canonicalize().unwrap().display().to_string());
}

#[test]
fn test_plugin_home_from_xdg_config() {
    let t = Test::new();
    let home = t.home.path().join(".config/kustomize/plugin");
    std::fs::create_dir_all(&home).unwrap();

    let output = t.cmd().arg("plugin-home").output().unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), home.canonicalize().unwrap().display().to_string());
}

#[test]
fn test_plugin_home_from_home_dir() {
    let t = Test::new();
    let home = t.home.path().join("kustomize/plugin");
    std::fs::create_dir_all(&home).unwrap();

    let output = t.cmd().arg("plugin-home").output().unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), home.canonicalize().unwrap().display().to_string());
}

#[test]
fn test_plugin_home_missing() {
    let t = Test::new();

    t.cmd()
        .arg("plugin-home")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no kustomize plugin home found"))
        .stderr(predicate::str::contains("KUSTOMIZE_PLUGIN_HOME"));
}
