//! Tests for error handling and CLI flags.

use crate::support::*;

#[test]
fn test_help() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "Usage");
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "sopsgen");
}

#[test]
fn test_config_required() {
    let t = Test::new();

    let output = t.cmd().output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_missing_config_file() {
    let t = Test::new();

    let output = t.generate();
    assert_failure(&output);
    assert_stderr_contains(&output, "generator.yaml");
}

#[test]
fn test_wrong_kind() {
    let t = Test::new();
    t.write_config("apiVersion: sopsgen.io/v1beta\nkind: SecretGenerator\nmetadata:\n  name: x\n");

    let output = t.generate();
    assert_failure(&output);
    assert_stderr_contains(&output, "SecretGenerator");
}

#[test]
fn test_wrong_api_version() {
    let t = Test::new();
    t.write_config("apiVersion: example.com/v1\nkind: SOPSGenerator\nmetadata:\n  name: x\n");

    let output = t.generate();
    assert_failure(&output);
    assert_stderr_contains(&output, "example.com/v1");
}

#[test]
fn test_no_identity_hint() {
    let t = Test::new();
    t.write_standard_fixtures();
    t.write_config(STANDARD_MANIFEST);

    let output = t.cmd().env_remove("SOPS_AGE_KEY_FILE").arg("generator.yaml").output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "no age identity found");
    assert_stderr_contains(&output, "SOPS_AGE_KEY_FILE");
}

#[test]
fn test_unknown_cipher() {
    let t = Test::new();
    t.write_config(&format!("{}cipher: rot13\n", manifest("x", &[], &[])));

    let output = t.generate();
    assert_failure(&output);
    assert_stderr_contains(&output, "unknown cipher: rot13");
}

#[test]
fn test_missing_key_name() {
    let t = Test::new();
    t.write_config(&manifest("x", &["=secret.json"], &[]));

    let output = t.generate();
    assert_failure(&output);
    assert_stderr_contains(&output, "key name for file secret.json missing");
}

#[test]
fn test_ambiguous_entry() {
    let t = Test::new();
    t.write_config(&manifest("x", &["a=b=c"], &[]));

    let output = t.generate();
    assert_failure(&output);
    assert_stderr_contains(&output, "ambiguous");
}

#[test]
fn test_invalid_env_line_reports_source() {
    let t = Test::new();
    t.write_encrypted("bad.env", "OK=1\nnot a line\n");
    t.write_config(&manifest("x", &[], &["bad.env"]));

    let output = t.generate();
    assert_failure(&output);
    assert_stderr_contains(&output, "bad.env: line 1");
}

#[test]
fn test_sops_document_with_default_cipher_hints() {
    let t = Test::new();
    t.write(
        "secret.yaml",
        "hello: ENC[AES256_GCM,data:abc,iv:def,tag:ghi,type:str]\nsops:\n    version: 3.8.1\n",
    );
    t.write_config(&manifest("x", &["secret.yaml"], &[]));

    let output = t.generate();
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to decrypt secret.yaml with age");
    assert_stderr_contains(&output, "cipher: sops");
}
