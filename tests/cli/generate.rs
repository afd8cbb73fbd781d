//! Tests for the default generate action.

use crate::support::*;

#[test]
fn test_generate_standard_manifest() {
    let t = Test::new();
    t.write_standard_fixtures();
    t.write_config(STANDARD_MANIFEST);

    let output = t.generate();
    assert_success(&output);

    let secret = secret(&output);
    assert_eq!(secret.kind, "Secret");
    assert_eq!(secret.metadata.name, "zero-zero-seven");
    for (key, value) in STANDARD_DATA {
        assert_eq!(secret.data.get(*key).map(String::as_str), Some(*value), "key {key}");
    }
    assert_eq!(secret.data.len(), STANDARD_DATA.len());
}

#[test]
fn test_generate_marks_secret_for_hashing() {
    let t = Test::new();
    t.write_standard_fixtures();
    t.write_config(STANDARD_MANIFEST);

    let output = t.generate();
    assert_success(&output);
    assert_stdout_contains(&output, "kustomize.config.k8s.io/needs-hash");
}

#[test]
fn test_generate_json_output() {
    let t = Test::new();
    t.write_standard_fixtures();
    t.write_config(STANDARD_MANIFEST);

    let output = t.generate_with(&["--output", "json"]);
    assert_success(&output);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["apiVersion"], "v1");
    assert_eq!(json["kind"], "Secret");
    assert_eq!(json["type"], "Opaque");
    assert_eq!(json["data"]["HELLO"], "d29ybGQ=");
}

#[test]
fn test_generate_with_inline_key() {
    let t = Test::new();
    t.write_standard_fixtures();
    t.write_config(STANDARD_MANIFEST);

    let output = t
        .cmd()
        .env_remove("SOPS_AGE_KEY_FILE")
        .env("SOPS_AGE_KEY", t.keys())
        .arg("generator.yaml")
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(secret(&output).value("HELLO").unwrap(), b"world");
}

#[test]
fn test_generate_with_default_keys_file() {
    let t = Test::new();
    t.write_standard_fixtures();
    t.write_config(STANDARD_MANIFEST);

    let keys = t.home.path().join(".config/sops/age/keys.txt");
    std::fs::create_dir_all(keys.parent().unwrap()).unwrap();
    std::fs::write(&keys, t.keys()).unwrap();

    let output = t
        .cmd()
        .env_remove("SOPS_AGE_KEY_FILE")
        .arg("generator.yaml")
        .output()
        .unwrap();
    assert_success(&output);
}

#[test]
fn test_generate_nothing_on_stdout_when_failing() {
    let t = Test::new();
    t.write_encrypted("one.txt", "1");
    t.write_foreign("two.txt", "2");
    t.write_config(&manifest("partial", &["one.txt", "two.txt"], &[]));

    let output = t.generate();
    assert_failure(&output);
    assert!(stdout(&output).is_empty());
    assert_stderr_contains(&output, "failed to decrypt two.txt");
}

#[test]
fn test_generate_staged_strategy() {
    let t = Test::new();
    t.write_standard_fixtures();
    t.write_config(&format!("{}strategy: staged\n", STANDARD_MANIFEST));

    let output = t.generate();
    assert_success(&output);
    assert_eq!(secret(&output).data.len(), STANDARD_DATA.len());
}

#[test]
fn test_load_restrictor_flag() {
    let t = Test::new();
    std::fs::create_dir_all(t.path("overlay")).unwrap();
    t.write_encrypted("outside.txt", "secret");
    t.write("overlay/generator.yaml", manifest("escape", &["../outside.txt"], &[]));

    let denied = t
        .cmd()
        .current_dir(t.path("overlay"))
        .arg("generator.yaml")
        .output()
        .unwrap();
    assert_failure(&denied);
    assert_stderr_contains(&denied, "security; file '../outside.txt'");
    assert_stderr_contains(&denied, "--load-restrictor none");

    let allowed = t
        .cmd()
        .current_dir(t.path("overlay"))
        .args(["--load-restrictor", "none", "generator.yaml"])
        .output()
        .unwrap();
    assert_success(&allowed);
    assert_eq!(secret(&allowed).value("outside.txt").unwrap(), b"secret");
}

#[test]
fn test_load_restrictor_env() {
    let t = Test::new();
    std::fs::create_dir_all(t.path("overlay")).unwrap();
    t.write_encrypted("outside.txt", "secret");
    t.write("overlay/generator.yaml", manifest("escape", &["../outside.txt"], &[]));

    let output = t
        .cmd()
        .current_dir(t.path("overlay"))
        .env("SOPSGEN_LOAD_RESTRICTOR", "none")
        .arg("generator.yaml")
        .output()
        .unwrap();
    assert_success(&output);
}

#[test]
fn test_verbose_logs_on_stderr_only() {
    let t = Test::new();
    t.write_standard_fixtures();
    t.write_config(STANDARD_MANIFEST);

    let output = t.generate_with(&["--verbose"]);
    assert_success(&output);
    assert_stderr_contains(&output, "generating secret");
    // stdout must stay a parseable manifest
    let _ = secret(&output);
}

#[test]
fn test_default_no_log_output() {
    let t = Test::new();
    t.write_standard_fixtures();
    t.write_config(STANDARD_MANIFEST);

    let output = t.generate();
    assert_success(&output);
    let err = stderr(&output);
    assert!(!err.contains("DEBUG") && !err.contains("INFO"), "unexpected logs: {err}");
}

#[test]
fn test_json_log_format() {
    let t = Test::new();
    t.write_standard_fixtures();
    t.write_config(STANDARD_MANIFEST);

    let output = t
        .cmd()
        .env("SOPSGEN_LOG", "sopsgen=info")
        .env("SOPSGEN_LOG_FORMAT", "json")
        .arg("generator.yaml")
        .output()
        .unwrap();
    assert_success(&output);

    let line = stderr(&output)
        .lines()
        .find(|l| l.contains("generating secret"))
        .map(str::to_string)
        .expect("no generation log line");
    let record: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(record["level"], "INFO");
}

#[test]
fn test_generate_legacy_api_version() {
    let t = Test::new();
    t.write_standard_fixtures();
    t.write_config(&STANDARD_MANIFEST.replace("sopsgen.io/v1beta", "omninonsense.github.io/v1beta"));

    let output = t.generate();
    assert_success(&output);
    assert_eq!(secret(&output).data.len(), STANDARD_DATA.len());
}

#[test]
fn test_generate_dotfile_entry() {
    let t = Test::new();
    t.write_encrypted("config/.env", "A=1\n");
    t.write_config(&manifest("dot", &["config/.env"], &[]));

    let output = t.generate();
    assert_success(&output);
    assert_eq!(secret(&output).value(".env").unwrap(), b"A=1\n");
}
