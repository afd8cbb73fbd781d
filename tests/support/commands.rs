//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a sopsgen command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - HOME and XDG_CONFIG_HOME inside the temporary home directory
    /// - SOPS_AGE_KEY_FILE pointing at this environment's keys file
    /// - Current directory set to the kustomization directory
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("sopsgen").expect("failed to find sopsgen binary");
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("XDG_CONFIG_HOME", self.home.path().join(".config"));
        cmd.env("SOPS_AGE_KEY_FILE", self.keys_file());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("SOPS_AGE_KEY");
        cmd.env_remove("SOPSGEN_LOG");
        cmd.env_remove("SOPSGEN_LOAD_RESTRICTOR");
        cmd.env_remove("KUSTOMIZE_PLUGIN_HOME");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Run the generator against `generator.yaml`.
    pub fn generate(&self) -> Output {
        self.cmd()
            .arg("generator.yaml")
            .output()
            .expect("failed to run sopsgen")
    }

    /// Run the generator with extra arguments before the manifest path.
    pub fn generate_with(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(args)
            .arg("generator.yaml")
            .output()
            .expect("failed to run sopsgen")
    }
}
