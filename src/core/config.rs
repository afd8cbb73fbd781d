//! Generator manifest handling.
//!
//! Reads the YAML resource kustomize hands to the plugin:
//!
//! ```yaml
//! apiVersion: sopsgen.io/v1beta
//! kind: SOPSGenerator
//! metadata:
//!   name: zero-zero-seven
//!   namespace: test
//! files:
//!   - secret.json
//!   - renamed.yaml=secret.yaml
//! envs:
//!   - secret.env
//! ```
//!
//! Sources are whole-file age payloads unless the manifest sets
//! `cipher: sops`, which hands them to the sops CLI instead.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants::{self, KIND};
use crate::core::generator::{GenerationRequest, Strategy};
use crate::core::secret::{Behavior, GeneratorOptions, ObjectMeta, SecretArgs};
use crate::error::{ConfigError, Result};

/// A `SOPSGenerator` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Secret type, `Opaque` when unset
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub secret_type: Option<String>,
    #[serde(default)]
    pub behavior: Behavior,
    /// `[key=]path` file entries
    #[serde(default)]
    pub files: Vec<String>,
    /// Encrypted dotenv sources
    #[serde(default)]
    pub envs: Vec<String>,
    /// Decryption backend: "age" (default) or "sops".
    ///
    /// age decrypts whole files encrypted with `age`. Documents encrypted
    /// by `sops` need "sops".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cipher: Option<String>,
    #[serde(default)]
    pub strategy: Strategy,
    /// Generator options live at the top level of the manifest
    #[serde(flatten)]
    pub options: GeneratorOptions,
}

impl GeneratorConfig {
    /// Parse a manifest from YAML.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the YAML is malformed, or any error
    /// from [`Self::validate`].
    pub fn from_yaml(contents: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a manifest from disk.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file cannot be read, or any
    /// error from [`Self::from_yaml`].
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading generator config");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&contents)?;

        debug!(
            name = %config.metadata.name,
            files = config.files.len(),
            envs = config.envs.len(),
            "config loaded"
        );
        Ok(config)
    }

    /// Check that the manifest targets this plugin and names its Secret.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnsupportedApiVersion`,
    /// `ConfigError::UnsupportedKind` or `ConfigError::MissingField`.
    pub fn validate(&self) -> Result<()> {
        if !constants::is_supported_api_version(&self.api_version) {
            return Err(ConfigError::UnsupportedApiVersion {
                found: self.api_version.clone(),
                expected: constants::api_version(),
            }
            .into());
        }

        if self.kind != KIND {
            return Err(ConfigError::UnsupportedKind {
                found: self.kind.clone(),
                expected: KIND.to_string(),
            }
            .into());
        }

        if self.metadata.name.is_empty() {
            return Err(ConfigError::MissingField {
                field: "metadata.name",
            }
            .into());
        }

        Ok(())
    }

    /// Build the generation request described by this manifest.
    pub fn request(&self) -> GenerationRequest {
        GenerationRequest {
            args: SecretArgs {
                // Only identity is carried over; the manifest's own labels and
                // annotations belong to the generator resource, not the Secret.
                metadata: ObjectMeta {
                    name: self.metadata.name.clone(),
                    namespace: self.metadata.namespace.clone(),
                    ..Default::default()
                },
                secret_type: self.secret_type.clone(),
                behavior: self.behavior,
                options: self.options.clone(),
            },
            files: self.files.clone(),
            envs: self.envs.clone(),
        }
    }
}
