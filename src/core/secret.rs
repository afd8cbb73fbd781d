//! Secret resource assembly.
//!
//! Turns resolved key/value material into a Kubernetes `v1/Secret`. The
//! builder accepts either literal pairs or a [`Loader`] plus the entries
//! to read through it, in which case it does its own dotenv handling.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants::{
    BEHAVIOR_ANNOTATION, DEFAULT_SECRET_TYPE, NEEDS_HASH_ANNOTATION,
};
use crate::core::dotenv;
use crate::core::entry::EntrySpec;
use crate::core::loader::Loader;
use crate::core::types::KvPair;
use crate::core::validation::Validator;
use crate::error::{Error, Result, SecretError};

/// How a generated resource combines with one of the same name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Behavior {
    #[default]
    Create,
    Merge,
    Replace,
}

impl Behavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Merge => "merge",
            Self::Replace => "replace",
        }
    }
}

/// Resource metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

/// Options applied to every generated resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorOptions {
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
    #[serde(default)]
    pub disable_name_suffix_hash: bool,
    #[serde(default)]
    pub immutable: bool,
}

/// Everything about the Secret except its data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretArgs {
    pub metadata: ObjectMeta,
    /// Secret type, `Opaque` when unset
    pub secret_type: Option<String>,
    pub behavior: Behavior,
    pub options: GeneratorOptions,
}

/// A Kubernetes `v1/Secret`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    #[serde(rename = "type")]
    pub secret_type: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub immutable: bool,
    /// Base64-encoded values by key
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

impl Secret {
    /// Decoded value of `key`.
    pub fn value(&self, key: &str) -> Option<Vec<u8>> {
        self.data.get(key).and_then(|v| STANDARD.decode(v).ok())
    }

    /// Render as a YAML document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Serialize` if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| crate::error::ConfigError::Serialize(e.to_string()).into())
    }

    /// Render as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Serialize` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| crate::error::ConfigError::Serialize(e.to_string()).into())
    }
}

/// Builds Secrets from resolved key/value material.
pub struct SecretFactory<'a> {
    validator: &'a dyn Validator,
}

impl<'a> SecretFactory<'a> {
    pub fn new(validator: &'a dyn Validator) -> Self {
        Self { validator }
    }

    /// Build from literal pairs, in order.
    ///
    /// # Errors
    ///
    /// Returns `SecretError` on a missing name, an invalid key or a key
    /// given twice.
    pub fn from_literals(&self, args: &SecretArgs, pairs: Vec<KvPair>) -> Result<Secret> {
        let mut data = DataBuilder::new(self.validator);
        for pair in pairs {
            data.add(pair)?;
        }
        self.finish(args, data)
    }

    /// Build by reading file and env entries through `loader`.
    ///
    /// File entries become one key each; env entries are parsed as dotenv.
    /// A name appearing twice anywhere is an error, including across env
    /// sources.
    ///
    /// # Errors
    ///
    /// Returns the loader's error, `Error::Dotenv` for malformed env
    /// content, or `SecretError` as in [`Self::from_literals`].
    pub fn from_loader(
        &self,
        args: &SecretArgs,
        loader: &dyn Loader,
        files: &[EntrySpec],
        envs: &[String],
    ) -> Result<Secret> {
        let mut data = DataBuilder::new(self.validator);

        for entry in files {
            let content = loader.load(&entry.path)?;
            data.add(KvPair::new(entry.key.clone(), content))?;
        }

        for path in envs {
            let content = loader.load(path)?;
            let vars = dotenv::parse(&content, self.validator).map_err(|source| Error::Dotenv {
                path: path.clone(),
                source,
            })?;
            for (name, value) in vars {
                data.add(KvPair::new(name, value))?;
            }
        }

        self.finish(args, data)
    }

    fn finish(&self, args: &SecretArgs, data: DataBuilder<'_>) -> Result<Secret> {
        if args.metadata.name.is_empty() {
            return Err(SecretError::MissingName.into());
        }

        let mut metadata = args.metadata.clone();
        metadata.labels.extend(args.options.labels.clone());
        metadata.annotations.extend(args.options.annotations.clone());

        if !args.options.disable_name_suffix_hash {
            metadata
                .annotations
                .insert(NEEDS_HASH_ANNOTATION.to_string(), "true".to_string());
        }
        if args.behavior != Behavior::Create {
            metadata.annotations.insert(
                BEHAVIOR_ANNOTATION.to_string(),
                args.behavior.as_str().to_string(),
            );
        }

        debug!(
            name = %metadata.name,
            keys = data.entries.len(),
            "built secret"
        );

        Ok(Secret {
            api_version: "v1".to_string(),
            kind: "Secret".to_string(),
            metadata,
            secret_type: args
                .secret_type
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_SECRET_TYPE.to_string()),
            immutable: args.options.immutable,
            data: data.entries,
        })
    }
}

/// Accumulates encoded data, rejecting bad and duplicate keys.
struct DataBuilder<'a> {
    validator: &'a dyn Validator,
    entries: BTreeMap<String, String>,
}

impl<'a> DataBuilder<'a> {
    fn new(validator: &'a dyn Validator) -> Self {
        Self {
            validator,
            entries: BTreeMap::new(),
        }
    }

    fn add(&mut self, pair: KvPair) -> Result<()> {
        self.validator
            .validate_data_key(&pair.name)
            .map_err(SecretError::InvalidKey)?;

        if self.entries.contains_key(&pair.name) {
            return Err(SecretError::DuplicateKey(pair.name).into());
        }

        self.entries.insert(pair.name, STANDARD.encode(&pair.value));
        Ok(())
    }
}
