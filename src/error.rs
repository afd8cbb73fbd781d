//! Error types for sopsgen.
//!
//! One crate-wide [`Error`] wraps a domain enum per component. Every
//! error aborts the generation call that produced it.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error returned by every public operation.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Entry(#[from] EntryError),

    #[error("{path}: {source}")]
    Dotenv {
        path: String,
        #[source]
        source: DotenvError,
    },

    #[error("failed to decrypt {path} with {cipher}: {source}")]
    Decrypt {
        path: String,
        cipher: &'static str,
        #[source]
        source: CipherError,
    },

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Syntax errors in a `[key=]path` file entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("key name for file {path} missing, remove the leading '=' or add a key name")]
    MissingKey { path: String },

    #[error("file path for key {key} missing, remove the trailing '=' or add a file")]
    MissingPath { key: String },

    #[error("file names or keys can't contain '=', but {0} was given which is ambiguous")]
    Ambiguous(String),
}

/// A dotenv line that could not be parsed, with its 0-based line number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct DotenvError {
    pub line: usize,
    pub kind: LineError,
}

/// Why a single dotenv line was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("invalid UTF-8 bytes: {0}")]
    InvalidEncoding(String),

    #[error(transparent)]
    InvalidName(#[from] ValidationError),

    #[error("expected NAME=value, got {0:?} (name-only entries are not supported)")]
    MissingSeparator(String),
}

/// Decryption backend failures.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("no age identity found, set SOPS_AGE_KEY or SOPS_AGE_KEY_FILE")]
    NoIdentity,

    #[error("invalid age identity: {0}")]
    InvalidIdentity(String),

    #[error("passphrase-encrypted files are not supported")]
    Passphrase,

    #[error("{0}")]
    BackendUnavailable(String),

    #[error("unknown cipher: {0}. Supported: age, sops")]
    UnknownBackend(String),
}

/// Source loader failures.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("security; file '{path}' is not in or below '{}'", .root.display())]
    Restricted { path: String, root: PathBuf },

    #[error("{0} has not been staged")]
    NotStaged(String),
}

/// Name and key syntax violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid environment variable name {name:?}: {reason}")]
    InvalidEnvName { name: String, reason: String },

    #[error("invalid data key {key:?}: {reason}")]
    InvalidDataKey { key: String, reason: String },
}

/// Secret assembly failures.
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("secret name is required")]
    MissingName,

    #[error("cannot add key {0}, another key by that name already exists")]
    DuplicateKey(String),

    #[error(transparent)]
    InvalidKey(#[from] ValidationError),
}

/// Generator manifest and plugin environment failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid generator config: {0}")]
    Parse(#[source] serde_yaml::Error),

    #[error("unsupported apiVersion {found:?}, expected {expected:?}")]
    UnsupportedApiVersion { found: String, expected: String },

    #[error("unsupported kind {found:?}, expected {expected:?}")]
    UnsupportedKind { found: String, expected: String },

    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("failed to serialize secret: {0}")]
    Serialize(String),

    #[error("no kustomize plugin home found, looked in: {}", format_paths(.searched))]
    PluginHome { searched: Vec<PathBuf> },
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, Error>;
