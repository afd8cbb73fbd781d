//! Content formats understood by the decryption backends.

use std::fmt;
use std::path::Path;

/// Encoding of an encrypted source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Yaml,
    Json,
    Dotenv,
    Ini,
    Binary,
}

impl Format {
    /// Infer the format from the end of a path.
    ///
    /// Paths ending in `.yaml` or `.yml` are YAML, `.json` is JSON, `.env`
    /// is dotenv and `.ini` is INI, so a bare `.env` file is dotenv too.
    /// Everything else is binary. Matching is case-sensitive.
    pub fn for_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_string_lossy();
        if path.ends_with(".yaml") || path.ends_with(".yml") {
            Self::Yaml
        } else if path.ends_with(".json") {
            Self::Json
        } else if path.ends_with(".env") {
            Self::Dotenv
        } else if path.ends_with(".ini") {
            Self::Ini
        } else {
            Self::Binary
        }
    }

    /// Name used by the sops CLI for `--input-type`/`--output-type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::Dotenv => "dotenv",
            Self::Ini => "ini",
            Self::Binary => "binary",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
