//! Source loading.
//!
//! Raw encrypted bytes are fetched through [`Loader`]. [`FsLoader`] reads
//! from disk relative to a root directory and, by default, refuses to read
//! anything outside of it.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::core::types::RawBlob;
use crate::error::LoadError;

/// Fetches the bytes behind a path.
pub trait Loader {
    /// Load the full contents of `path`.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the path cannot be read or is not allowed.
    fn load(&self, path: &str) -> Result<RawBlob, LoadError>;
}

/// Which paths a [`FsLoader`] may read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LoadRestrictions {
    /// Only files in or below the root
    #[default]
    RootOnly,
    /// Any file
    None,
}

/// Loads files from disk relative to a root directory.
#[derive(Debug, Clone)]
pub struct FsLoader {
    root: PathBuf,
    restrictions: LoadRestrictions,
}

impl FsLoader {
    pub fn new(root: impl Into<PathBuf>, restrictions: LoadRestrictions) -> Self {
        Self {
            root: root.into(),
            restrictions,
        }
    }

    /// Root that relative paths resolve against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn check_allowed(&self, path: &str, resolved: &Path) -> Result<(), LoadError> {
        if self.restrictions == LoadRestrictions::None {
            return Ok(());
        }

        let read_err = |source| LoadError::Read {
            path: path.to_string(),
            source,
        };
        let root = self.root.canonicalize().map_err(read_err)?;
        let target = resolved.canonicalize().map_err(read_err)?;

        if !target.starts_with(&root) {
            return Err(LoadError::Restricted {
                path: path.to_string(),
                root,
            });
        }

        Ok(())
    }
}

impl Loader for FsLoader {
    fn load(&self, path: &str) -> Result<RawBlob, LoadError> {
        let resolved = self.root.join(path);
        debug!(path, resolved = %resolved.display(), "loading source");

        self.check_allowed(path, &resolved)?;

        let bytes = std::fs::read(&resolved).map_err(|source| LoadError::Read {
            path: path.to_string(),
            source,
        })?;

        trace!(path, len = bytes.len(), "loaded source");
        Ok(bytes)
    }
}
