//! Plugin installation helpers.
//!
//! `kind`, `subdir` and `plugin-home` print what a build script needs to
//! install the binary where kustomize looks for exec plugins.

use std::path::PathBuf;

use tracing::debug;

use crate::core::constants::{self, PLUGIN_HOME_DIR, PLUGIN_HOME_ENV};
use crate::error::{ConfigError, Result};

/// Print the generator kind.
pub fn kind() -> Result<()> {
    println!("{}", constants::KIND);
    Ok(())
}

/// Print the plugin directory below the plugin home.
pub fn subdir() -> Result<()> {
    println!("{}", constants::subdir());
    Ok(())
}

/// Print the first existing kustomize plugin home.
pub fn plugin_home() -> Result<()> {
    let home = find_plugin_home(&candidates())?;
    println!("{}", home.display());
    Ok(())
}

/// Where kustomize looks for plugins, in order of precedence.
///
/// `$KUSTOMIZE_PLUGIN_HOME`, then `$XDG_CONFIG_HOME/kustomize/plugin`,
/// then `$HOME/.config/kustomize/plugin`, then `$HOME/kustomize/plugin`.
pub fn candidates() -> Vec<PathBuf> {
    candidates_from(
        std::env::var_os(PLUGIN_HOME_ENV).map(PathBuf::from),
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        dirs::home_dir(),
    )
}

fn candidates_from(
    plugin_home: Option<PathBuf>,
    config: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(plugin_home) = plugin_home {
        candidates.push(plugin_home);
    }
    if let Some(config) = config {
        candidates.push(config.join(PLUGIN_HOME_DIR));
    }
    if let Some(home) = home {
        candidates.push(home.join(".config").join(PLUGIN_HOME_DIR));
        candidates.push(home.join(PLUGIN_HOME_DIR));
    }

    candidates
}

/// First candidate that is an existing directory, made absolute.
///
/// # Errors
///
/// Returns `ConfigError::PluginHome` listing every candidate if none exists.
pub fn find_plugin_home(candidates: &[PathBuf]) -> Result<PathBuf> {
    for candidate in candidates {
        debug!(path = %candidate.display(), "checking plugin home");
        if candidate.is_dir() {
            return Ok(candidate.canonicalize()?);
        }
    }

    Err(ConfigError::PluginHome {
        searched: candidates.to_vec(),
    }
    .into())
}
