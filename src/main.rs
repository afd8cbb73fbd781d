//! sopsgen - Kubernetes Secrets from encrypted files.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sopsgen::cli::output;
use sopsgen::cli::{execute, Cli};
use sopsgen::core::constants::{LOG_ENV, LOG_FORMAT_ENV};
use sopsgen::error::{CipherError, ConfigError, Error, LoadError};

fn main() {
    let cli = Cli::parse();

    // stdout carries the manifest, so logs always go to stderr
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("sopsgen=debug")
        } else {
            EnvFilter::new("sopsgen=warn")
        }
    });

    let json = std::env::var(LOG_FORMAT_ENV).is_ok_and(|v| v == "json");
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    if let Err(e) = execute(cli) {
        let suggestion = match &e {
            Error::Cipher(CipherError::NoIdentity) => {
                Some("set SOPS_AGE_KEY_FILE to your age keys file")
            }
            Error::Cipher(CipherError::BackendUnavailable(_)) => {
                Some("install sops or set `cipher: age` in the generator")
            }
            Error::Decrypt { cipher: "age", .. } => {
                Some("files encrypted with sops need `cipher: sops` in the generator")
            }
            Error::Load(LoadError::Restricted { .. }) => {
                Some("move the file below the kustomization or pass --load-restrictor none")
            }
            Error::Config(ConfigError::PluginHome { .. }) => {
                Some("create one of the directories above, or set $KUSTOMIZE_PLUGIN_HOME")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
