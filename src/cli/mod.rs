//! Command-line interface.
//!
//! kustomize runs exec plugins as `sopsgen <config>`, so generating is the
//! default action. The subcommands help install the plugin.

pub mod generate;
pub mod output;
pub mod plugin;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::core::loader::LoadRestrictions;
use crate::error::{ConfigError, Result};

/// sopsgen - Kubernetes Secrets from encrypted files.
#[derive(Parser)]
#[command(
    name = "sopsgen",
    about = "Generate Kubernetes Secrets from encrypted files and dotenv sources",
    version,
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub generate: GenerateArgs,
}

/// Arguments of the default generate action.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to the SOPSGenerator manifest
    #[arg(required = true)]
    pub config: Option<PathBuf>,

    /// Output format of the generated Secret
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub output: OutputFormat,

    /// Which files may be loaded relative to the working directory
    #[arg(
        long,
        value_enum,
        env = "SOPSGEN_LOAD_RESTRICTOR",
        default_value_t = LoadRestrictions::RootOnly
    )]
    pub load_restrictor: LoadRestrictions,
}

/// Rendering of the generated Secret.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Yaml,
    Json,
}

/// Plugin helper commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the generator kind
    Kind,

    /// Print the plugin directory below the plugin home
    Subdir,

    /// Print the kustomize plugin home
    PluginHome,
}

/// Execute the parsed command line.
pub fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Command::Kind) => plugin::kind(),
        Some(Command::Subdir) => plugin::subdir(),
        Some(Command::PluginHome) => plugin::plugin_home(),
        None => {
            let config = cli
                .generate
                .config
                .as_deref()
                .ok_or(ConfigError::MissingField { field: "CONFIG" })?;
            generate::execute(config, &cli.generate)
        }
    }
}
