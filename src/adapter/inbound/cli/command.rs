//! Command-line interface definitions.
//!
//! The `swapwidget` binary is a headless host for the swap engine: it
//! evaluates the action resolver on scenario files, validates configuration
//! and runs the connector policy against configured endpoints.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Swap action resolution engine CLI
#[derive(Parser, Debug)]
#[command(name = "swapwidget")]
#[command(version, about)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the action for a swap scenario file
    Resolve(ResolveArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Run the connector policy and print the active connection
    Connect(ConfigPathArg),
}

/// Subcommands for `swapwidget config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Validate a configuration file.
    Check(ConfigPathArg),
}

/// Shared `--config` argument.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for `swapwidget resolve`.
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Scenario file (TOML).
    pub scenario: PathBuf,
}
