//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Configuration file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_PATH: &str = "ceelog.toml";

/// ceelog -- convert normalized events between log formats.
///
/// Use `ceelog <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "ceelog", version, about, long_about = None)]
pub struct Cli {
    /// Path to the ceelog.toml configuration file (default: ./ceelog.toml when present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format for report commands.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode events from a line source and print them with an encoder.
    Convert(ConvertArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- convert ----

/// Encoding compactness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Compactness {
    /// Drop optional whitespace and fields without values.
    Ultra,
}

/// Decode events and re-encode them, one output line per event.
#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// Input file (default: stdin).
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Decoder to use (int, apache, json).
    #[arg(short, long)]
    pub decoder: Option<String>,

    /// Encoder to use (syslog, json, xml, csv, all).
    #[arg(short, long)]
    pub encoder: Option<String>,

    /// Decoder field name list (required by the apache decoder).
    #[arg(short = 'D', long)]
    pub decoder_format: Option<String>,

    /// Encoder field name list (required by the csv encoder).
    #[arg(short = 'E', long)]
    pub encoder_format: Option<String>,

    /// Encoding compactness.
    #[arg(short = 'c', long = "compact", value_enum)]
    pub compact: Option<Compactness>,

    /// Log every line read (raises the log level to trace).
    #[arg(short, long)]
    pub verbose: bool,
}

// ---- config ----

/// Manage ceelog configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, context, codec).
        #[arg(long)]
        section: Option<String>,
    },
}
