//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for MediRecord using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// MediRecord - Patient Data Export Tool
#[derive(Parser, Debug)]
#[command(name = "medirecord")]
#[command(version, about, long_about = None)]
#[command(author = "MediRecord Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "medirecord.toml", env = "MEDIRECORD_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "MEDIRECORD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export one patient's records as a zip archive
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
