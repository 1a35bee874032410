//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for MedTrack using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// MedTrack - Clinic Appointment Tracker
#[derive(Parser, Debug)]
#[command(name = "medtrack")]
#[command(version, about, long_about = None)]
#[command(author = "MedTrack Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "medtrack.toml", env = "MEDTRACK_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "MEDTRACK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP service
    Serve(commands::serve::ServeArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
