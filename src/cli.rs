//! CLI argument definitions.
//!
//! This module contains the top-level CLI structure and shared flags.
//! Individual command definitions are in the `commands` module.

use clap::Parser;

use crate::commands::Command;
use crate::logging::LogFormat;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Log level or filter directive (overrides the config file and RUST_LOG)
    #[arg(short = 'v', long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Log line format
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}
