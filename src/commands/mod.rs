//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - `execute.rs` producing a command-specific result type
//! - `output.rs` rendering that result through [`Outputable`]

mod translate;
mod uniques;

pub use translate::{TranslateCmd, TranslateResult};
pub use uniques::{UniquesCmd, UniquesResult};

use clap::Subcommand;
use std::error::Error;

use crate::config::ConfigFile;
use crate::output::{OutputFormat, Outputable};

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, config: &ConfigFile) -> Result<Self::Output, Box<dyn Error>>;
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate a connection URL into native driver arguments
    Translate(TranslateCmd),

    /// List a table's unique constraints with columns in key order
    Uniques(UniquesCmd),
}

impl Command {
    /// Execute the command and return formatted output
    pub fn run(self, config: &ConfigFile, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        match self {
            Command::Translate(cmd) => {
                let result = cmd.execute(config)?;
                Ok(result.format(format))
            }
            Command::Uniques(cmd) => {
                let result = cmd.execute(config)?;
                Ok(result.format(format))
            }
        }
    }
}
