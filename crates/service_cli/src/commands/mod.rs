//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod init_config;
pub mod pfe;
pub mod run;
mod table;

use clap::ValueEnum;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}
