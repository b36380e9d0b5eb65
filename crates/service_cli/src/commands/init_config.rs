//! Init-config command implementation
//!
//! Prints the default configuration as TOML, or writes it to a file.

use std::path::Path;

use tracing::info;

use crate::config::CliConfig;
use crate::{CliError, Result};

/// Run the init-config command
pub fn run(output: Option<&Path>, force: bool) -> Result<()> {
    let text = CliConfig::default().to_toml_string()?;

    match output {
        Some(path) => {
            if path.exists() && !force {
                return Err(CliError::InvalidArgument(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            std::fs::write(path, &text)?;
            info!(path = %path.display(), "configuration written");
        }
        None => print!("{}", text),
    }
    Ok(())
}
