//! Configuration command handler.
//!
//! This module implements the `cfg` command, which displays the resolved
//! configuration with the source of every value (default, environment,
//! or configuration file).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "pairs": {
//!     "value": 8,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

/// Handle the cfg command.
///
/// Loads the configuration with source tracking and prints it as pretty JSON.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "pairs": {
            "value": config.pairs,
            "source": sources.pairs,
        },
        "cols": {
            "value": config.cols,
            "source": sources.cols,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "highscore_file": {
            "value": config.highscore_file,
            "source": sources.highscore_file,
        },
        "try_penalty": {
            "value": config.try_penalty,
            "source": sources.try_penalty,
        },
        "seconds_per_point": {
            "value": config.seconds_per_point,
            "source": sources.seconds_per_point,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
