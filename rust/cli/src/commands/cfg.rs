//! Configuration command handler.
//!
//! This module implements the `cfg` command, which displays the current
//! configuration with the source of every value (default, file or environment).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "difficulty": {
//!     "value": "normal",
//!     "source": "default"
//!   },
//!   "seed": {
//!     "value": 42,
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!(error = %e, "configuration rejected");
            return Err(CliError::Config(e.to_string()));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "difficulty": {
            "value": config.difficulty,
            "source": sources.difficulty,
        },
        "first": {
            "value": config.first,
            "source": sources.first,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "dictionary": {
            "value": config.dictionary,
            "source": sources.dictionary,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
