//! Command handler modules for the tilematch CLI.
//!
//! Each subcommand lives in its own file and follows the same pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Module-private helpers for that command only
//! - Output streams (`&mut dyn Write`) passed in as parameters
//! - Errors propagated via the `CliError` enum
//!
//! # Example
//!
//! ```rust,ignore
//! use tilematch_cli::commands::handle_cfg_command;
//! use std::io;
//!
//! let mut out = io::stdout();
//! let mut err = io::stderr();
//! handle_cfg_command(&mut out, &mut err).expect("Command failed");
//! ```

pub mod cfg;
pub mod deal;
pub mod highscore;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use highscore::handle_highscore_command;
pub use sim::{SimOptions, handle_sim_command};
