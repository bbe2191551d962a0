//! # Tilematch CLI Library
//!
//! Command-line tools around the tilematch engine: inspect shuffled layouts,
//! manage the persisted highscore, and run self-play simulations.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line
//! arguments and executes the appropriate subcommand.
//!
//! ## Available Subcommands
//!
//! - `deal`: Print the layout a seeded game starts with
//! - `highscore`: Show or reset the highscore file
//! - `sim`: Play games with a perfect-memory bot and report scores
//! - `cfg`: Display the resolved configuration

use clap::Parser;
use std::io::Write;

#[macro_use]
mod macros;

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exit_code;
pub mod logging;
pub mod ui;

use cli::{Commands, TilematchCli};
use commands::{
    SimOptions, handle_cfg_command, handle_deal_command, handle_highscore_command,
    handle_sim_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["deal", "highscore", "sim", "cfg"];

/// Main entry point for the CLI application.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["tilematch", "deal", "--seed", "42", "--pairs", "4"];
/// let code = tilematch_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match TilematchCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // help and version go to stdout with success
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                if write!(out, "{}", e).is_err() {
                    return exit_code::ERROR;
                }
                return exit_code::SUCCESS;
            }
            write_or_exit!(err, "{}", e);
            write_or_exit!(err, "Tilematch CLI");
            write_or_exit!(err, "Usage: tilematch <command> [options]\n");
            write_or_exit!(err, "Commands:");
            for c in COMMANDS {
                write_or_exit!(err, "  {}", c);
            }
            write_or_exit!(err, "\nFor full help, run: tilematch --help");
            return exit_code::ERROR;
        }
    };

    // cfg reports its own configuration errors
    if let Commands::Cfg = cli.cmd {
        return match handle_cfg_command(out, err) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }

    let cfg = match config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            write_or_exit!(err, "Error: {}", CliError::from(e));
            return exit_code::ERROR;
        }
    };

    let result = match cli.cmd {
        Commands::Deal { seed, pairs, cols } => handle_deal_command(
            seed.or(cfg.seed),
            pairs.unwrap_or(cfg.pairs),
            cols.unwrap_or(cfg.cols),
            out,
        ),
        Commands::Highscore { file, reset } => {
            let file = file.unwrap_or_else(|| cfg.highscore_file.clone());
            handle_highscore_command(&file, reset, out, err)
        }
        Commands::Sim {
            games,
            seed,
            pairs,
            output,
            file,
        } => {
            let opts = SimOptions {
                games,
                seed: seed.or(cfg.seed),
                pairs: pairs.unwrap_or(cfg.pairs),
                output,
                highscore_file: file.unwrap_or_else(|| cfg.highscore_file.clone()),
                rules: cfg.score_rules(),
            };
            handle_sim_command(&opts, out, err)
        }
        Commands::Cfg => Ok(()),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}
