//! Command-line argument definitions.
//!
//! Flags left unset fall back to the resolved configuration, see
//! [`crate::config`].

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "tilematch",
    version,
    about = "Tile matching memory game engine and tools"
)]
pub struct TilematchCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the shuffled layout a new game would start with
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        /// Number of distinct symbols
        #[arg(long)]
        pairs: Option<u16>,
        /// Grid width used for display
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
        cols: Option<u16>,
    },
    /// Show or reset the persisted highscore
    Highscore {
        /// Highscore JSON file
        #[arg(long)]
        file: Option<String>,
        #[arg(long)]
        reset: bool,
    },
    /// Play games with a perfect-memory bot and report the scores
    Sim {
        #[arg(long, default_value_t = 1)]
        games: u32,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        pairs: Option<u16>,
        /// JSONL file receiving one record per game
        #[arg(long)]
        output: Option<String>,
        /// Highscore JSON file
        #[arg(long)]
        file: Option<String>,
    },
    /// Display the resolved configuration and where each value came from
    Cfg,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_defaults_to_one_game() {
        let cli = TilematchCli::try_parse_from(["tilematch", "sim"]).unwrap();
        match cli.cmd {
            Commands::Sim { games, seed, .. } => {
                assert_eq!(games, 1);
                assert_eq!(seed, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn deal_rejects_zero_columns() {
        let result = TilematchCli::try_parse_from(["tilematch", "deal", "--cols", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn highscore_reset_flag() {
        let cli =
            TilematchCli::try_parse_from(["tilematch", "highscore", "--reset", "--file", "x.json"])
                .unwrap();
        match cli.cmd {
            Commands::Highscore { file, reset } => {
                assert!(reset);
                assert_eq!(file.as_deref(), Some("x.json"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
