//! Simulation command handler.
//!
//! Plays a series of games with a bot that never forgets a card it has
//! seen. Time runs on a manual clock, one second per flip, so a given seed
//! always produces the same scores. Each win goes through the normal
//! highscore path, so the highscore file is updated exactly as in real play.
//!
//! # Examples
//!
//! ```no_run
//! use tilematch_cli::commands::sim::{handle_sim_command, SimOptions};
//! use std::io;
//!
//! let opts = SimOptions {
//!     games: 100,
//!     seed: Some(42),
//!     output: Some("data/games.jsonl".to_string()),
//!     ..SimOptions::default()
//! };
//! handle_sim_command(&opts, &mut io::stdout(), &mut io::stderr()).unwrap();
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;
use tilematch_engine::clock::ManualClock;
use tilematch_engine::engine::{EngineConfig, FlipOutcome, GameEngine, WinSummary};
use tilematch_engine::highscore::{DEFAULT_HIGHSCORE_FILE, HighscoreStore, JsonFileStore};
use tilematch_engine::logger::{GameLogger, GameRecord};
use tilematch_engine::scoring::ScoreRules;
use tilematch_engine::symbol::Symbol;

/// Seconds the manual clock advances per flip.
const SECS_PER_FLIP: u64 = 1;

#[derive(Debug, Clone)]
pub struct SimOptions {
    pub games: u32,
    /// Seed of the first shuffle; later games continue the same RNG stream
    pub seed: Option<u64>,
    pub pairs: u16,
    /// JSONL file receiving one `GameRecord` per game
    pub output: Option<String>,
    pub highscore_file: String,
    pub rules: ScoreRules,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            games: 1,
            seed: None,
            pairs: 8,
            output: None,
            highscore_file: DEFAULT_HIGHSCORE_FILE.to_string(),
            rules: ScoreRules::default(),
        }
    }
}

/// Handle the sim command.
///
/// # Errors
///
/// `CliError::InvalidInput` for zero games or an unsupported pair count,
/// `CliError::Io` when the output file cannot be written.
pub fn handle_sim_command(
    opts: &SimOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if opts.games == 0 {
        return Err(CliError::InvalidInput("--games must be >= 1".into()));
    }
    config::validate_pairs(opts.pairs).map_err(|e| CliError::InvalidInput(e.to_string()))?;

    let seed = opts.seed.unwrap_or_else(rand::random);
    let clock = ManualClock::new();
    let mut engine = GameEngine::new(
        &Symbol::range(opts.pairs),
        JsonFileStore::new(&opts.highscore_file),
        clock.clone(),
        EngineConfig {
            seed: Some(seed),
            rules: opts.rules,
        },
    )?;
    let mut logger = match &opts.output {
        Some(path) => Some(GameLogger::create(path)?),
        None => None,
    };

    let mut best = 0u32;
    let mut total = 0u64;
    let mut new_highscores = 0u32;
    for game in 0..opts.games {
        if game > 0 {
            engine.restart()?;
        }
        let summary = play_game(&mut engine, &clock)?;
        if let Some(e) = &summary.store_error {
            ui::display_warning(err, &e.to_string())?;
        }
        tracing::debug!(game, final_score = summary.final_score, "simulated game");

        best = best.max(summary.final_score);
        total += u64::from(summary.final_score);
        if summary.new_highscore {
            new_highscores += 1;
        }
        if let Some(logger) = logger.as_mut() {
            let id = logger.next_id();
            let record = GameRecord::from_summary(id, seed, usize::from(opts.pairs), &summary);
            logger.write(&record)?;
        }
    }

    writeln!(out, "Simulated: {} games", opts.games)?;
    writeln!(out, "Seed: {}", seed)?;
    writeln!(out, "Best score: {}", best)?;
    writeln!(
        out,
        "Average score: {:.1}",
        total as f64 / f64::from(opts.games)
    )?;
    writeln!(out, "New highscores: {}", new_highscores)?;
    writeln!(out, "Highscore: {}", engine.highscore())?;
    Ok(())
}

/// Plays one game to the end with perfect recall.
fn play_game<S: HighscoreStore>(
    engine: &mut GameEngine<S, ManualClock>,
    clock: &ManualClock,
) -> Result<WinSummary, CliError> {
    let size = engine.deck_size();
    let mut known: Vec<Option<Symbol>> = vec![None; size];

    // every turn either matches a pair or reveals at least one unknown card
    for _ in 0..size * 2 {
        let (first, second) = match known_pair(engine, &known) {
            Some(pair) => pair,
            None => {
                let first = next_unknown(engine, &known)?;
                flip_and_learn(engine, clock, &mut known, first)?;
                let partner = (0..size).find(|&q| {
                    q != first
                        && !engine.is_matched(q)
                        && known[q].is_some()
                        && known[q] == known[first]
                });
                let second = match partner {
                    Some(q) => q,
                    None => next_unknown(engine, &known)?,
                };
                let outcome = flip_and_learn(engine, clock, &mut known, second)?;
                if let Some(summary) = settle(engine, outcome)? {
                    return Ok(summary);
                }
                continue;
            }
        };
        flip_and_learn(engine, clock, &mut known, first)?;
        let outcome = flip_and_learn(engine, clock, &mut known, second)?;
        if let Some(summary) = settle(engine, outcome)? {
            return Ok(summary);
        }
    }
    Err(CliError::Internal("simulated game did not finish".into()))
}

fn flip_and_learn<S: HighscoreStore>(
    engine: &mut GameEngine<S, ManualClock>,
    clock: &ManualClock,
    known: &mut [Option<Symbol>],
    position: usize,
) -> Result<FlipOutcome, CliError> {
    clock.advance_secs(SECS_PER_FLIP);
    let outcome = engine.flip(position)?;
    if let Some(symbol) = engine.symbol_at(position) {
        known[position] = Some(symbol);
    }
    Ok(outcome)
}

fn settle<S: HighscoreStore>(
    engine: &mut GameEngine<S, ManualClock>,
    outcome: FlipOutcome,
) -> Result<Option<WinSummary>, CliError> {
    match outcome {
        FlipOutcome::Won(summary) => Ok(Some(summary)),
        FlipOutcome::Mismatch { first, second, .. } => {
            engine.resolve_mismatch(first, second)?;
            Ok(None)
        }
        _ => Ok(None),
    }
}

/// Two unmatched positions already known to hold the same symbol.
fn known_pair<S: HighscoreStore>(
    engine: &GameEngine<S, ManualClock>,
    known: &[Option<Symbol>],
) -> Option<(usize, usize)> {
    let unmatched = |p: usize| !engine.is_matched(p) && known[p].is_some();
    (0..known.len()).filter(|&p| unmatched(p)).find_map(|p| {
        (p + 1..known.len())
            .find(|&q| unmatched(q) && known[q] == known[p])
            .map(|q| (p, q))
    })
}

fn next_unknown<S: HighscoreStore>(
    engine: &GameEngine<S, ManualClock>,
    known: &[Option<Symbol>],
) -> Result<usize, CliError> {
    (0..known.len())
        .find(|&p| known[p].is_none() && !engine.is_matched(p))
        .ok_or_else(|| CliError::Internal("no unrevealed card left".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(dir: &tempfile::TempDir, games: u32) -> SimOptions {
        SimOptions {
            games,
            seed: Some(7),
            pairs: 6,
            output: None,
            highscore_file: dir.path().join("hs.json").to_string_lossy().into_owned(),
            rules: ScoreRules::default(),
        }
    }

    #[test]
    fn runs_requested_games_and_updates_highscore() {
        let dir = tempfile::tempdir().unwrap();
        let opts = opts(&dir, 3);
        let mut out = Vec::new();
        let mut err = Vec::new();

        handle_sim_command(&opts, &mut out, &mut err).unwrap();

        let stdout = String::from_utf8(out).unwrap();
        assert!(stdout.contains("Simulated: 3 games"));
        assert!(stdout.contains("Seed: 7"));
        let stored = JsonFileStore::new(&opts.highscore_file).load();
        assert!(stored > 0, "a perfect-memory bot always scores on 6 pairs");
        assert!(stdout.contains(&format!("Highscore: {}", stored)));
    }

    #[test]
    fn same_seed_gives_same_report() {
        let dir_a = tempfile::tempdir().unwrap();
        let dir_b = tempfile::tempdir().unwrap();
        let mut out_a = Vec::new();
        let mut out_b = Vec::new();

        handle_sim_command(&opts(&dir_a, 4), &mut out_a, &mut Vec::new()).unwrap();
        handle_sim_command(&opts(&dir_b, 4), &mut out_b, &mut Vec::new()).unwrap();

        assert_eq!(out_a, out_b);
    }

    #[test]
    fn zero_games_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = handle_sim_command(&opts(&dir, 0), &mut Vec::new(), &mut Vec::new());
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn bot_never_needs_more_than_one_miss_per_pair() {
        let clock = ManualClock::new();
        let mut engine = GameEngine::new(
            &Symbol::range(10),
            tilematch_engine::highscore::MemoryStore::new(),
            clock.clone(),
            EngineConfig::with_seed(3),
        )
        .unwrap();
        let summary = play_game(&mut engine, &clock).unwrap();
        assert!(engine.is_won());
        assert!(summary.tries >= 10);
        assert!(summary.tries <= 20);
        assert_eq!(u64::from(summary.flip_count), summary.elapsed_secs);
    }
}
