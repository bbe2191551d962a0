//! Deal command handler for inspecting a shuffled layout.
//!
//! Prints the deck a new game would start with for a given seed, one grid
//! row per line, so a layout can be reproduced or checked by hand.

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;
use tilematch_engine::deck::Deck;
use tilematch_engine::symbol::Symbol;

/// Handle the deal command.
///
/// # Arguments
///
/// * `seed` - Optional RNG seed; a random one is drawn and printed when absent
/// * `pairs` - Number of distinct symbols in the deck
/// * `cols` - Grid width used for display
/// * `out` - Output stream for command results
pub fn handle_deal_command(
    seed: Option<u64>,
    pairs: u16,
    cols: u16,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    config::validate_pairs(pairs).map_err(|e| CliError::InvalidInput(e.to_string()))?;
    let seed = seed.unwrap_or_else(rand::random);
    let deck = Deck::new_with_seed(&Symbol::range(pairs), seed)?;

    writeln!(out, "Seed: {}", seed)?;
    writeln!(out, "Pairs: {}", deck.pairs())?;
    for row in ui::format_grid(deck.cards(), usize::from(cols)) {
        writeln!(out, "{}", row)?;
    }
    Ok(())
}
