use std::collections::{BTreeMap, HashSet};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::symbol::Symbol;

/// Smallest playable number of distinct symbols (a four-card deck).
pub const MIN_PAIRS: usize = 2;

/// Ordered sequence of card faces in which every symbol occurs exactly twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DeckLayout")]
pub struct Deck {
    cards: Vec<Symbol>,
}

/// Serialized shape of a [`Deck`]; checked by [`Deck::from_layout`] on the
/// way in.
#[derive(Deserialize)]
struct DeckLayout {
    cards: Vec<Symbol>,
}

impl TryFrom<DeckLayout> for Deck {
    type Error = GameError;

    fn try_from(layout: DeckLayout) -> Result<Self, Self::Error> {
        Deck::from_layout(layout.cards)
    }
}

impl Deck {
    /// Builds `symbols ++ symbols` and applies a uniform Fisher–Yates shuffle.
    pub fn shuffled<R: Rng + ?Sized>(symbols: &[Symbol], rng: &mut R) -> Result<Self, GameError> {
        validate_symbols(symbols)?;
        let mut cards = Vec::with_capacity(symbols.len() * 2);
        cards.extend_from_slice(symbols);
        cards.extend_from_slice(symbols);
        cards.shuffle(rng);
        Ok(Self { cards })
    }

    pub fn new_with_seed(symbols: &[Symbol], seed: u64) -> Result<Self, GameError> {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        Self::shuffled(symbols, &mut rng)
    }

    /// Accepts an explicit layout, e.g. `[A, B, A, B]`, without shuffling it.
    pub fn from_layout(cards: Vec<Symbol>) -> Result<Self, GameError> {
        let size = cards.len();
        if size % 2 != 0 {
            return Err(GameError::InvalidConfiguration(format!(
                "deck size {} is odd",
                size
            )));
        }
        if size < MIN_PAIRS * 2 {
            return Err(GameError::InvalidConfiguration(format!(
                "deck size {} is below the minimum of {}",
                size,
                MIN_PAIRS * 2
            )));
        }
        let mut counts: BTreeMap<Symbol, usize> = BTreeMap::new();
        for &symbol in &cards {
            *counts.entry(symbol).or_default() += 1;
        }
        if let Some((symbol, count)) = counts.iter().find(|(_, &c)| c != 2) {
            return Err(GameError::InvalidConfiguration(format!(
                "symbol {} appears {} times, expected 2",
                symbol, count
            )));
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn pairs(&self) -> usize {
        self.cards.len() / 2
    }

    pub fn get(&self, position: usize) -> Option<Symbol> {
        self.cards.get(position).copied()
    }

    pub fn cards(&self) -> &[Symbol] {
        &self.cards
    }

    /// Distinct symbols in ascending order.
    pub fn symbols(&self) -> Vec<Symbol> {
        let mut symbols = self.cards.clone();
        symbols.sort_unstable();
        symbols.dedup();
        symbols
    }
}

fn validate_symbols(symbols: &[Symbol]) -> Result<(), GameError> {
    if symbols.len() < MIN_PAIRS {
        return Err(GameError::InvalidConfiguration(format!(
            "at least {} distinct symbols are required, got {}",
            MIN_PAIRS,
            symbols.len()
        )));
    }
    let mut seen = HashSet::with_capacity(symbols.len());
    for &symbol in symbols {
        if !seen.insert(symbol) {
            return Err(GameError::InvalidConfiguration(format!(
                "symbol {} supplied more than once",
                symbol
            )));
        }
    }
    Ok(())
}
