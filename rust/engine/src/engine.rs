use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::deck::Deck;
use crate::errors::GameError;
use crate::highscore::{HighscoreStore, JsonFileStore};
use crate::scoring::ScoreRules;
use crate::symbol::Symbol;
use crate::tile::TileState;

/// Construction parameters shared by [`GameEngine::new`] and [`GameEngine::from_deck`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Shuffle seed; a random one is drawn when absent
    pub seed: Option<u64>,
    pub rules: ScoreRules,
}

impl EngineConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}

/// Counters of the game currently in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    tries: u32,
    matched_pairs: u32,
    flip_count: u32,
    base_points: u32,
    started_at: Instant,
    first_position: Option<usize>,
}

impl Session {
    fn new(started_at: Instant) -> Self {
        Self {
            tries: 0,
            matched_pairs: 0,
            flip_count: 0,
            base_points: 0,
            started_at,
            first_position: None,
        }
    }

    /// Completed pairs of flips, matched or not.
    pub fn tries(&self) -> u32 {
        self.tries
    }
    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }
    /// Individual flips that changed state; no-op flips are not counted.
    pub fn flip_count(&self) -> u32 {
        self.flip_count
    }
    pub fn base_points(&self) -> u32 {
        self.base_points
    }
    pub fn started_at(&self) -> Instant {
        self.started_at
    }
    pub fn first_position(&self) -> Option<usize> {
        self.first_position
    }
}

/// Result of the winning match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinSummary {
    /// First card of the winning pair
    pub first: usize,
    /// Second card of the winning pair
    pub second: usize,
    pub final_score: u32,
    /// Value the store held when the game ended
    pub previous_highscore: u32,
    pub new_highscore: bool,
    pub tries: u32,
    pub flip_count: u32,
    pub elapsed_secs: u64,
    /// Set when a new highscore could not be persisted
    #[serde(skip)]
    pub store_error: Option<GameError>,
}

/// What a call to [`GameEngine::flip`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Position was already face up; nothing changed.
    NoOp,
    /// First card of a pair is now face up.
    PendingFirst { position: usize, score: u32 },
    /// Both cards locked face up.
    Matched {
        first: usize,
        second: usize,
        score: u32,
    },
    /// Both cards stay face up until [`GameEngine::resolve_mismatch`].
    Mismatch {
        first: usize,
        second: usize,
        score: u32,
    },
    /// Last pair matched.
    Won(WinSummary),
}

impl FlipOutcome {
    pub fn score(&self) -> Option<u32> {
        match self {
            FlipOutcome::NoOp => None,
            FlipOutcome::PendingFirst { score, .. }
            | FlipOutcome::Matched { score, .. }
            | FlipOutcome::Mismatch { score, .. } => Some(*score),
            FlipOutcome::Won(summary) => Some(summary.final_score),
        }
    }

    pub fn has_update(&self) -> bool {
        !matches!(self, FlipOutcome::NoOp)
    }

    pub fn is_won(&self) -> bool {
        matches!(self, FlipOutcome::Won(_))
    }
}

/// Snapshot for a periodic display refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    pub score: u32,
    pub elapsed_secs: u64,
    pub highscore: u32,
}

/// State machine of one memory game: a shuffled deck of pairs, the
/// face-up/matched state of every position, and the scoring session.
///
/// The engine never waits. A mismatch leaves both cards [`TileState::Pending`]
/// until the caller invokes [`GameEngine::resolve_mismatch`], typically after
/// showing them for a moment.
///
/// # Examples
///
/// ```
/// use tilematch_engine::clock::ManualClock;
/// use tilematch_engine::deck::Deck;
/// use tilematch_engine::engine::{EngineConfig, FlipOutcome, GameEngine};
/// use tilematch_engine::highscore::MemoryStore;
/// use tilematch_engine::symbol::Symbol;
///
/// let (a, b) = (Symbol(0), Symbol(1));
/// let deck = Deck::from_layout(vec![a, b, a, b]).unwrap();
/// let mut engine = GameEngine::from_deck(
///     deck,
///     MemoryStore::new(),
///     ManualClock::new(),
///     EngineConfig::default(),
/// );
///
/// engine.flip(0).unwrap();
/// let outcome = engine.flip(1).unwrap();
/// assert!(matches!(outcome, FlipOutcome::Mismatch { first: 0, second: 1, .. }));
/// engine.resolve_mismatch(0, 1).unwrap();
///
/// engine.flip(0).unwrap();
/// engine.flip(2).unwrap();
/// engine.flip(1).unwrap();
/// assert!(engine.flip(3).unwrap().is_won());
/// assert!(engine.is_won());
/// ```
#[derive(Debug)]
pub struct GameEngine<S = JsonFileStore, C = SystemClock> {
    deck: Deck,
    tiles: Vec<TileState>,
    session: Session,
    /// In-memory view of the best score, re-synced from the store on reset
    highscore: u32,
    rules: ScoreRules,
    seed: u64,
    rng: ChaCha20Rng,
    store: S,
    clock: C,
}

impl<S: HighscoreStore, C: Clock> GameEngine<S, C> {
    /// Shuffles `symbols ++ symbols` into a new deck and starts a session.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidConfiguration`] when fewer than two symbols are
    /// given or a symbol is listed twice.
    pub fn new(
        symbols: &[Symbol],
        store: S,
        clock: C,
        config: EngineConfig,
    ) -> Result<Self, GameError> {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let deck = Deck::shuffled(symbols, &mut rng)?;
        Ok(Self::assemble(deck, rng, seed, store, clock, config.rules))
    }

    /// Starts a session on a fixed layout. The seed only affects later resets.
    pub fn from_deck(deck: Deck, store: S, clock: C, config: EngineConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let rng = ChaCha20Rng::seed_from_u64(seed);
        Self::assemble(deck, rng, seed, store, clock, config.rules)
    }

    fn assemble(
        deck: Deck,
        rng: ChaCha20Rng,
        seed: u64,
        store: S,
        clock: C,
        rules: ScoreRules,
    ) -> Self {
        let started_at = clock.now();
        let highscore = store.load();
        tracing::debug!(seed, pairs = deck.pairs(), highscore, "game started");
        Self {
            tiles: vec![TileState::Hidden; deck.len()],
            deck,
            session: Session::new(started_at),
            highscore,
            rules,
            seed,
            rng,
            store,
            clock,
        }
    }

    /// Turns the card at `position` face up and resolves the pair if it is
    /// the second card.
    ///
    /// Flipping a card that is already face up (the pending first card, half
    /// of an unresolved mismatch, or a matched card) returns
    /// [`FlipOutcome::NoOp`] and leaves every counter untouched.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidPosition`] when `position >= deck_size()`; no
    /// state changes.
    pub fn flip(&mut self, position: usize) -> Result<FlipOutcome, GameError> {
        self.check_position(position)?;
        if !self.tiles[position].is_hidden() {
            tracing::trace!(position, "flip ignored");
            return Ok(FlipOutcome::NoOp);
        }

        self.session.flip_count += 1;
        self.tiles[position] = TileState::Pending;

        let Some(first) = self.session.first_position.take() else {
            self.session.first_position = Some(position);
            let score = self.refresh_highscore();
            tracing::debug!(position, "first card revealed");
            return Ok(FlipOutcome::PendingFirst { position, score });
        };

        self.session.tries += 1;
        if self.deck.get(first) == self.deck.get(position) {
            self.tiles[first] = TileState::Matched;
            self.tiles[position] = TileState::Matched;
            self.session.matched_pairs += 1;
            self.session.base_points = self
                .session
                .base_points
                .saturating_add(self.rules.points_per_match);

            if self.is_won() {
                return Ok(FlipOutcome::Won(self.finish(first, position)));
            }
            let score = self.refresh_highscore();
            tracing::debug!(first, second = position, score, "pair matched");
            Ok(FlipOutcome::Matched {
                first,
                second: position,
                score,
            })
        } else {
            let score = self.refresh_highscore();
            tracing::debug!(first, second = position, score, "pair mismatched");
            Ok(FlipOutcome::Mismatch {
                first,
                second: position,
                score,
            })
        }
    }

    /// Turns the cards of a mismatch face down again.
    ///
    /// Only positions that are pending and not the current first card are
    /// hidden; anything else is left alone. Returns how many positions were
    /// hidden.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidPosition`] when either index is out of range; no
    /// state changes.
    pub fn resolve_mismatch(&mut self, a: usize, b: usize) -> Result<usize, GameError> {
        self.check_position(a)?;
        self.check_position(b)?;

        let mut hidden = 0;
        for position in [a, b] {
            if self.tiles[position] == TileState::Pending
                && self.session.first_position != Some(position)
            {
                self.tiles[position] = TileState::Hidden;
                hidden += 1;
            }
        }
        tracing::debug!(a, b, hidden, "mismatch resolved");
        Ok(hidden)
    }

    /// Starts a new game with `symbols`, keeping the RNG stream and re-reading
    /// the highscore from the store.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidConfiguration`] for an unplayable symbol set; the
    /// running game is left as it was.
    pub fn reset(&mut self, symbols: &[Symbol]) -> Result<(), GameError> {
        let deck = Deck::shuffled(symbols, &mut self.rng)?;
        self.tiles = vec![TileState::Hidden; deck.len()];
        self.deck = deck;
        self.session = Session::new(self.clock.now());
        self.highscore = self.store.load();
        tracing::debug!(pairs = self.deck.pairs(), highscore = self.highscore, "game reset");
        Ok(())
    }

    /// Reshuffles the current symbol set and starts over.
    pub fn restart(&mut self) -> Result<(), GameError> {
        let symbols = self.deck.symbols();
        self.reset(&symbols)
    }

    pub fn current_score(&self) -> u32 {
        self.rules.score(
            self.session.base_points,
            self.session.tries,
            self.elapsed_secs(),
        )
    }

    /// Whole seconds since the session started.
    pub fn elapsed_secs(&self) -> u64 {
        self.clock
            .now()
            .saturating_duration_since(self.session.started_at)
            .as_secs()
    }

    /// Once-per-second poll for score and timer displays.
    pub fn tick(&mut self) -> Tick {
        let score = self.refresh_highscore();
        Tick {
            score,
            elapsed_secs: self.elapsed_secs(),
            highscore: self.highscore,
        }
    }

    pub fn is_won(&self) -> bool {
        self.session.matched_pairs as usize * 2 == self.deck.len()
    }

    pub fn deck_size(&self) -> usize {
        self.deck.len()
    }

    pub fn tile_state(&self, position: usize) -> Option<TileState> {
        self.tiles.get(position).copied()
    }

    /// Face of the card at `position`, only while it is face up.
    pub fn symbol_at(&self, position: usize) -> Option<Symbol> {
        self.tile_state(position)
            .filter(|state| state.is_face_up())
            .and_then(|_| self.deck.get(position))
    }

    pub fn is_matched(&self, position: usize) -> bool {
        self.tile_state(position) == Some(TileState::Matched)
    }

    pub fn is_pending(&self, position: usize) -> bool {
        self.tile_state(position) == Some(TileState::Pending)
    }

    pub fn pending_first(&self) -> Option<usize> {
        self.session.first_position
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn highscore(&self) -> u32 {
        self.highscore
    }

    pub fn rules(&self) -> ScoreRules {
        self.rules
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn check_position(&self, position: usize) -> Result<(), GameError> {
        if position < self.deck.len() {
            Ok(())
        } else {
            Err(GameError::InvalidPosition {
                position,
                deck_size: self.deck.len(),
            })
        }
    }

    /// Live score, raising the cached highscore when it is beaten. Nothing is
    /// persisted here.
    fn refresh_highscore(&mut self) -> u32 {
        let score = self.current_score();
        if score > self.highscore {
            self.highscore = score;
        }
        score
    }

    fn finish(&mut self, first: usize, second: usize) -> WinSummary {
        let final_score = self.current_score();
        let previous_highscore = self.store.load();
        let new_highscore = final_score > previous_highscore;

        let mut store_error = None;
        if new_highscore {
            match self.store.save(final_score) {
                Ok(()) => tracing::info!(final_score, previous_highscore, "new highscore"),
                Err(e) => {
                    tracing::warn!(error = %e, final_score, "highscore not persisted");
                    store_error = Some(e);
                }
            }
        }
        self.highscore = self.highscore.max(previous_highscore).max(final_score);

        let summary = WinSummary {
            first,
            second,
            final_score,
            previous_highscore,
            new_highscore,
            tries: self.session.tries,
            flip_count: self.session.flip_count,
            elapsed_secs: self.elapsed_secs(),
            store_error,
        };
        tracing::info!(
            final_score,
            tries = summary.tries,
            elapsed_secs = summary.elapsed_secs,
            "game won"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::highscore::MemoryStore;

    fn abab() -> Deck {
        Deck::from_layout(vec![Symbol(0), Symbol(1), Symbol(0), Symbol(1)]).unwrap()
    }

    #[test]
    fn symbol_at_hides_face_down_cards() {
        let mut engine = GameEngine::from_deck(
            abab(),
            MemoryStore::new(),
            ManualClock::new(),
            EngineConfig::default(),
        );
        assert_eq!(engine.symbol_at(1), None);
        engine.flip(1).unwrap();
        assert_eq!(engine.symbol_at(1), Some(Symbol(1)));
        assert_eq!(engine.symbol_at(99), None);
    }

    #[test]
    fn resolve_mismatch_keeps_new_first_card() {
        let mut engine = GameEngine::from_deck(
            abab(),
            MemoryStore::new(),
            ManualClock::new(),
            EngineConfig::default(),
        );
        engine.flip(0).unwrap();
        engine.flip(1).unwrap();
        // third card goes up before the mismatch is cleared
        engine.flip(2).unwrap();
        assert_eq!(engine.pending_first(), Some(2));

        assert_eq!(engine.resolve_mismatch(0, 2).unwrap(), 1);
        assert_eq!(engine.tile_state(0), Some(TileState::Hidden));
        assert_eq!(engine.tile_state(2), Some(TileState::Pending));
    }

    #[test]
    fn restart_keeps_symbol_set() {
        let mut engine = GameEngine::new(
            &Symbol::range(5),
            MemoryStore::new(),
            ManualClock::new(),
            EngineConfig::with_seed(3),
        )
        .unwrap();
        engine.flip(0).unwrap();
        engine.restart().unwrap();
        assert_eq!(engine.deck_size(), 10);
        assert_eq!(engine.session().flip_count(), 0);
        assert_eq!(engine.deck.symbols(), Symbol::range(5));
    }
}
