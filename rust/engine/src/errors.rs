use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid position: {position} (deck size {deck_size})")]
    InvalidPosition { position: usize, deck_size: usize },
    #[error("Highscore store unavailable: {0}")]
    StoreUnavailable(String),
}
