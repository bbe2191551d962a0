use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity of one card face.
///
/// Every symbol in a [`crate::deck::Deck`] appears exactly twice. The engine
/// only compares symbols for equality; mapping a symbol to an image or glyph
/// is left to whoever renders the board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Symbol(pub u16);

impl Symbol {
    /// Returns `count` distinct symbols numbered `0..count`.
    pub fn range(count: u16) -> Vec<Symbol> {
        (0..count).map(Symbol).collect()
    }

    pub fn id(self) -> u16 {
        self.0
    }
}

impl From<u16> for Symbol {
    fn from(id: u16) -> Self {
        Symbol(id)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
