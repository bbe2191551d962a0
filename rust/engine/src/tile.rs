use serde::{Deserialize, Serialize};

/// Visibility of one deck position.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
pub enum TileState {
    /// Face down.
    #[default]
    Hidden,
    /// Face up and waiting: either the first card of a pair, or half of a
    /// mismatch the caller has not resolved yet.
    Pending,
    /// Locked face up after a successful pair.
    Matched,
}

impl TileState {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::Pending | Self::Matched)
    }
}
