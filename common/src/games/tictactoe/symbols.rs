use serde::{Deserialize, Serialize};

use super::types::{Mark, PlayerSlot};

pub const EMPTY_CELL_SYMBOL: &str = "⬜";

pub const SYMBOL_PALETTE: [&str; 6] = ["❌", "⭕", "😺", "🐶", "🌟", "🔥"];

/// Display symbols chosen by the two players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolPair {
    pub player1: String,
    pub player2: String,
}

impl SymbolPair {
    pub fn new(player1: impl Into<String>, player2: impl Into<String>) -> Self {
        Self {
            player1: player1.into(),
            player2: player2.into(),
        }
    }

    pub fn for_player(&self, player: PlayerSlot) -> &str {
        match player {
            PlayerSlot::Player1 => &self.player1,
            PlayerSlot::Player2 => &self.player2,
        }
    }

    pub fn for_mark(&self, mark: Mark) -> &str {
        match PlayerSlot::from_mark(mark) {
            Some(player) => self.for_player(player),
            None => EMPTY_CELL_SYMBOL,
        }
    }
}

impl Default for SymbolPair {
    fn default() -> Self {
        Self::new(SYMBOL_PALETTE[0], SYMBOL_PALETTE[1])
    }
}
