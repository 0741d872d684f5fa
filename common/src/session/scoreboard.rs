use chrono::Local;

use crate::games::tictactoe::{Board, PlayerSlot, RoundOutcome};
use super::history::HistoryEntry;

pub const DRAW_LABEL: &str = "Draw";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerNames {
    pub player1: String,
    pub player2: String,
}

impl PlayerNames {
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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scores {
    pub player1: u32,
    pub player2: u32,
    pub draws: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Streaks {
    pub player1: u32,
    pub player2: u32,
    pub last_winner: Option<PlayerSlot>,
}

impl Streaks {
    pub fn for_player(&self, player: PlayerSlot) -> u32 {
        match player {
            PlayerSlot::Player1 => self.player1,
            PlayerSlot::Player2 => self.player2,
        }
    }

    fn slot_mut(&mut self, player: PlayerSlot) -> &mut u32 {
        match player {
            PlayerSlot::Player1 => &mut self.player1,
            PlayerSlot::Player2 => &mut self.player2,
        }
    }

    fn record_win(&mut self, winner: PlayerSlot) {
        if self.last_winner == Some(winner) {
            *self.slot_mut(winner) += 1;
        } else {
            *self.slot_mut(winner) = 1;
            *self.slot_mut(winner.other()) = 0;
        }
        self.last_winner = Some(winner);
    }
}

/// Session-lifetime bookkeeping. Rounds are only ever appended.
#[derive(Debug, Clone, Default)]
pub struct Scoreboard {
    scores: Scores,
    streaks: Streaks,
    history: Vec<HistoryEntry>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn streaks(&self) -> Streaks {
        self.streaks
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Up to `count` most recent rounds, newest first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter().rev().take(count)
    }

    pub fn record(
        &mut self,
        outcome: RoundOutcome,
        names: &PlayerNames,
        board: Board,
        timestamp: String,
    ) -> &HistoryEntry {
        let winner = match outcome {
            RoundOutcome::Winner(player) => {
                match player {
                    PlayerSlot::Player1 => self.scores.player1 += 1,
                    PlayerSlot::Player2 => self.scores.player2 += 1,
                }
                self.streaks.record_win(player);
                names.for_player(player).to_string()
            }
            RoundOutcome::Draw => {
                self.scores.draws += 1;
                DRAW_LABEL.to_string()
            }
        };

        self.history.push(HistoryEntry {
            timestamp,
            winner,
            board,
        });
        &self.history[self.history.len() - 1]
    }

    pub fn record_now(
        &mut self,
        outcome: RoundOutcome,
        names: &PlayerNames,
        board: Board,
    ) -> &HistoryEntry {
        let timestamp = Local::now().format("%H:%M:%S").to_string();
        self.record(outcome, names, board, timestamp)
    }
}
