use crate::games::SessionRng;
use super::board::Board;
use super::bot_controller::{SearchLimits, select_move};
use super::types::{CELL_COUNT, Difficulty, GameStatus, PlayerSlot, RoundOutcome};
use super::win_detector::{has_line, is_full};

#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    board: Board,
    current_player: PlayerSlot,
    status: GameStatus,
    last_move: Option<usize>,
}

impl Default for TicTacToeGameState {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToeGameState {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: PlayerSlot::Player1,
            status: GameStatus::InProgress,
            last_move: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> PlayerSlot {
        self.current_player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.status {
            GameStatus::InProgress => None,
            GameStatus::Player1Won => Some(RoundOutcome::Winner(PlayerSlot::Player1)),
            GameStatus::Player2Won => Some(RoundOutcome::Winner(PlayerSlot::Player2)),
            GameStatus::Draw => Some(RoundOutcome::Draw),
        }
    }

    pub fn reset(&mut self) {
        self.board.clear();
        self.current_player = PlayerSlot::Player1;
        self.status = GameStatus::InProgress;
        self.last_move = None;
    }

    pub fn place_mark(&mut self, player: PlayerSlot, index: usize) -> Result<(), String> {
        if self.status != GameStatus::InProgress {
            return Err("Game is already over".to_string());
        }

        if player != self.current_player {
            return Err("Not your turn".to_string());
        }

        if index >= CELL_COUNT {
            return Err(format!("Cell {} is out of bounds", index));
        }

        if !self.board[index].is_empty() {
            return Err(format!("Cell {} is already marked", index));
        }

        self.board.set(index, player.mark());
        self.last_move = Some(index);

        self.check_game_over(player);

        if self.status == GameStatus::InProgress {
            self.current_player = player.other();
        }

        Ok(())
    }

    /// The current player ran out of time and loses the turn.
    pub fn forfeit_turn(&mut self) -> Result<PlayerSlot, String> {
        if self.status != GameStatus::InProgress {
            return Err("Game is already over".to_string());
        }
        let forfeited = self.current_player;
        self.current_player = forfeited.other();
        Ok(forfeited)
    }

    /// Lets the scripted opponent play for the current player.
    pub fn bot_move(
        &mut self,
        difficulty: Difficulty,
        limits: &SearchLimits,
        rng: &mut SessionRng,
    ) -> Result<usize, String> {
        if self.status != GameStatus::InProgress {
            return Err("Game is already over".to_string());
        }

        let player = self.current_player;
        let own = player.mark();
        let opponent = player.other().mark();
        let index = select_move(&mut self.board, own, opponent, difficulty, limits, rng)
            .ok_or_else(|| "No empty cell left".to_string())?;

        self.place_mark(player, index)?;
        Ok(index)
    }

    fn check_game_over(&mut self, mover: PlayerSlot) {
        if has_line(&self.board, mover.mark()) {
            self.status = match mover {
                PlayerSlot::Player1 => GameStatus::Player1Won,
                PlayerSlot::Player2 => GameStatus::Player2Won,
            };
            return;
        }

        if is_full(&self.board) {
            self.status = GameStatus::Draw;
        }
    }

    #[cfg(test)]
    pub(crate) fn set_board(&mut self, board: Board, current_player: PlayerSlot) {
        self.board = board;
        self.current_player = current_player;
    }
}
