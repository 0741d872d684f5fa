mod board;
mod bot_controller;
mod game_state;
mod symbols;
mod types;
mod validate;
mod win_detector;

pub use board::{Board, TrialMove, get_available_moves};
pub use bot_controller::{
    DEFAULT_MAX_DEPTH, SearchLimits, SearchOutcome, SearchStats, calculate_minimax_move,
    calculate_random_move, evaluate_moves, evaluate_moves_exhaustive, select_move,
};
pub use game_state::TicTacToeGameState;
pub use symbols::{EMPTY_CELL_SYMBOL, SYMBOL_PALETTE, SymbolPair};
pub use types::{
    BOARD_SIZE, CELL_COUNT, Difficulty, GameStatus, Mark, PlayerSlot, Position, RoundOutcome,
    WinningLine,
};
pub use win_detector::{WIN_PATTERNS, check_win, has_line, is_full, winning_line};
