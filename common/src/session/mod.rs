mod history;
mod scoreboard;
mod timer;

pub use history::{ExportError, HistoryEntry, export_csv, export_csv_to_path, render_board_snapshot};
pub use scoreboard::{DRAW_LABEL, PlayerNames, Scoreboard, Scores, Streaks};
pub use timer::TurnTimer;
