use std::fmt;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::games::tictactoe::{BOARD_SIZE, Board, SymbolPair};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Local wall-clock time, `HH:MM:SS`.
    pub timestamp: String,
    /// Winner's display name, or "Draw".
    pub winner: String,
    pub board: Board,
}

#[derive(Serialize)]
struct HistoryRecord<'a> {
    timestamp: &'a str,
    winner: &'a str,
    board: String,
}

impl<'a> From<&'a HistoryEntry> for HistoryRecord<'a> {
    fn from(entry: &'a HistoryEntry) -> Self {
        Self {
            timestamp: &entry.timestamp,
            winner: &entry.winner,
            board: entry.board.to_text(),
        }
    }
}

#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "IO error: {}", e),
            ExportError::Csv(e) => write!(f, "CSV error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::Io(e)
    }
}

impl From<csv::Error> for ExportError {
    fn from(e: csv::Error) -> Self {
        ExportError::Csv(e)
    }
}

/// Three rows of symbols, each ending in a newline.
pub fn render_board_snapshot(board: &Board, symbols: &SymbolPair) -> String {
    let mut out = String::new();
    for (i, &mark) in board.cells().iter().enumerate() {
        out.push_str(symbols.for_mark(mark));
        if i % BOARD_SIZE == BOARD_SIZE - 1 {
            out.push('\n');
        }
    }
    out
}

pub fn export_csv<W: Write>(entries: &[HistoryEntry], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if entries.is_empty() {
        csv_writer.write_record(["timestamp", "winner", "board"])?;
    }
    for entry in entries {
        csv_writer.serialize(HistoryRecord::from(entry))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn export_csv_to_path(entries: &[HistoryEntry], path: &Path) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    export_csv(entries, std::io::BufWriter::new(file))
}
