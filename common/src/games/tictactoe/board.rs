use std::fmt;
use std::ops::{Deref, DerefMut, Index};
use std::str::FromStr;

use super::types::{CELL_COUNT, Mark};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> &[Mark; CELL_COUNT] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    pub fn set(&mut self, index: usize, mark: Mark) {
        self.cells[index] = mark;
    }

    pub fn clear(&mut self) {
        self.cells = [Mark::Empty; CELL_COUNT];
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    /// Places `mark` on an empty cell for the lifetime of the returned guard.
    /// The cell is emptied again when the guard drops.
    pub fn trial(&mut self, index: usize, mark: Mark) -> TrialMove<'_> {
        debug_assert!(self.cells[index].is_empty(), "trial move on occupied cell {}", index);
        self.cells[index] = mark;
        TrialMove { board: self, index }
    }

    pub fn to_text(&self) -> String {
        self.cells.iter().map(Mark::to_char).collect()
    }
}

impl Index<usize> for Board {
    type Output = Mark;

    fn index(&self, index: usize) -> &Mark {
        &self.cells[index]
    }
}

impl FromStr for Board {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != CELL_COUNT {
            return Err(format!(
                "Board must have exactly {} cells, got {}",
                CELL_COUNT,
                chars.len()
            ));
        }

        let mut cells = [Mark::Empty; CELL_COUNT];
        for (i, c) in chars.into_iter().enumerate() {
            cells[i] = Mark::from_char(c).ok_or_else(|| format!("Invalid cell '{}' at {}", c, i))?;
        }
        Ok(Self { cells })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

pub struct TrialMove<'a> {
    board: &'a mut Board,
    index: usize,
}

impl Deref for TrialMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for TrialMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for TrialMove<'_> {
    fn drop(&mut self) {
        self.board.cells[self.index] = Mark::Empty;
    }
}

pub fn get_available_moves(board: &Board) -> Vec<usize> {
    board
        .cells()
        .iter()
        .enumerate()
        .filter(|(_, cell)| cell.is_empty())
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_print_round_trip() {
        let board: Board = "XX_OO____".parse().unwrap();
        assert_eq!(board[0], Mark::X);
        assert_eq!(board[3], Mark::O);
        assert_eq!(board[2], Mark::Empty);
        assert_eq!(board.to_text(), "XX_OO____");
    }

    #[test]
    fn test_parse_accepts_space_and_dot_as_empty() {
        let board: Board = "X. O     ".parse().unwrap();
        assert_eq!(board.empty_count(), 7);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!("XXO".parse::<Board>().is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_symbol() {
        let result = "XX_OO___Z".parse::<Board>();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("'Z'"));
    }

    #[test]
    fn test_available_moves_ascending() {
        let board: Board = "X_O_X_O__".parse().unwrap();
        assert_eq!(get_available_moves(&board), vec![1, 3, 5, 7, 8]);
    }

    #[test]
    fn test_trial_move_is_undone_on_drop() {
        let mut board: Board = "X________".parse().unwrap();
        {
            let trial = board.trial(4, Mark::O);
            assert_eq!(trial[4], Mark::O);
        }
        assert_eq!(board.to_text(), "X________");
    }

    #[test]
    fn test_nested_trial_moves_unwind() {
        let mut board = Board::new();
        {
            let mut first = board.trial(0, Mark::X);
            {
                let second = first.trial(8, Mark::O);
                assert_eq!(second.empty_count(), 7);
            }
            assert_eq!(first[8], Mark::Empty);
        }
        assert_eq!(board, Board::new());
    }
}
