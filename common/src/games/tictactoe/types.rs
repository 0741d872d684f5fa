use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 3;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Option<Mark> {
        match self {
            Mark::X => Some(Mark::O),
            Mark::O => Some(Mark::X),
            Mark::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Mark::Empty
    }

    pub fn to_char(&self) -> char {
        match self {
            Mark::Empty => '_',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Mark> {
        match c {
            'X' | 'x' => Some(Mark::X),
            'O' | 'o' => Some(Mark::O),
            '_' | '.' | ' ' => Some(Mark::Empty),
            _ => None,
        }
    }
}

/// Logical seat at the table. Player 1 always plays `X` and moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSlot {
    Player1,
    Player2,
}

impl PlayerSlot {
    pub fn mark(&self) -> Mark {
        match self {
            PlayerSlot::Player1 => Mark::X,
            PlayerSlot::Player2 => Mark::O,
        }
    }

    pub fn other(&self) -> PlayerSlot {
        match self {
            PlayerSlot::Player1 => PlayerSlot::Player2,
            PlayerSlot::Player2 => PlayerSlot::Player1,
        }
    }

    pub fn from_mark(mark: Mark) -> Option<PlayerSlot> {
        match mark {
            Mark::X => Some(PlayerSlot::Player1),
            Mark::O => Some(PlayerSlot::Player2),
            Mark::Empty => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Player1Won,
    Player2Won,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Winner(PlayerSlot),
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    #[default]
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("Unknown difficulty '{}', expected easy, medium or hard", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn from_index(index: usize) -> Self {
        Self {
            row: index / BOARD_SIZE,
            col: index % BOARD_SIZE,
        }
    }

    pub fn to_index(&self) -> usize {
        self.row * BOARD_SIZE + self.col
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    pub mark: Mark,
    pub cells: [usize; 3],
}

impl WinningLine {
    pub fn new(mark: Mark, cells: [usize; 3]) -> Self {
        Self { mark, cells }
    }

    pub fn start(&self) -> Position {
        Position::from_index(self.cells[0])
    }

    pub fn end(&self) -> Position {
        Position::from_index(self.cells[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_of_marks() {
        assert_eq!(Mark::X.opponent(), Some(Mark::O));
        assert_eq!(Mark::O.opponent(), Some(Mark::X));
        assert_eq!(Mark::Empty.opponent(), None);
    }

    #[test]
    fn test_player_slot_marks() {
        assert_eq!(PlayerSlot::Player1.mark(), Mark::X);
        assert_eq!(PlayerSlot::Player2.mark(), Mark::O);
        assert_eq!(PlayerSlot::Player1.other(), PlayerSlot::Player2);
        assert_eq!(PlayerSlot::from_mark(Mark::O), Some(PlayerSlot::Player2));
        assert_eq!(PlayerSlot::from_mark(Mark::Empty), None);
    }

    #[test]
    fn test_position_index_is_row_major() {
        assert_eq!(Position::new(0, 2).to_index(), 2);
        assert_eq!(Position::new(2, 0).to_index(), 6);
        assert_eq!(Position::from_index(5), Position::new(1, 2));
    }

    #[test]
    fn test_difficulty_serializes_lowercase() {
        let yaml = serde_yaml_ng::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(yaml.trim(), "medium");
        let parsed: Difficulty = serde_yaml_ng::from_str("easy").unwrap();
        assert_eq!(parsed, Difficulty::Easy);
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("Hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("medium".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert!("impossible".parse::<Difficulty>().is_err());
    }
}
