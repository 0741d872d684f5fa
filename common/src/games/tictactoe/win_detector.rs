use super::board::Board;
use super::types::{Mark, WinningLine};

pub const WIN_PATTERNS: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub fn has_line(board: &Board, mark: Mark) -> bool {
    debug_assert!(!mark.is_empty(), "has_line called with the empty mark");
    if mark.is_empty() {
        return false;
    }

    WIN_PATTERNS
        .iter()
        .any(|pattern| pattern.iter().all(|&i| board[i] == mark))
}

pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|cell| !cell.is_empty())
}

pub fn check_win(board: &Board) -> Option<Mark> {
    winning_line(board).map(|line| line.mark)
}

pub fn winning_line(board: &Board) -> Option<WinningLine> {
    for mark in [Mark::X, Mark::O] {
        for pattern in WIN_PATTERNS {
            if pattern.iter().all(|&i| board[i] == mark) {
                return Some(WinningLine::new(mark, pattern));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    #[test]
    fn test_empty_board_has_no_line() {
        let b = Board::new();
        assert!(!has_line(&b, Mark::X));
        assert!(!has_line(&b, Mark::O));
        assert!(!is_full(&b));
        assert_eq!(check_win(&b), None);
    }

    #[test]
    fn test_every_pattern_is_detected() {
        for pattern in WIN_PATTERNS {
            let mut b = Board::new();
            for i in pattern {
                b.set(i, Mark::O);
            }
            assert!(has_line(&b, Mark::O), "pattern {:?}", pattern);
            assert!(!has_line(&b, Mark::X), "pattern {:?}", pattern);
            assert_eq!(winning_line(&b), Some(WinningLine::new(Mark::O, pattern)));
        }
    }

    #[test]
    fn test_two_in_a_row_is_not_a_line() {
        let b = board("XX_OO____");
        assert!(!has_line(&b, Mark::X));
        assert!(!has_line(&b, Mark::O));
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let b = board("XOX______");
        assert_eq!(check_win(&b), None);
    }

    #[test]
    fn test_full_board_without_line_is_draw_state() {
        let b = board("XOXXOOOXX");
        assert!(is_full(&b));
        assert!(!has_line(&b, Mark::X));
        assert!(!has_line(&b, Mark::O));
    }

    #[test]
    fn test_full_board_with_line() {
        let b = board("XXXOOXXOO");
        assert!(is_full(&b));
        assert_eq!(check_win(&b), Some(Mark::X));
    }

    #[test]
    fn test_has_line_matches_brute_force_for_all_boards() {
        let marks = [Mark::Empty, Mark::X, Mark::O];
        for code in 0..3usize.pow(9) {
            let mut b = Board::new();
            let mut rest = code;
            for i in 0..9 {
                b.set(i, marks[rest % 3]);
                rest /= 3;
            }

            for mark in [Mark::X, Mark::O] {
                let expected = (0..3).any(|r| (0..3).all(|c| b[r * 3 + c] == mark))
                    || (0..3).any(|c| (0..3).all(|r| b[r * 3 + c] == mark))
                    || (0..3).all(|d| b[d * 4] == mark)
                    || (0..3).all(|d| b[2 + d * 2] == mark);
                assert_eq!(has_line(&b, mark), expected, "board {}", b);
            }
            assert_eq!(is_full(&b), b.empty_count() == 0);
        }
    }

    #[test]
    fn test_winning_line_endpoints() {
        let b = board("__O_O_O__");
        let line = winning_line(&b).unwrap();
        assert_eq!(line.mark, Mark::O);
        assert_eq!(line.start().to_index(), 2);
        assert_eq!(line.end().to_index(), 6);
    }
}
