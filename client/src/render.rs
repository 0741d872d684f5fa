use common::games::tictactoe::{BOARD_SIZE, Board, SymbolPair, WinningLine};

const NUMBER_KEYS: [&str; 9] = ["1️⃣", "2️⃣", "3️⃣", "4️⃣", "5️⃣", "6️⃣", "7️⃣", "8️⃣", "9️⃣"];

/// Board with the key to press shown in every empty cell.
pub fn render_board(board: &Board, symbols: &SymbolPair) -> String {
    let mut out = String::new();
    for row in 0..BOARD_SIZE {
        let cells: Vec<&str> = (0..BOARD_SIZE)
            .map(|col| {
                let index = row * BOARD_SIZE + col;
                let mark = board[index];
                if mark.is_empty() {
                    NUMBER_KEYS[index]
                } else {
                    symbols.for_mark(mark)
                }
            })
            .collect();
        out.push(' ');
        out.push_str(&cells.join(" │ "));
        out.push('\n');
        if row + 1 < BOARD_SIZE {
            out.push_str("────┼────┼────\n");
        }
    }
    out
}

pub fn describe_line(line: &WinningLine) -> String {
    let start = line.start();
    let end = line.end();
    format!(
        "row {} col {} to row {} col {}",
        start.row + 1,
        start.col + 1,
        end.row + 1,
        end.col + 1
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::games::tictactoe::winning_line;

    #[test]
    fn test_empty_cells_show_keys() {
        let board: Board = "X___O____".parse().unwrap();
        let text = render_board(&board, &SymbolPair::default());
        assert!(text.starts_with(" ❌ │ 2️⃣ │ 3️⃣\n"));
        assert!(text.contains("⭕"));
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn test_describe_diagonal() {
        let board: Board = "__X_X_X__".parse().unwrap();
        let line = winning_line(&board).unwrap();
        assert_eq!(describe_line(&line), "row 1 col 3 to row 3 col 1");
    }
}
