use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::games::SessionRng;
use crate::log_debug;
use super::board::{Board, get_available_moves};
use super::types::{Difficulty, Mark};
use super::win_detector::{has_line, is_full};

pub const DEFAULT_MAX_DEPTH: usize = 4;
const WIN_SCORE: i32 = 10;
const MEDIUM_RANDOM_PROBABILITY: f64 = 0.5;

/// Search horizon for the optimal policy. A position still open at the
/// horizon scores as a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    pub max_depth: Option<usize>,
    #[serde(default)]
    pub memoize: bool,
}

impl SearchLimits {
    pub fn unbounded() -> Self {
        Self {
            max_depth: None,
            memoize: false,
        }
    }

    pub fn with_memo(self) -> Self {
        Self {
            memoize: true,
            ..self
        }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            memoize: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    pub nodes: u64,
    pub memo_hits: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Score of every empty cell as the mover's next move, in index order.
    pub scores: Vec<(usize, i32)>,
    pub stats: SearchStats,
}

impl SearchOutcome {
    /// First cell with the strictly greatest score.
    pub fn best_move(&self) -> Option<(usize, i32)> {
        let mut best: Option<(usize, i32)> = None;
        for &(index, score) in &self.scores {
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((index, score));
            }
        }
        best
    }
}

/// Picks a cell for `own` to play. Returns `None` only for a full board.
pub fn select_move(
    board: &mut Board,
    own: Mark,
    opponent: Mark,
    difficulty: Difficulty,
    limits: &SearchLimits,
    rng: &mut SessionRng,
) -> Option<usize> {
    debug_assert!(!own.is_empty() && !opponent.is_empty(), "marks must be non-empty");
    debug_assert_ne!(own, opponent, "players must use distinct marks");

    match difficulty {
        Difficulty::Easy => calculate_random_move(board, rng),
        Difficulty::Medium => {
            if rng.chance(MEDIUM_RANDOM_PROBABILITY) {
                calculate_random_move(board, rng)
            } else {
                calculate_optimal_move(board, own, opponent, limits, rng)
            }
        }
        Difficulty::Hard => calculate_optimal_move(board, own, opponent, limits, rng),
    }
}

pub fn calculate_random_move(board: &Board, rng: &mut SessionRng) -> Option<usize> {
    rng.choose(&get_available_moves(board))
}

fn calculate_optimal_move(
    board: &mut Board,
    own: Mark,
    opponent: Mark,
    limits: &SearchLimits,
    rng: &mut SessionRng,
) -> Option<usize> {
    match calculate_minimax_move(board, own, opponent, limits) {
        Some(index) => Some(index),
        None => {
            log_debug!("Minimax found no move, falling back to a random cell");
            calculate_random_move(board, rng)
        }
    }
}

pub fn calculate_minimax_move(
    board: &mut Board,
    own: Mark,
    opponent: Mark,
    limits: &SearchLimits,
) -> Option<usize> {
    let outcome = evaluate_moves(board, own, opponent, limits);
    let (index, score) = outcome.best_move()?;
    log_debug!(
        "Minimax picked cell {} for {:?} (score {}, {} nodes, {} memo hits)",
        index,
        own,
        score,
        outcome.stats.nodes,
        outcome.stats.memo_hits
    );
    Some(index)
}

/// Scores every empty cell with the pruned search.
pub fn evaluate_moves(
    board: &mut Board,
    own: Mark,
    opponent: Mark,
    limits: &SearchLimits,
) -> SearchOutcome {
    let mut searcher = Searcher::new(own, opponent, limits);
    let mut scores = Vec::new();

    for index in get_available_moves(board) {
        let mut trial = board.trial(index, own);
        let score = searcher.minimax(&mut trial, 0, false, i32::MIN, i32::MAX);
        scores.push((index, score));
    }

    SearchOutcome {
        scores,
        stats: searcher.stats,
    }
}

/// Scores every empty cell by walking the whole tree up to `max_depth`
/// without pruning or memoization.
pub fn evaluate_moves_exhaustive(
    board: &mut Board,
    own: Mark,
    opponent: Mark,
    max_depth: Option<usize>,
) -> SearchOutcome {
    let mut stats = SearchStats::default();
    let mut scores = Vec::new();

    for index in get_available_moves(board) {
        let mut trial = board.trial(index, own);
        let score = minimax_exhaustive(&mut trial, own, opponent, 0, false, max_depth, &mut stats);
        scores.push((index, score));
    }

    SearchOutcome { scores, stats }
}

fn terminal_score(board: &Board, own: Mark, opponent: Mark, depth: usize) -> Option<i32> {
    if has_line(board, own) {
        return Some(WIN_SCORE - depth as i32);
    }
    if has_line(board, opponent) {
        return Some(depth as i32 - WIN_SCORE);
    }
    if is_full(board) {
        return Some(0);
    }
    None
}

fn minimax_exhaustive(
    board: &mut Board,
    own: Mark,
    opponent: Mark,
    depth: usize,
    is_maximizing: bool,
    max_depth: Option<usize>,
    stats: &mut SearchStats,
) -> i32 {
    stats.nodes += 1;
    if let Some(score) = terminal_score(board, own, opponent, depth) {
        return score;
    }
    if max_depth.is_some_and(|max| depth >= max) {
        return 0;
    }

    let mover = if is_maximizing { own } else { opponent };
    let child_scores = get_available_moves(board).into_iter().map(|index| {
        let mut trial = board.trial(index, mover);
        minimax_exhaustive(&mut trial, own, opponent, depth + 1, !is_maximizing, max_depth, stats)
    });

    let best = if is_maximizing {
        child_scores.max()
    } else {
        child_scores.min()
    };
    best.unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct MemoKey {
    board: Board,
    is_maximizing: bool,
    remaining_depth: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Debug, Clone, Copy)]
struct MemoEntry {
    score: i32,
    bound: Bound,
}

struct Searcher {
    own: Mark,
    opponent: Mark,
    max_depth: Option<usize>,
    memo: Option<HashMap<MemoKey, MemoEntry>>,
    stats: SearchStats,
}

impl Searcher {
    fn new(own: Mark, opponent: Mark, limits: &SearchLimits) -> Self {
        Self {
            own,
            opponent,
            max_depth: limits.max_depth,
            memo: limits.memoize.then(HashMap::new),
            stats: SearchStats::default(),
        }
    }

    fn minimax(
        &mut self,
        board: &mut Board,
        depth: usize,
        is_maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.stats.nodes += 1;

        if let Some(score) = terminal_score(board, self.own, self.opponent, depth) {
            return score;
        }
        if self.max_depth.is_some_and(|max| depth >= max) {
            return 0;
        }

        let key = MemoKey {
            board: *board,
            is_maximizing,
            remaining_depth: self.max_depth.map(|max| max - depth),
        };
        let (alpha_orig, beta_orig) = (alpha, beta);

        if let Some(entry) = self.memo.as_ref().and_then(|memo| memo.get(&key).copied()) {
            self.stats.memo_hits += 1;
            match entry.bound {
                Bound::Exact => return entry.score,
                Bound::Lower => alpha = alpha.max(entry.score),
                Bound::Upper => beta = beta.min(entry.score),
            }
            if beta <= alpha {
                return entry.score;
            }
        }

        let moves = get_available_moves(board);

        let best = if is_maximizing {
            let mut max_eval = i32::MIN;
            for index in moves {
                let mut trial = board.trial(index, self.own);
                let eval = self.minimax(&mut trial, depth + 1, false, alpha, beta);

                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    break;
                }
            }
            max_eval
        } else {
            let mut min_eval = i32::MAX;
            for index in moves {
                let mut trial = board.trial(index, self.opponent);
                let eval = self.minimax(&mut trial, depth + 1, true, alpha, beta);

                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    break;
                }
            }
            min_eval
        };

        if let Some(memo) = self.memo.as_mut() {
            let bound = if best <= alpha_orig {
                Bound::Upper
            } else if best >= beta_orig {
                Bound::Lower
            } else {
                Bound::Exact
            };
            memo.insert(key, MemoEntry { score: best, bound });
        }

        best
    }
}
