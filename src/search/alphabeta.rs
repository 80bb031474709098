use pleco::{BitMove, Board};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::MoveGuard;
use crate::book::Book;
use crate::search::eval::{eval_cp, DRAW_SCORE, INF_SCORE, MATE_SCORE};

/// Plies searched below each root move before quiescence takes over.
pub const DEFAULT_DEPTH: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub bestmove: Option<BitMove>,
    pub score_cp: i32,
    pub nodes: u64,
}

/// Single-threaded fixed-depth searcher. The caller owns the board for the
/// duration of a call; every move applied during search is undone before
/// control returns.
pub struct Searcher {
    depth: u32,
    nodes: u64,
    book: Option<Book>,
    rng: SmallRng,
}

impl Default for Searcher {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            nodes: 0,
            book: None,
            rng: SmallRng::from_entropy(),
        }
    }
}

impl Searcher {
    pub fn with_depth(depth: u32) -> Self {
        Self { depth: depth.max(1), ..Self::default() }
    }

    pub fn set_depth(&mut self, depth: u32) { self.depth = depth.max(1); }
    pub fn set_book(&mut self, book: Book) { self.book = Some(book); }
    pub fn nodes(&self) -> u64 { self.nodes }

    /// Pick a move for the side to act. The book answers first when it can;
    /// otherwise every root move is searched to the configured depth.
    ///
    /// Panics if the position has no legal move: game-over detection is the
    /// caller's job and must happen before asking for a move.
    pub fn select_move(&mut self, board: &mut Board) -> BitMove {
        if let Some(book) = self.book.as_ref() {
            if let Some(mv) = book.probe(board, &mut self.rng) {
                log::debug!("book hit: {}", mv);
                return mv;
            }
        }
        let result = self.search_root(board);
        result.bestmove.expect("select_move called on a finished game")
    }

    /// Search every legal root move and keep the strictly-best score, so
    /// ties go to the first move enumerated.
    pub fn search_root(&mut self, board: &mut Board) -> SearchResult {
        self.nodes = 0;
        let mut alpha = -INF_SCORE;
        let beta = INF_SCORE;
        let mut bestmove: Option<BitMove> = None;
        let mut best_score = -INF_SCORE;
        let moves: Vec<BitMove> = board.generate_moves().iter().copied().collect();
        for m in moves {
            let mut child = MoveGuard::apply(board, m);
            // The root move is already played, so the opponent minimizes.
            let score = self.minimax(&mut child, self.depth, alpha, beta, false);
            drop(child);
            if score > best_score {
                best_score = score;
                bestmove = Some(m);
            }
            if score > alpha { alpha = score; }
        }
        SearchResult { bestmove, score_cp: best_score, nodes: self.nodes }
    }

    /// Fail-hard alpha-beta over a score space fixed to the root mover's
    /// perspective; `maximizing` is true exactly when the root mover is the
    /// side to act.
    fn minimax(&mut self, board: &mut Board, depth: u32, mut alpha: i32, mut beta: i32, maximizing: bool) -> i32 {
        self.nodes += 1;
        // Mover checkmated. The sentinel is not depth-scaled: a mate in one
        // and a mate in five score the same.
        if board.checkmate() {
            return if maximizing { -MATE_SCORE } else { MATE_SCORE };
        }
        if depth == 0 {
            // Quiescence runs mover-relative; flip window and sign when the
            // minimizing side is the mover.
            return if maximizing {
                self.qsearch(board, alpha, beta)
            } else {
                -self.qsearch(board, -beta, -alpha)
            };
        }
        let moves: Vec<BitMove> = board.generate_moves().iter().copied().collect();
        if moves.is_empty() {
            return DRAW_SCORE; // stalemate
        }
        if maximizing {
            let mut best = -INF_SCORE;
            for m in moves {
                let mut child = MoveGuard::apply(board, m);
                let score = self.minimax(&mut child, depth - 1, alpha, beta, false);
                drop(child);
                if score > best { best = score; }
                if score > alpha { alpha = score; }
                if beta <= alpha { break; }
            }
            best
        } else {
            let mut best = INF_SCORE;
            for m in moves {
                let mut child = MoveGuard::apply(board, m);
                let score = self.minimax(&mut child, depth - 1, alpha, beta, true);
                drop(child);
                if score < best { best = score; }
                if score < beta { beta = score; }
                if beta <= alpha { break; }
            }
            best
        }
    }

    /// Horizon extension: stand pat, then captures and checking moves only.
    fn qsearch(&mut self, board: &mut Board, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;
        // Stand pat
        let stand = eval_cp(board);
        if stand >= beta { return beta; }
        if stand > alpha { alpha = stand; }

        let moves: Vec<BitMove> = board.generate_moves().iter().copied().collect();
        for m in moves {
            let capture = m.is_capture();
            let mut child = MoveGuard::apply(board, m);
            // Quiet moves end the extension: only captures and moves that
            // leave the opponent in check are explored.
            if !capture && !child.in_check() { continue; }
            let score = -self.qsearch(&mut child, -beta, -alpha);
            drop(child);
            if score >= beta { return beta; }
            if score > alpha { alpha = score; }
        }
        alpha
    }

    /// Quiescence score of a position under a full window, for tests and
    /// benches.
    pub fn qsearch_eval_cp(&mut self, board: &mut Board) -> i32 {
        self.qsearch(board, -INF_SCORE, INF_SCORE)
    }
}
