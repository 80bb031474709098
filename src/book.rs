use std::collections::HashMap;
use std::fs;
use std::path::Path;

use pleco::{BitMove, Board};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::find_move_uci;

/// One book line: a named UCI move sequence from the start position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningLine {
    pub name: String,
    pub moves: Vec<String>,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 { 1 }

#[derive(Debug, Error)]
pub enum BookError {
    #[error("failed to read opening book {path}: {source}")]
    Io { path: String, source: std::io::Error },
    #[error("malformed opening book {path}: {source}")]
    Parse { path: String, source: serde_json::Error },
}

#[derive(Debug, Clone)]
struct Candidate {
    uci: String,
    weight: u32,
}

/// Opening book indexed by position hash. Probing is best-effort: any miss,
/// including a book that failed to load, routes the caller back to search.
#[derive(Debug, Clone, Default)]
pub struct Book {
    index: HashMap<u64, Vec<Candidate>>,
}

impl Book {
    /// Index every prefix position of every line. Weights for the same move
    /// reached from different lines accumulate.
    pub fn from_lines(lines: &[OpeningLine]) -> Self {
        let mut index: HashMap<u64, Vec<Candidate>> = HashMap::new();
        for line in lines {
            let mut board = Board::start_pos();
            for uci in &line.moves {
                let mv = match find_move_uci(&board, uci) {
                    Some(mv) => mv,
                    None => {
                        log::warn!("book line {:?}: illegal move {}, truncating", line.name, uci);
                        break;
                    }
                };
                let entry = index.entry(board.zobrist()).or_default();
                match entry.iter_mut().find(|c| c.uci == *uci) {
                    Some(c) => c.weight += line.weight.max(1),
                    None => entry.push(Candidate { uci: uci.clone(), weight: line.weight.max(1) }),
                }
                board.apply_move(mv);
            }
        }
        Self { index }
    }

    /// Load a JSON book file (a `Vec<OpeningLine>`).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, BookError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|source| BookError::Io { path: path.display().to_string(), source })?;
        let lines: Vec<OpeningLine> = serde_json::from_str(&raw)
            .map_err(|source| BookError::Parse { path: path.display().to_string(), source })?;
        Ok(Self::from_lines(&lines))
    }

    /// Built-in mainline openings, used when no book file is supplied.
    pub fn builtin() -> Self {
        Self::from_lines(&builtin_lines())
    }

    /// Weighted-random recommendation for the current position, or `None`.
    pub fn probe<R: Rng>(&self, board: &Board, rng: &mut R) -> Option<BitMove> {
        let candidates = self.index.get(&board.zobrist())?;
        let total: u32 = candidates.iter().map(|c| c.weight).sum();
        if total == 0 { return None; }
        let mut roll = rng.gen_range(0..total);
        for c in candidates {
            if roll < c.weight {
                // Re-validate against the live board; a stale or colliding
                // entry is a miss, not a fault.
                return find_move_uci(board, &c.uci);
            }
            roll -= c.weight;
        }
        None
    }

    pub fn positions(&self) -> usize { self.index.len() }
    pub fn is_empty(&self) -> bool { self.index.is_empty() }
}

fn line(name: &str, weight: u32, moves: &[&str]) -> OpeningLine {
    OpeningLine {
        name: name.to_string(),
        moves: moves.iter().map(|m| (*m).to_string()).collect(),
        weight,
    }
}

/// Default line set: 4 moves (8 half-moves) per opening in UCI notation.
fn builtin_lines() -> Vec<OpeningLine> {
    vec![
        line("Italian Game", 3,
             &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "f8c5", "e1g1", "g8f6"]),
        line("Ruy Lopez", 3,
             &["e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "a7a6", "b5a4", "g8f6"]),
        line("Queen's Gambit", 3,
             &["d2d4", "d7d5", "c2c4", "e7e6", "b1c3", "g8f6", "c1g5", "f8e7"]),
        line("Sicilian Defense", 3,
             &["e2e4", "c7c5", "g1f3", "d7d6", "d2d4", "c5d4", "f3d4", "g8f6"]),
        line("French Defense", 2,
             &["e2e4", "e7e6", "d2d4", "d7d5", "b1c3", "f8b4", "e4e5", "c7c5"]),
        line("King's Indian Defense", 2,
             &["d2d4", "g8f6", "c2c4", "g7g6", "b1c3", "f8g7", "e2e4", "d7d6"]),
        line("English Opening", 2,
             &["c2c4", "e7e5", "b1c3", "g8f6", "g2g3", "d7d5", "c4d5", "f6d5"]),
        line("Caro-Kann Defense", 2,
             &["e2e4", "c7c6", "d2d4", "d7d5", "b1c3", "d5e4", "c3e4", "c8f5"]),
        line("Scotch Game", 1,
             &["e2e4", "e7e5", "g1f3", "b8c6", "d2d4", "e5d4", "f3d4", "f8c5"]),
        line("Nimzo-Indian Defense", 1,
             &["d2d4", "g8f6", "c2c4", "e7e6", "b1c3", "f8b4", "e2e3", "e8g8"]),
        line("Scandinavian Defense", 1,
             &["e2e4", "d7d5", "e4d5", "d8d5", "b1c3", "d5a5", "d2d4", "g8f6"]),
        line("London System", 1,
             &["d2d4", "d7d5", "g1f3", "g8f6", "c1f4", "c7c5", "e2e3", "b8c6"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn builtin_book_covers_startpos() {
        let book = Book::builtin();
        assert!(!book.is_empty());
        let board = Board::start_pos();
        let mut rng = SmallRng::seed_from_u64(7);
        let mv = book.probe(&board, &mut rng).expect("startpos must be in book");
        assert!(find_move_uci(&board, &format!("{}", mv)).is_some(), "book move must be legal");
    }

    #[test]
    fn shared_prefix_accumulates_weight() {
        let lines = vec![
            line("A", 2, &["e2e4", "e7e5"]),
            line("B", 3, &["e2e4", "c7c5"]),
        ];
        let book = Book::from_lines(&lines);
        let start = Board::start_pos().zobrist();
        let cands = book.index.get(&start).expect("startpos indexed");
        assert_eq!(cands.len(), 1, "e2e4 must be deduplicated");
        assert_eq!(cands[0].weight, 5);
    }

    #[test]
    fn illegal_move_truncates_line() {
        let lines = vec![line("bad", 1, &["e2e4", "e2e4"])];
        let book = Book::from_lines(&lines);
        // Only the legal first move gets indexed.
        assert_eq!(book.positions(), 1);
    }

    #[test]
    fn probe_off_book_is_none() {
        let book = Book::builtin();
        let board = crate::board::board_from_moves(&["a2a3", "h7h6", "a3a4"]).unwrap();
        let mut rng = SmallRng::seed_from_u64(7);
        assert!(book.probe(&board, &mut rng).is_none());
    }
}
