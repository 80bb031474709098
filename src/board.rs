use std::ops::{Deref, DerefMut};

use pleco::{BitMove, Board};

/// Applies a move on construction and undoes it on drop, keeping the
/// apply/undo pair balanced on every exit path out of the search.
pub struct MoveGuard<'a> {
    board: &'a mut Board,
}

impl<'a> MoveGuard<'a> {
    pub fn apply(board: &'a mut Board, mv: BitMove) -> Self {
        board.apply_move(mv);
        Self { board }
    }
}

impl Deref for MoveGuard<'_> {
    type Target = Board;
    fn deref(&self) -> &Board { self.board }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Board { self.board }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) { self.board.undo_move(); }
}

/// Locate a legal move by its UCI string.
pub fn find_move_uci(board: &Board, uci: &str) -> Option<BitMove> {
    board.generate_moves().iter().copied().find(|m| format!("{}", m) == uci)
}

/// Replay a UCI move sequence from the start position.
pub fn board_from_moves<S: AsRef<str>>(moves: &[S]) -> Result<Board, String> {
    let mut board = Board::start_pos();
    for uci in moves {
        let uci = uci.as_ref();
        match find_move_uci(&board, uci) {
            Some(mv) => board.apply_move(mv),
            None => return Err(format!("Illegal move: {}", uci)),
        }
    }
    Ok(board)
}
