// Move selection for one side: fixed-depth alpha-beta over a pleco board,
// with an opening-book short circuit.
pub mod board;
pub mod book;
pub mod search;
