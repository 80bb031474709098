use pleco::Board;

#[test]
fn knight_center_better_than_rim() {
    use ponderbot::search::eval::eval_cp;
    // White: Kh1, Nd4; Black: Ka8. White to move.
    let center = Board::from_fen("k7/8/8/8/3N4/8/8/7K w - - 0 1").unwrap();
    let rim = Board::from_fen("k7/8/8/8/8/8/8/N6K w - - 0 1").unwrap();
    let c = eval_cp(&center);
    let r = eval_cp(&rim);
    assert!(c > r, "center eval {c} should be greater than rim {r}");
}

#[test]
fn pawn_advanced_better_than_back() {
    use ponderbot::search::eval::eval_cp;
    // White pawn on e4 vs e2; kings only otherwise.
    let advanced = Board::from_fen("k7/8/8/8/4P3/8/8/7K w - - 0 1").unwrap();
    let back = Board::from_fen("k7/8/8/8/8/8/4P3/7K w - - 0 1").unwrap();
    let a = eval_cp(&advanced);
    let b = eval_cp(&back);
    assert!(a > b, "advanced pawn eval {a} should exceed back pawn {b}");
}

#[test]
fn startpos_is_exactly_balanced() {
    use ponderbot::search::eval::eval_white_cp;
    // Material and tables mirror perfectly at the start position.
    let board = Board::start_pos();
    assert_eq!(eval_white_cp(&board), 0);
}

#[test]
fn eval_is_side_to_move_relative() {
    use ponderbot::search::eval::{eval_cp, eval_white_cp};
    // Same material, only the side to move differs.
    let white_to_move = Board::from_fen("k7/8/8/8/3N4/8/8/7K w - - 0 1").unwrap();
    let black_to_move = Board::from_fen("k7/8/8/8/3N4/8/8/7K b - - 0 1").unwrap();
    assert_eq!(eval_white_cp(&white_to_move), eval_white_cp(&black_to_move));
    assert_eq!(eval_cp(&white_to_move), -eval_cp(&black_to_move));
}

#[test]
fn eval_unchanged_after_apply_undo_round_trip() {
    use ponderbot::board::find_move_uci;
    use ponderbot::search::eval::eval_white_cp;
    let mut board = Board::start_pos();
    let key = board.zobrist();
    let cp = eval_white_cp(&board);
    for uci in ["e2e4", "e7e5", "g1f3"] {
        let mv = find_move_uci(&board, uci).expect("legal move");
        board.apply_move(mv);
    }
    board.undo_move();
    board.undo_move();
    board.undo_move();
    assert_eq!(board.zobrist(), key, "position must round-trip");
    assert_eq!(eval_white_cp(&board), cp, "eval must round-trip");
}
