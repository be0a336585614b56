//! 对局场景测试

use chess_core::{ChessError, ChessMatch, GameStatus, Layout, MatchConfig, PieceKind, Side, Square};

fn sq(text: &str) -> Square {
    text.parse().unwrap()
}

fn play(chess_match: &mut ChessMatch, moves: &[(&str, &str)]) {
    for (from, to) in moves {
        chess_match
            .perform_move_str(from, to)
            .unwrap_or_else(|e| panic!("{} -> {} 应该合法: {}", from, to, e));
    }
}

#[test]
fn test_initial_setup() {
    let chess_match = ChessMatch::new();

    let snapshot = chess_match.pieces();
    let count = |side: Side| {
        snapshot
            .iter()
            .flatten()
            .flatten()
            .filter(|piece| piece.side() == side)
            .count()
    };
    assert_eq!(count(Side::White), 16);
    assert_eq!(count(Side::Black), 16);
    assert_eq!(chess_match.turn(), 1);
    assert!(!chess_match.check());
    assert!(!chess_match.checkmate());
}

#[test]
fn test_queenless_setup() {
    let chess_match = ChessMatch::with_config(MatchConfig::with_layout(Layout::Queenless)).unwrap();

    assert_eq!(chess_match.board().pieces(Side::White).count(), 15);
    assert_eq!(chess_match.board().pieces(Side::Black).count(), 15);
    assert!(chess_match.piece_at(sq("d1")).is_none());
    assert_eq!(chess_match.piece_at(sq("e1")).unwrap().kind(), PieceKind::King);
}

#[test]
fn test_custom_layout_rejects_bad_fen() {
    let config = MatchConfig::with_layout(Layout::Custom("8/8/8 w".to_string()));
    assert!(matches!(
        ChessMatch::with_config(config),
        Err(ChessError::InvalidFen { .. })
    ));
}

#[test]
fn test_pawn_possible_moves() {
    let chess_match = ChessMatch::new();
    let mask = chess_match.possible_moves(sq("e2")).unwrap();

    let grid = mask.as_grid();
    for square in Square::all() {
        let expected = square == sq("e3") || square == sq("e4");
        assert_eq!(
            grid[square.row() as usize][square.col() as usize],
            expected,
            "{}",
            square
        );
    }
}

#[test]
fn test_capture_moves_piece_to_captured_roster() {
    let mut chess_match = ChessMatch::new();
    play(&mut chess_match, &[("e2", "e4"), ("d7", "d5")]);

    let victim = chess_match.piece_at(sq("d5")).unwrap().id();
    let captured = chess_match.perform_move_str("e4", "d5").unwrap().unwrap();

    assert_eq!(captured.id(), victim);
    assert_eq!(captured.kind(), PieceKind::Pawn);
    assert_eq!(captured.side(), Side::Black);
    assert_eq!(chess_match.captured_pieces().len(), 1);
    assert_eq!(chess_match.captured_pieces()[0].id(), victim);
    assert!(!chess_match.pieces_on_board().contains(&victim));
    assert_eq!(chess_match.pieces_on_board().len(), 31);
    assert_eq!(chess_match.piece_at(sq("d5")).unwrap().side(), Side::White);
}

#[test]
fn test_non_capture_returns_none() {
    let mut chess_match = ChessMatch::new();
    assert_eq!(chess_match.perform_move_str("g1", "f3"), Ok(None));
}

#[test]
fn test_self_check_is_rejected() {
    let mut chess_match = ChessMatch::new();
    // 1. e4 d5 2. Bb5+
    play(&mut chess_match, &[("e2", "e4"), ("d7", "d5"), ("f1", "b5")]);
    assert!(chess_match.check());
    assert_eq!(chess_match.status(), GameStatus::Check);

    let before = chess_match.clone();
    assert_eq!(
        chess_match.perform_move_str("a7", "a6"),
        Err(ChessError::SelfCheckViolation)
    );
    assert_eq!(chess_match, before);
    assert_eq!(chess_match.turn(), 4);
    assert_eq!(chess_match.current_side(), Side::Black);

    // 垫兵应将
    play(&mut chess_match, &[("c7", "c6")]);
    assert!(!chess_match.check());
    assert_eq!(chess_match.turn(), 5);
}

#[test]
fn test_pinned_piece_cannot_move() {
    let mut chess_match = ChessMatch::from_fen("4k3/4r3/8/8/8/8/4B3/4K3 w").unwrap();
    let before = chess_match.clone();

    assert_eq!(
        chess_match.perform_move(sq("e2"), sq("d3")),
        Err(ChessError::SelfCheckViolation)
    );
    assert_eq!(chess_match, before);
    assert_eq!(chess_match.piece_at(sq("e2")).unwrap().move_count(), 0);
}

#[test]
fn test_fools_mate() {
    let mut chess_match = ChessMatch::new();
    play(&mut chess_match, &[("f2", "f3"), ("e7", "e5"), ("g2", "g4")]);
    assert_eq!(chess_match.turn(), 4);

    chess_match.perform_move_str("d8", "h4").unwrap();

    assert!(chess_match.check());
    assert!(chess_match.checkmate());
    // 将死后不再换手
    assert_eq!(chess_match.turn(), 4);
    assert_eq!(chess_match.current_side(), Side::Black);
    assert_eq!(chess_match.history().last().unwrap().to_string(), "Qd8-h4#");
}

#[test]
fn test_back_rank_mate() {
    let mut chess_match = ChessMatch::from_fen("6k1/5ppp/8/8/8/8/8/R3K3 w").unwrap();
    chess_match.perform_move_str("a1", "a8").unwrap();

    assert!(chess_match.checkmate());
    assert_eq!(chess_match.turn(), 1);
    assert_eq!(chess_match.current_side(), Side::White);
    assert_eq!(
        chess_match.perform_move_str("e1", "d1"),
        Err(ChessError::GameOver)
    );
}

#[test]
fn test_check_that_can_be_blocked_is_not_mate() {
    let mut chess_match = ChessMatch::from_fen("6k1/3n1ppp/8/8/8/8/8/R3K3 w").unwrap();
    chess_match.perform_move_str("a1", "a8").unwrap();

    assert!(chess_match.check());
    assert!(!chess_match.checkmate());
    assert_eq!(chess_match.turn(), 2);
    assert_eq!(chess_match.current_side(), Side::Black);

    // 马回 f8 垫将
    play(&mut chess_match, &[("d7", "f8")]);
    assert!(!chess_match.check());
}

#[test]
fn test_empty_source_square() {
    let mut chess_match = ChessMatch::new();
    let before = chess_match.clone();

    assert_eq!(
        chess_match.possible_moves(sq("e4")),
        Err(ChessError::NoPieceAtSource { square: sq("e4") })
    );
    assert_eq!(
        chess_match.perform_move(sq("e4"), sq("e5")),
        Err(ChessError::NoPieceAtSource { square: sq("e4") })
    );
    assert_eq!(chess_match, before);
}

#[test]
fn test_error_messages() {
    assert_eq!(
        ChessError::NoPieceAtSource { square: sq("e4") }.to_string(),
        "There is no piece on source square e4"
    );
    assert_eq!(
        ChessError::IllegalDestination {
            from: sq("e2"),
            to: sq("e5")
        }
        .to_string(),
        "The piece on e2 can't move to e5"
    );
    assert_eq!(
        ChessError::MissingKing { side: Side::Black }.to_string(),
        "There is no black king on the board"
    );
}
