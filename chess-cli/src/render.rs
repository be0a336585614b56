//! 棋盘渲染

use chess_core::{ChessMatch, DestinationMask, GameStatus, Square, FILE_CHARS};

/// 空格子
const EMPTY: char = '.';

/// 可达的空格子
const REACHABLE: char = '*';

/// 把棋盘渲染为文本，第 8 横线在最上方
///
/// 传入 `highlight` 时，可达的空格显示为 `*`，可吃的棋子用括号标出。
pub fn render_board(chess_match: &ChessMatch, highlight: Option<&DestinationMask>) -> String {
    let mut out = String::new();
    let rows = chess_match.board().rows();
    let columns = chess_match.board().columns();
    let snapshot = chess_match.pieces();

    for (row, cells) in snapshot.iter().enumerate() {
        out.push_str(&format!("{} ", rows - row));
        for (col, cell) in cells.iter().enumerate() {
            let square = Square::new(row as u8, col as u8);
            let marked = matches!((highlight, square), (Some(mask), Some(sq)) if mask.get(sq));
            let text = match (cell, marked) {
                (Some(piece), true) => format!("({})", piece.display_char()),
                (Some(piece), false) => format!(" {} ", piece.display_char()),
                (None, true) => format!(" {} ", REACHABLE),
                (None, false) => format!(" {} ", EMPTY),
            };
            out.push_str(&text);
        }
        out.push('\n');
    }

    out.push_str("  ");
    for file in FILE_CHARS.iter().take(columns) {
        out.push_str(&format!(" {} ", file));
    }
    out.push('\n');
    out
}

/// 渲染对局状态行
pub fn render_status(chess_match: &ChessMatch) -> String {
    let captured: String = chess_match
        .captured_pieces()
        .iter()
        .map(|piece| piece.display_char())
        .collect();

    let mut out = format!("Turn {}", chess_match.turn());
    if !captured.is_empty() {
        out.push_str(&format!("  captured: {}", captured));
    }
    out.push('\n');

    match chess_match.status() {
        GameStatus::Checkmate => {
            out.push_str(&format!("CHECKMATE! Winner: {}\n", chess_match.current_side()));
        }
        GameStatus::Check => {
            out.push_str(&format!("Waiting for {}\nCHECK!\n", chess_match.current_side()));
        }
        GameStatus::InProgress => {
            out.push_str(&format!("Waiting for {}\n", chess_match.current_side()));
        }
    }
    out
}
