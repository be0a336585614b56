//! FEN 格式解析和生成
//!
//! 只支持棋盘与走子方部分：
//! `<棋盘> [w|b] [回合数]`
//!
//! 示例：
//! `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w 1`

use crate::board::Board;
use crate::constants::{BOARD_SIZE, INITIAL_TURN};
use crate::error::ChessError;
use crate::piece::{Piece, PieceId, PieceKind, Side, Square};

/// 标准初始局面 FEN
pub const STANDARD_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w 1";

/// 不含后的初始局面 FEN（每方 15 枚棋子）
pub const QUEENLESS_FEN: &str = "rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNB1KBNR w 1";

/// FEN 解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenPosition {
    /// 棋盘，棋子编号按 FEN 读取顺序分配
    pub board: Board,
    /// 当前走子方
    pub side_to_move: Side,
    /// 回合数
    pub turn: u32,
}

/// FEN 格式处理
pub struct Fen;

impl Fen {
    /// 解析 FEN 字符串
    pub fn parse(fen: &str) -> Result<FenPosition, ChessError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.is_empty() {
            return Err(ChessError::InvalidFen {
                reason: "Empty FEN string".to_string(),
            });
        }
        if parts.len() > 3 {
            return Err(ChessError::InvalidFen {
                reason: format!("Expected at most 3 fields, got {}", parts.len()),
            });
        }

        let board = Self::parse_board(parts[0])?;

        // 解析走子方（默认白方）
        let side_to_move = match parts.get(1) {
            Some(field) => {
                let mut chars = field.chars();
                match (chars.next().and_then(Side::from_fen_char), chars.next()) {
                    (Some(side), None) => side,
                    _ => {
                        return Err(ChessError::InvalidFen {
                            reason: format!("Invalid side to move: {}", field),
                        })
                    }
                }
            }
            None => Side::White,
        };

        // 解析回合数（默认 1）
        let turn = match parts.get(2) {
            Some(field) => match field.parse::<u32>() {
                Ok(turn) if turn >= INITIAL_TURN => turn,
                _ => {
                    return Err(ChessError::InvalidFen {
                        reason: format!("Invalid turn number: {}", field),
                    })
                }
            },
            None => INITIAL_TURN,
        };

        Ok(FenPosition {
            board,
            side_to_move,
            turn,
        })
    }

    /// 解析棋盘部分
    fn parse_board(board_str: &str) -> Result<Board, ChessError> {
        let mut board = Board::empty();
        let rows: Vec<&str> = board_str.split('/').collect();

        if rows.len() != BOARD_SIZE {
            return Err(ChessError::InvalidFen {
                reason: format!("Expected {} ranks, got {}", BOARD_SIZE, rows.len()),
            });
        }

        let mut next_id = 0u16;
        let mut kings = [0usize; 2];

        // FEN 从上到下是第 8 横线到第 1 横线，正好对应第 0 行到第 7 行
        for (row_idx, row) in rows.iter().enumerate() {
            let mut col = 0usize;

            for c in row.chars() {
                if col >= BOARD_SIZE {
                    return Err(ChessError::InvalidFen {
                        reason: format!("Rank {} has too many squares", BOARD_SIZE - row_idx),
                    });
                }

                if let Some(empty_count) = c.to_digit(10).filter(|n| (1..=8).contains(n)) {
                    col += empty_count as usize;
                } else if let Some((kind, side)) = PieceKind::from_fen_char(c) {
                    if kind == PieceKind::King {
                        kings[side as usize] += 1;
                    }
                    let square = Square::new_unchecked(row_idx as u8, col as u8);
                    board.place(Piece::new(PieceId(next_id), kind, side), square);
                    next_id += 1;
                    col += 1;
                } else {
                    return Err(ChessError::InvalidFen {
                        reason: format!("Invalid piece character: {}", c),
                    });
                }
            }

            if col != BOARD_SIZE {
                return Err(ChessError::InvalidFen {
                    reason: format!(
                        "Rank {} has {} squares, expected {}",
                        BOARD_SIZE - row_idx,
                        col,
                        BOARD_SIZE
                    ),
                });
            }
        }

        for side in [Side::White, Side::Black] {
            let count = kings[side as usize];
            if count != 1 {
                return Err(ChessError::InvalidFen {
                    reason: format!("Expected exactly one {} king, found {}", side, count),
                });
            }
        }

        Ok(board)
    }

    /// 将局面转换为 FEN 字符串
    pub fn to_string(board: &Board, side_to_move: Side, turn: u32) -> String {
        format!(
            "{} {} {}",
            Self::board_to_string(board),
            side_to_move.to_fen_char(),
            turn
        )
    }

    /// 将棋盘转换为 FEN 棋盘部分
    pub fn board_to_string(board: &Board) -> String {
        let mut rows = Vec::with_capacity(BOARD_SIZE);

        for row in 0..BOARD_SIZE as u8 {
            let mut text = String::new();
            let mut empty_count = 0;

            for col in 0..BOARD_SIZE as u8 {
                if let Some(piece) = board.occupant(Square::new_unchecked(row, col)) {
                    if empty_count > 0 {
                        text.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    text.push(piece.to_fen_char());
                } else {
                    empty_count += 1;
                }
            }

            if empty_count > 0 {
                text.push_str(&empty_count.to_string());
            }

            rows.push(text);
        }

        rows.join("/")
    }
}
