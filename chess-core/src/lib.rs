//! 国际象棋规则引擎
//!
//! 包含:
//! - 棋子、阵营、格子等核心数据结构
//! - 棋盘与各类棋子的走法生成
//! - 对局控制：走法校验、试走与回滚、将军与将死判定
//! - 代数坐标与 FEN 局面格式
//! - 走法记录

mod board;
mod config;
mod constants;
mod error;
mod fen;
mod game;
mod moves;
mod notation;
mod piece;
mod record;

pub use board::Board;
pub use config::{Layout, MatchConfig};
pub use constants::*;
pub use error::{ChessError, Result};
pub use fen::{Fen, FenPosition, QUEENLESS_FEN, STANDARD_FEN};
pub use game::{ChessMatch, GameStatus};
pub use moves::{DestinationMask, MoveGenerator};
pub use notation::Notation;
pub use piece::{Piece, PieceId, PieceKind, Side, Square};
pub use record::MoveRecord;
