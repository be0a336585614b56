//! 错误类型定义

use thiserror::Error;

use crate::piece::{Side, Square};

/// 对局规则错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// 起始格没有棋子
    #[error("There is no piece on source square {square}")]
    NoPieceAtSource { square: Square },

    /// 所选棋子无路可走
    #[error("There are no possible moves for the piece on {square}")]
    NoLegalMoves { square: Square },

    /// 所选棋子不属于当前走子方
    #[error("The piece on {square} is not yours")]
    NotYourPiece { square: Square },

    /// 目标格不在棋子的可达范围内
    #[error("The piece on {from} can't move to {to}")]
    IllegalDestination { from: Square, to: Square },

    /// 走完后己方的王被攻击
    #[error("You can't put yourself in check")]
    SelfCheckViolation,

    /// 对局已经以将死结束
    #[error("The match is already over")]
    GameOver,

    /// 无效的代数坐标
    #[error("Invalid square: {text:?}")]
    InvalidSquare { text: String },

    /// 无效的 FEN 字符串
    #[error("Invalid FEN string: {reason}")]
    InvalidFen { reason: String },

    /// 棋盘上找不到某方的王。
    ///
    /// 属于内部不变式被破坏，正常对局中不可达。
    #[error("There is no {side} king on the board")]
    MissingKing { side: Side },

    /// 被吃的棋子不在在场列表中，同属内部不变式被破坏
    #[error("The piece on {square} is not in the in-play roster")]
    PieceNotInPlay { square: Square },
}

/// 规则操作结果类型
pub type Result<T> = std::result::Result<T, ChessError>;
