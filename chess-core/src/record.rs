//! 走法记录

use serde::{Deserialize, Serialize};

use crate::piece::{PieceKind, Side, Square};

/// 一步已提交的走法
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 走棋时的回合数
    pub turn: u32,
    /// 走子方
    pub side: Side,
    /// 走动的棋子
    pub piece: PieceKind,
    /// 起始格
    pub from: Square,
    /// 目标格
    pub to: Square,
    /// 被吃的棋子（如果有）
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub captured: Option<PieceKind>,
    /// 走完后对方是否被将军
    pub gives_check: bool,
    /// 走完后对方是否被将死
    pub checkmate: bool,
}

impl std::fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let action = if self.captured.is_some() { 'x' } else { '-' };
        write!(f, "{}{}{}{}", self.piece.letter(), self.from, action, self.to)?;
        if self.checkmate {
            write!(f, "#")
        } else if self.gives_check {
            write!(f, "+")
        } else {
            Ok(())
        }
    }
}
