//! 棋盘

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, NUM_SQUARES};
use crate::piece::{Piece, PieceId, PieceKind, Side, Square};

/// 棋盘
///
/// 每个格子至多容纳一枚棋子，放上棋盘的棋子由棋盘持有。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// 8x8 棋盘，索引为 row * 8 + col，使用 Vec 以支持 serde
    squares: Vec<Option<Piece>>,
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: vec![None; NUM_SQUARES],
        }
    }

    /// 行数
    pub fn rows(&self) -> usize {
        BOARD_SIZE
    }

    /// 列数
    pub fn columns(&self) -> usize {
        BOARD_SIZE
    }

    /// 把棋子放到指定格子，返回原先占据该格的棋子
    pub fn place(&mut self, mut piece: Piece, square: Square) -> Option<Piece> {
        piece.set_square(Some(square));
        let previous = self.squares[square.to_index()].replace(piece);
        previous.map(|mut p| {
            p.set_square(None);
            p
        })
    }

    /// 取走指定格子上的棋子
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.to_index()].take().map(|mut piece| {
            piece.set_square(None);
            piece
        })
    }

    /// 获取指定格子上的棋子
    pub fn occupant(&self, square: Square) -> Option<&Piece> {
        self.squares[square.to_index()].as_ref()
    }

    /// 指定格子上是否有棋子
    pub fn has_piece(&self, square: Square) -> bool {
        self.squares[square.to_index()].is_some()
    }

    /// 按编号查找棋盘上的棋子
    pub fn locate(&self, id: PieceId) -> Option<&Piece> {
        self.squares.iter().flatten().find(|piece| piece.id() == id)
    }

    /// 查找指定阵营的王所在格子
    pub fn find_king(&self, side: Side) -> Option<Square> {
        self.pieces(side)
            .find(|piece| piece.kind() == PieceKind::King)
            .and_then(Piece::square)
    }

    /// 指定阵营在棋盘上的所有棋子（按行优先顺序）
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = &Piece> {
        self.squares
            .iter()
            .flatten()
            .filter(move |piece| piece.side() == side)
    }

    /// 棋盘上的所有棋子（按行优先顺序）
    pub fn all_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.squares.iter().flatten()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}
