//! 棋子、阵营与格子定义

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, NUM_SQUARES};

/// 棋子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    /// 兵
    Pawn,
    /// 车
    Rook,
    /// 马
    Knight,
    /// 象
    Bishop,
    /// 后
    Queen,
    /// 王
    King,
}

impl PieceKind {
    /// 获取 FEN 字符（白方大写，黑方小写）
    pub fn to_fen_char(&self, side: Side) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Rook => 'r',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match side {
            Side::White => c.to_ascii_uppercase(),
            Side::Black => c,
        }
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<(PieceKind, Side)> {
        let side = if c.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'r' => PieceKind::Rook,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((kind, side))
    }

    /// 走法记录中使用的字母
    pub fn letter(&self) -> char {
        self.to_fen_char(Side::White)
    }
}

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// 白方（先手，在下方）
    White,
    /// 黑方（后手，在上方）
    Black,
}

impl Side {
    /// 获取对方阵营
    pub fn opponent(&self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// 获取 FEN 字符
    pub fn to_fen_char(&self) -> char {
        match self {
            Side::White => 'w',
            Side::Black => 'b',
        }
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<Side> {
        match c {
            'w' | 'W' => Some(Side::White),
            'b' | 'B' => Some(Side::Black),
            _ => None,
        }
    }

    /// 兵前进时行号的变化量（第 0 行是第 8 横线）
    pub fn forward(&self) -> i8 {
        match self {
            Side::White => -1,
            Side::Black => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::White => write!(f, "white"),
            Side::Black => write!(f, "black"),
        }
    }
}

/// 棋子编号，在一局棋内唯一
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u16);

/// 棋子
///
/// 在棋盘上时归 [`Board`](crate::Board) 所有，被吃后归对局的被吃列表所有。
/// 因此只实现 `Clone` 而不实现 `Copy`。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    id: PieceId,
    kind: PieceKind,
    side: Side,
    move_count: u32,
    square: Option<Square>,
}

impl Piece {
    /// 创建新棋子（尚未放上棋盘）
    pub fn new(id: PieceId, kind: PieceKind, side: Side) -> Self {
        Self {
            id,
            kind,
            side,
            move_count: 0,
            square: None,
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// 已走步数（试走也会计入，回滚时扣回）
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// 当前所在格子，被吃后为 `None`
    pub fn square(&self) -> Option<Square> {
        self.square
    }

    pub fn increment_move_count(&mut self) {
        self.move_count += 1;
    }

    pub fn decrement_move_count(&mut self) {
        self.move_count = self.move_count.saturating_sub(1);
    }

    pub(crate) fn set_square(&mut self, square: Option<Square>) {
        self.square = square;
    }

    /// 获取 FEN 字符
    pub fn to_fen_char(&self) -> char {
        self.kind.to_fen_char(self.side)
    }

    /// 获取棋子显示的符号
    pub fn display_char(&self) -> char {
        match (self.kind, self.side) {
            (PieceKind::King, Side::White) => '♔',
            (PieceKind::King, Side::Black) => '♚',
            (PieceKind::Queen, Side::White) => '♕',
            (PieceKind::Queen, Side::Black) => '♛',
            (PieceKind::Rook, Side::White) => '♖',
            (PieceKind::Rook, Side::Black) => '♜',
            (PieceKind::Bishop, Side::White) => '♗',
            (PieceKind::Bishop, Side::Black) => '♝',
            (PieceKind::Knight, Side::White) => '♘',
            (PieceKind::Knight, Side::Black) => '♞',
            (PieceKind::Pawn, Side::White) => '♙',
            (PieceKind::Pawn, Side::Black) => '♟',
        }
    }
}

/// 棋盘格子
///
/// 第 0 行是第 8 横线，第 0 列是 a 线。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// 创建新格子
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// 创建新格子（不检查边界，内部使用）
    pub(crate) const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    /// 获取偏移后的格子
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Square> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if row >= 0 && (row as usize) < BOARD_SIZE && col >= 0 && (col as usize) < BOARD_SIZE {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// 转换为数组索引
    pub fn to_index(&self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    /// 从数组索引转换
    pub fn from_index(index: usize) -> Option<Self> {
        if index < NUM_SQUARES {
            Some(Square {
                row: (index / BOARD_SIZE) as u8,
                col: (index % BOARD_SIZE) as u8,
            })
        } else {
            None
        }
    }

    /// 按行优先顺序遍历全部格子
    pub fn all() -> impl Iterator<Item = Square> {
        (0..NUM_SQUARES).filter_map(Square::from_index)
    }
}
