//! 走法生成
//!
//! 每种棋子只根据当前棋盘计算自己的可达格子，不考虑走后己方的王是否被将军；
//! 自将检测由 [`ChessMatch`](crate::ChessMatch) 负责。

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::constants::BOARD_SIZE;
use crate::piece::{Piece, PieceKind, Side, Square};

const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// 可达格子掩码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DestinationMask {
    grid: [[bool; BOARD_SIZE]; BOARD_SIZE],
}

impl DestinationMask {
    /// 创建全空掩码
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, square: Square) -> bool {
        self.grid[square.row() as usize][square.col() as usize]
    }

    pub fn set(&mut self, square: Square) {
        self.grid[square.row() as usize][square.col() as usize] = true;
    }

    /// 是否至少有一个可达格子
    pub fn any(&self) -> bool {
        self.grid.iter().flatten().any(|&b| b)
    }

    pub fn count(&self) -> usize {
        self.grid.iter().flatten().filter(|&&b| b).count()
    }

    /// 按行优先顺序遍历可达格子
    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        Square::all().filter(move |sq| self.get(*sq))
    }

    pub fn as_grid(&self) -> [[bool; BOARD_SIZE]; BOARD_SIZE] {
        self.grid
    }
}

impl From<DestinationMask> for [[bool; BOARD_SIZE]; BOARD_SIZE] {
    fn from(mask: DestinationMask) -> Self {
        mask.grid
    }
}

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 计算棋子的可达格子，被吃的棋子没有可达格子
    pub fn destinations(board: &Board, piece: &Piece) -> DestinationMask {
        let mut mask = DestinationMask::empty();
        let Some(from) = piece.square() else {
            return mask;
        };

        match piece.kind() {
            PieceKind::Pawn => Self::pawn_destinations(board, from, piece, &mut mask),
            PieceKind::Knight => Self::step_destinations(board, from, piece.side(), &KNIGHT_JUMPS, &mut mask),
            PieceKind::King => {
                Self::step_destinations(board, from, piece.side(), &ORTHOGONAL, &mut mask);
                Self::step_destinations(board, from, piece.side(), &DIAGONAL, &mut mask);
            }
            PieceKind::Rook => Self::slide_destinations(board, from, piece.side(), &ORTHOGONAL, &mut mask),
            PieceKind::Bishop => Self::slide_destinations(board, from, piece.side(), &DIAGONAL, &mut mask),
            PieceKind::Queen => {
                Self::slide_destinations(board, from, piece.side(), &ORTHOGONAL, &mut mask);
                Self::slide_destinations(board, from, piece.side(), &DIAGONAL, &mut mask);
            }
        }

        mask
    }

    /// 兵：前进一格；未走过时可前进两格；斜前方吃子
    fn pawn_destinations(board: &Board, from: Square, piece: &Piece, mask: &mut DestinationMask) {
        let forward = piece.side().forward();

        if let Some(one) = from.offset(forward, 0) {
            if !board.has_piece(one) {
                mask.set(one);

                if piece.move_count() == 0 {
                    if let Some(two) = one.offset(forward, 0) {
                        if !board.has_piece(two) {
                            mask.set(two);
                        }
                    }
                }
            }
        }

        for d_col in [-1i8, 1i8] {
            if let Some(to) = from.offset(forward, d_col) {
                if Self::is_opponent(board, to, piece.side()) {
                    mask.set(to);
                }
            }
        }
    }

    /// 马和王：每个方向只走一步
    fn step_destinations(
        board: &Board,
        from: Square,
        side: Side,
        offsets: &[(i8, i8)],
        mask: &mut DestinationMask,
    ) {
        for &(d_row, d_col) in offsets {
            if let Some(to) = from.offset(d_row, d_col) {
                Self::try_add(board, to, side, mask);
            }
        }
    }

    /// 车、象、后：沿方向滑行直到边界或遇到第一个棋子
    fn slide_destinations(
        board: &Board,
        from: Square,
        side: Side,
        directions: &[(i8, i8)],
        mask: &mut DestinationMask,
    ) {
        for &(d_row, d_col) in directions {
            let mut current = from;
            while let Some(to) = current.offset(d_row, d_col) {
                if board.has_piece(to) {
                    // 遇到棋子，敌方可以吃
                    Self::try_add(board, to, side, mask);
                    break;
                }
                mask.set(to);
                current = to;
            }
        }
    }

    /// 尝试添加目标格（空位或敌方棋子）
    fn try_add(board: &Board, to: Square, side: Side, mask: &mut DestinationMask) {
        match board.occupant(to) {
            Some(target) if target.side() == side => {}
            _ => mask.set(to),
        }
    }

    fn is_opponent(board: &Board, square: Square, side: Side) -> bool {
        board
            .occupant(square)
            .is_some_and(|target| target.side() != side)
    }

    /// 指定棋子能否攻击到目标格子
    pub fn attacks(board: &Board, piece: &Piece, target: Square) -> bool {
        Self::destinations(board, piece).get(target)
    }
}

impl Piece {
    /// 当前棋盘上的可达格子
    pub fn possible_destinations(&self, board: &Board) -> DestinationMask {
        MoveGenerator::destinations(board, self)
    }

    pub fn can_move_to(&self, board: &Board, target: Square) -> bool {
        self.possible_destinations(board).get(target)
    }

    /// 是否至少有一个可达格子
    pub fn has_any_legal_move(&self, board: &Board) -> bool {
        self.possible_destinations(board).any()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceId;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    fn put(board: &mut Board, id: u16, kind: PieceKind, side: Side, row: u8, col: u8) {
        board.place(Piece::new(PieceId(id), kind, side), sq(row, col));
    }

    fn destinations_at(board: &Board, row: u8, col: u8) -> DestinationMask {
        board.occupant(sq(row, col)).unwrap().possible_destinations(board)
    }

    #[test]
    fn test_pawn_initial_double_step() {
        let mut board = Board::empty();
        put(&mut board, 0, PieceKind::Pawn, Side::White, 6, 4);

        let mask = destinations_at(&board, 6, 4);
        assert_eq!(mask.count(), 2);
        assert!(mask.get(sq(5, 4)));
        assert!(mask.get(sq(4, 4)));
    }

    #[test]
    fn test_pawn_moved_single_step() {
        let mut board = Board::empty();
        let mut pawn = Piece::new(PieceId(0), PieceKind::Pawn, Side::Black);
        pawn.increment_move_count();
        board.place(pawn, sq(2, 3));

        let mask = destinations_at(&board, 2, 3);
        assert_eq!(mask.squares().collect::<Vec<_>>(), vec![sq(3, 3)]);
    }

    #[test]
    fn test_pawn_blocked() {
        let mut board = Board::empty();
        put(&mut board, 0, PieceKind::Pawn, Side::White, 6, 4);
        put(&mut board, 1, PieceKind::Knight, Side::Black, 5, 4);

        let mask = destinations_at(&board, 6, 4);
        assert!(!mask.any());
    }

    #[test]
    fn test_pawn_double_step_blocked() {
        let mut board = Board::empty();
        put(&mut board, 0, PieceKind::Pawn, Side::White, 6, 4);
        put(&mut board, 1, PieceKind::Knight, Side::Black, 4, 4);

        let mask = destinations_at(&board, 6, 4);
        assert_eq!(mask.squares().collect::<Vec<_>>(), vec![sq(5, 4)]);
    }

    #[test]
    fn test_pawn_captures() {
        let mut board = Board::empty();
        put(&mut board, 0, PieceKind::Pawn, Side::White, 4, 4);
        put(&mut board, 1, PieceKind::Pawn, Side::Black, 3, 3);
        put(&mut board, 2, PieceKind::Pawn, Side::White, 3, 5);

        let mask = destinations_at(&board, 4, 4);
        // 可以吃左前方的黑兵，不能吃己方，前方空位两格（未走过）
        assert!(mask.get(sq(3, 3)));
        assert!(!mask.get(sq(3, 5)));
        assert!(mask.get(sq(3, 4)));
        assert_eq!(mask.count(), 3);
    }

    #[test]
    fn test_knight_moves() {
        let mut board = Board::empty();
        put(&mut board, 0, PieceKind::Knight, Side::White, 4, 4);
        assert_eq!(destinations_at(&board, 4, 4).count(), 8);

        // 马在角落
        let mut board = Board::empty();
        put(&mut board, 0, PieceKind::Knight, Side::White, 7, 0);
        assert_eq!(destinations_at(&board, 7, 0).count(), 2);
    }

    #[test]
    fn test_knight_jumps_over_pieces() {
        let mut board = Board::empty();
        put(&mut board, 0, PieceKind::Knight, Side::White, 7, 1);
        put(&mut board, 1, PieceKind::Pawn, Side::White, 6, 1);
        put(&mut board, 2, PieceKind::Pawn, Side::White, 6, 3);

        let mask = destinations_at(&board, 7, 1);
        assert!(mask.get(sq(5, 0)));
        assert!(mask.get(sq(5, 2)));
        assert!(!mask.get(sq(6, 3)));
        assert_eq!(mask.count(), 2);
    }

    #[test]
    fn test_king_moves() {
        let mut board = Board::empty();
        put(&mut board, 0, PieceKind::King, Side::White, 4, 4);
        assert_eq!(destinations_at(&board, 4, 4).count(), 8);

        let mut board = Board::empty();
        put(&mut board, 0, PieceKind::King, Side::White, 7, 4);
        put(&mut board, 1, PieceKind::Pawn, Side::White, 6, 4);
        // 边线上 5 个邻格，其中一个被己方兵占据
        assert_eq!(destinations_at(&board, 7, 4).count(), 4);
    }

    #[test]
    fn test_rook_moves() {
        let mut board = Board::empty();
        put(&mut board, 0, PieceKind::Rook, Side::White, 4, 4);
        assert_eq!(destinations_at(&board, 4, 4).count(), 14);
    }

    #[test]
    fn test_rook_blocked_and_capture() {
        let mut board = Board::empty();
        put(&mut board, 0, PieceKind::Rook, Side::White, 4, 4);
        put(&mut board, 1, PieceKind::Pawn, Side::White, 2, 4);
        put(&mut board, 2, PieceKind::Pawn, Side::Black, 4, 6);

        let mask = destinations_at(&board, 4, 4);
        assert!(mask.get(sq(3, 4)));
        assert!(!mask.get(sq(2, 4)));
        assert!(mask.get(sq(4, 5)));
        assert!(mask.get(sq(4, 6)));
        assert!(!mask.get(sq(4, 7)));
        // 上 1 + 下 3 + 左 4 + 右 2
        assert_eq!(mask.count(), 10);
    }

    #[test]
    fn test_bishop_moves() {
        let mut board = Board::empty();
        put(&mut board, 0, PieceKind::Bishop, Side::Black, 0, 2);
        assert_eq!(destinations_at(&board, 0, 2).count(), 7);
    }

    #[test]
    fn test_queen_moves() {
        let mut board = Board::empty();
        put(&mut board, 0, PieceKind::Queen, Side::White, 4, 3);
        assert_eq!(destinations_at(&board, 4, 3).count(), 27);
    }

    #[test]
    fn test_captured_piece_has_no_moves() {
        let board = Board::empty();
        let rook = Piece::new(PieceId(0), PieceKind::Rook, Side::White);
        assert!(!rook.has_any_legal_move(&board));
    }

    #[test]
    fn test_attacks() {
        let mut board = Board::empty();
        put(&mut board, 0, PieceKind::Bishop, Side::White, 7, 2);
        put(&mut board, 1, PieceKind::King, Side::Black, 3, 6);

        let bishop = board.occupant(sq(7, 2)).unwrap().clone();
        assert!(MoveGenerator::attacks(&board, &bishop, sq(3, 6)));
        assert!(bishop.can_move_to(&board, sq(3, 6)));
        assert!(!bishop.can_move_to(&board, sq(2, 7)));
    }
}
