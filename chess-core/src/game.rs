//! 对局控制
//!
//! 负责走子顺序、在场与被吃棋子列表、走法校验，以及将军与将死判定。
//! 所有判定都基于“试走 → 检测 → 回滚”：先在棋盘上执行走法，再检查王是否被攻击，
//! 最后用精确的逆操作恢复原状，而不是复制整个棋盘。

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::Board;
use crate::config::MatchConfig;
use crate::constants::BOARD_SIZE;
use crate::error::{ChessError, Result};
use crate::fen::{Fen, FenPosition, STANDARD_FEN};
use crate::moves::{DestinationMask, MoveGenerator};
use crate::notation::Notation;
use crate::piece::{Piece, PieceId, Side, Square};
use crate::record::MoveRecord;

/// 对局状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// 进行中
    InProgress,
    /// 当前走子方被将军，对局继续
    Check,
    /// 将死，对局结束
    Checkmate,
}

/// 试走的回滚信息
#[derive(Debug, Clone, Copy)]
struct MoveUndo {
    from: Square,
    to: Square,
    /// 被吃棋子原先在在场列表中的位置
    captured_index: Option<usize>,
}

/// 一局棋
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessMatch {
    board: Board,
    current_side: Side,
    turn: u32,
    check: bool,
    checkmate: bool,
    /// 在场棋子（按放置顺序）
    pieces_on_board: Vec<PieceId>,
    /// 被吃棋子（按被吃顺序）
    captured_pieces: Vec<Piece>,
    history: Vec<MoveRecord>,
}

impl ChessMatch {
    /// 以标准布局创建对局
    pub fn new() -> Self {
        Self::from_fen(STANDARD_FEN).expect("Standard FEN should be valid")
    }

    /// 按配置创建对局
    pub fn with_config(config: MatchConfig) -> Result<Self> {
        Self::from_fen(config.layout.fen())
    }

    /// 从 FEN 局面创建对局
    ///
    /// 非走子方的王不能处于被攻击状态，否则该局面不可能由合法走法到达。
    pub fn from_fen(fen: &str) -> Result<Self> {
        let FenPosition {
            board,
            side_to_move,
            turn,
        } = Fen::parse(fen)?;

        let pieces_on_board = board.all_pieces().map(Piece::id).collect();
        let mut chess_match = Self {
            board,
            current_side: side_to_move,
            turn,
            check: false,
            checkmate: false,
            pieces_on_board,
            captured_pieces: Vec::new(),
            history: Vec::new(),
        };

        if chess_match.is_in_check(side_to_move.opponent())? {
            return Err(ChessError::InvalidFen {
                reason: format!("The {} king is in check but it is not its turn", side_to_move.opponent()),
            });
        }
        chess_match.check = chess_match.is_in_check(side_to_move)?;

        Ok(chess_match)
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn current_side(&self) -> Side {
        self.current_side
    }

    pub fn check(&self) -> bool {
        self.check
    }

    pub fn checkmate(&self) -> bool {
        self.checkmate
    }

    pub fn status(&self) -> GameStatus {
        if self.checkmate {
            GameStatus::Checkmate
        } else if self.check {
            GameStatus::Check
        } else {
            GameStatus::InProgress
        }
    }

    /// 棋盘快照，`[row][col]`，第 0 行是第 8 横线
    pub fn pieces(&self) -> [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE] {
        std::array::from_fn(|row| {
            std::array::from_fn(|col| {
                self.board
                    .occupant(Square::new_unchecked(row as u8, col as u8))
                    .cloned()
            })
        })
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.board.occupant(square)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pieces_on_board(&self) -> &[PieceId] {
        &self.pieces_on_board
    }

    pub fn captured_pieces(&self) -> &[Piece] {
        &self.captured_pieces
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn to_fen(&self) -> String {
        Fen::to_string(&self.board, self.current_side, self.turn)
    }

    /// 查询棋子的可达格子
    ///
    /// 只检查起始格是否有子、该子是否有路可走，不检查是否轮到该子所属一方。
    pub fn possible_moves(&self, source: Square) -> Result<DestinationMask> {
        let piece = self.validate_source(source)?;
        Ok(piece.possible_destinations(&self.board))
    }

    /// 执行走法，返回被吃的棋子（如果有）
    pub fn perform_move(&mut self, source: Square, target: Square) -> Result<Option<Piece>> {
        if self.checkmate {
            return Err(ChessError::GameOver);
        }

        let piece = self.validate_source(source)?;
        if piece.side() != self.current_side {
            debug!("Rejected {}: piece belongs to {}", source, piece.side());
            return Err(ChessError::NotYourPiece { square: source });
        }
        self.validate_target(source, target)?;

        let kind = piece.kind();
        let mover = self.current_side;
        let undo = self.make_move(source, target)?;

        match self.is_in_check(mover) {
            Ok(false) => {}
            Ok(true) => {
                self.undo_move(undo);
                debug!("Rejected {} -> {}: {} king would be in check", source, target, mover);
                return Err(ChessError::SelfCheckViolation);
            }
            Err(err) => {
                self.undo_move(undo);
                return Err(err);
            }
        }

        let opponent = mover.opponent();
        let (check, checkmate) = match self.side_status(opponent) {
            Ok(status) => status,
            Err(err) => {
                self.undo_move(undo);
                return Err(err);
            }
        };
        self.check = check;
        self.checkmate = checkmate;

        let captured = undo
            .captured_index
            .and_then(|_| self.captured_pieces.last().cloned());
        let record = MoveRecord {
            turn: self.turn,
            side: mover,
            piece: kind,
            from: source,
            to: target,
            captured: captured.as_ref().map(Piece::kind),
            gives_check: self.check,
            checkmate: self.checkmate,
        };
        info!("Turn {}: {} plays {}", self.turn, mover, record);
        self.history.push(record);

        if self.checkmate {
            info!("Checkmate, {} wins", mover);
        } else {
            if self.check {
                info!("{} is in check", opponent);
            }
            self.next_turn();
        }

        Ok(captured)
    }

    /// 以代数坐标执行走法，如 `("e2", "e4")`
    pub fn perform_move_str(&mut self, source: &str, target: &str) -> Result<Option<Piece>> {
        let source = Notation::parse_square(source)?;
        let target = Notation::parse_square(target)?;
        self.perform_move(source, target)
    }

    fn validate_source(&self, source: Square) -> Result<&Piece> {
        let piece = self.board.occupant(source).ok_or_else(|| {
            debug!("Rejected {}: empty square", source);
            ChessError::NoPieceAtSource { square: source }
        })?;
        if !piece.has_any_legal_move(&self.board) {
            debug!("Rejected {}: piece has no moves", source);
            return Err(ChessError::NoLegalMoves { square: source });
        }
        Ok(piece)
    }

    fn validate_target(&self, source: Square, target: Square) -> Result<()> {
        let reachable = self
            .board
            .occupant(source)
            .is_some_and(|piece| piece.can_move_to(&self.board, target));
        if !reachable {
            debug!("Rejected {} -> {}: unreachable target", source, target);
            return Err(ChessError::IllegalDestination {
                from: source,
                to: target,
            });
        }
        Ok(())
    }

    /// 在棋盘上执行走法（不检查规则）
    ///
    /// 出错时棋盘与两个列表保持不变。
    fn make_move(&mut self, from: Square, to: Square) -> Result<MoveUndo> {
        let captured_index = match self.board.occupant(to) {
            Some(target) => {
                let id = target.id();
                let index = self.pieces_on_board.iter().position(|&p| p == id);
                Some(index.ok_or(ChessError::PieceNotInPlay { square: to })?)
            }
            None => None,
        };

        let Some(mut piece) = self.board.remove(from) else {
            return Err(ChessError::NoPieceAtSource { square: from });
        };
        piece.increment_move_count();

        if let Some(index) = captured_index {
            if let Some(captured) = self.board.remove(to) {
                self.pieces_on_board.remove(index);
                self.captured_pieces.push(captured);
            }
        }
        self.board.place(piece, to);

        Ok(MoveUndo {
            from,
            to,
            captured_index,
        })
    }

    /// 撤销 [`Self::make_move`]，恢复棋盘、步数与两个列表
    fn undo_move(&mut self, undo: MoveUndo) {
        if let Some(mut piece) = self.board.remove(undo.to) {
            piece.decrement_move_count();
            self.board.place(piece, undo.from);
        }

        if let Some(index) = undo.captured_index {
            if let Some(captured) = self.captured_pieces.pop() {
                self.pieces_on_board.insert(index, captured.id());
                self.board.place(captured, undo.to);
            }
        }
    }

    fn next_turn(&mut self) {
        self.turn += 1;
        self.current_side = self.current_side.opponent();
    }

    /// 指定阵营在场的棋子（按在场列表顺序）
    fn side_pieces(&self, side: Side) -> impl Iterator<Item = &Piece> {
        self.pieces_on_board
            .iter()
            .filter_map(move |&id| self.board.locate(id))
            .filter(move |piece| piece.side() == side)
    }

    fn king_square(&self, side: Side) -> Result<Square> {
        self.board
            .find_king(side)
            .ok_or(ChessError::MissingKing { side })
    }

    /// 指定阵营是否被将军、是否被将死
    fn side_status(&mut self, side: Side) -> Result<(bool, bool)> {
        let check = self.is_in_check(side)?;
        let checkmate = check && self.is_checkmate(side)?;
        Ok((check, checkmate))
    }

    /// 检查指定阵营的王是否被对方任一棋子攻击
    fn is_in_check(&self, side: Side) -> Result<bool> {
        let king = self.king_square(side)?;
        Ok(self
            .side_pieces(side.opponent())
            .any(|piece| MoveGenerator::attacks(&self.board, piece, king)))
    }

    /// 检查指定阵营是否被将死
    ///
    /// 逐一试走该方每枚棋子的每个可达格，只要有一步能解除将军就不是将死。
    fn is_checkmate(&mut self, side: Side) -> Result<bool> {
        if !self.is_in_check(side)? {
            return Ok(false);
        }

        let candidates: Vec<(Square, DestinationMask)> = self
            .side_pieces(side)
            .filter_map(|piece| {
                piece
                    .square()
                    .map(|square| (square, piece.possible_destinations(&self.board)))
            })
            .collect();

        let mut trials = 0usize;
        for (from, mask) in candidates {
            for to in mask.squares() {
                let undo = self.make_move(from, to)?;
                let still_in_check = self.is_in_check(side);
                self.undo_move(undo);
                trials += 1;

                if !still_in_check? {
                    debug!("{} escapes check with {} -> {} after {} trials", side, from, to, trials);
                    return Ok(false);
                }
            }
        }

        debug!("No escape for {} after {} trials", side, trials);
        Ok(true)
    }
}

impl Default for ChessMatch {
    fn default() -> Self {
        Self::new()
    }
}
