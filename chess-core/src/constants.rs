//! 规则常量定义

/// 棋盘边长（行数与列数相同）
pub const BOARD_SIZE: usize = 8;

/// 棋盘格子总数
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// 对局开始时的回合数
pub const INITIAL_TURN: u32 = 1;

/// 列字母（从 a 到 h）
pub const FILE_CHARS: [char; BOARD_SIZE] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
