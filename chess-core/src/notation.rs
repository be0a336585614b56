//! 代数坐标表示法
//!
//! 格式：<列字母><横线数字>，如 `e2`
//! - 列字母 a-h 对应第 0-7 列
//! - 横线 8 对应第 0 行，横线 1 对应第 7 行

use std::str::FromStr;

use crate::constants::{BOARD_SIZE, FILE_CHARS};
use crate::error::ChessError;
use crate::piece::Square;

/// 代数坐标表示法
pub struct Notation;

impl Notation {
    /// 将格子转换为代数坐标
    pub fn to_algebraic(square: Square) -> String {
        format!("{}{}", Self::file_char(square), Self::rank(square))
    }

    /// 从列字母和横线数字创建格子
    pub fn from_file_rank(file: char, rank: u8) -> Option<Square> {
        let col = FILE_CHARS.iter().position(|&c| c == file.to_ascii_lowercase())?;
        if rank == 0 || rank as usize > BOARD_SIZE {
            return None;
        }
        Square::new(BOARD_SIZE as u8 - rank, col as u8)
    }

    /// 解析代数坐标
    pub fn parse_square(text: &str) -> Result<Square, ChessError> {
        let invalid = || ChessError::InvalidSquare {
            text: text.to_string(),
        };

        let mut chars = text.trim().chars();
        let file = chars.next().ok_or_else(invalid)?;
        let rank = chars
            .next()
            .and_then(|c| c.to_digit(10))
            .ok_or_else(invalid)?;
        if chars.next().is_some() {
            return Err(invalid());
        }

        Self::from_file_rank(file, rank as u8).ok_or_else(invalid)
    }

    /// 列字母
    pub fn file_char(square: Square) -> char {
        FILE_CHARS[square.col() as usize]
    }

    /// 横线数字（1-8）
    pub fn rank(square: Square) -> u8 {
        BOARD_SIZE as u8 - square.row()
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", Notation::file_char(*self), Notation::rank(*self))
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Notation::parse_square(s)
    }
}
