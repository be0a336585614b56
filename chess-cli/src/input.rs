//! 输入处理

use thiserror::Error;

use chess_core::{ChessError, Notation, Square};

/// 终端命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// 走棋，如 `e2 e4` 或 `e2e4`
    Move { from: Square, to: Square },
    /// 查看某个棋子的可达格，如 `moves g1`
    Moves(Square),
    /// 查看走法记录
    History,
    /// 显示帮助
    Help,
    /// 退出
    Quit,
}

/// 输入错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// 空输入
    #[error("Empty input")]
    Empty,

    /// 无法识别的命令
    #[error("Unknown command: {0}")]
    Unknown(String),

    /// 坐标错误
    #[error(transparent)]
    Chess(#[from] ChessError),
}

/// 解析一行输入
pub fn parse_command(line: &str) -> Result<Command, InputError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    match tokens.as_slice() {
        [] => Err(InputError::Empty),
        ["quit" | "exit" | "q"] => Ok(Command::Quit),
        ["help" | "?"] => Ok(Command::Help),
        ["history"] => Ok(Command::History),
        ["moves", square] => Ok(Command::Moves(Notation::parse_square(square)?)),
        [from, to] => Ok(Command::Move {
            from: Notation::parse_square(from)?,
            to: Notation::parse_square(to)?,
        }),
        // 连写形式，如 e2e4
        [joined] if joined.len() == 4 && joined.is_ascii() => Ok(Command::Move {
            from: Notation::parse_square(&joined[..2])?,
            to: Notation::parse_square(&joined[2..])?,
        }),
        _ => Err(InputError::Unknown(line.trim().to_string())),
    }
}
