//! 国际象棋终端对局
//!
//! 包含:
//! - 命令解析
//! - 棋盘文本渲染
//! - 交互式对局循环

pub mod input;
pub mod render;

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::{debug, info};

use chess_core::ChessMatch;

pub use input::{parse_command, Command, InputError};
pub use render::{render_board, render_status};

const HELP: &str = "Commands:\n  <from> <to>   move a piece, e.g. e2 e4\n  moves <sq>    show where the piece on <sq> can go\n  history       list the moves played so far\n  quit          leave the match\n";

/// 运行一局交互式对局，直到将死、输入结束或用户退出
pub fn run_session<R: BufRead, W: Write>(
    chess_match: &mut ChessMatch,
    input: R,
    output: &mut W,
) -> Result<()> {
    write!(output, "{}{}", render_board(chess_match, None), render_status(chess_match))?;
    let mut lines = input.lines();

    while !chess_match.checkmate() {
        write!(output, "> ")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(InputError::Empty) => continue,
            Err(err) => {
                writeln!(output, "{}", err)?;
                continue;
            }
        };
        debug!("Command: {:?}", command);

        match command {
            Command::Quit => break,
            Command::Help => write!(output, "{}", HELP)?,
            Command::History => {
                for record in chess_match.history() {
                    writeln!(output, "{}. {}", record.turn, record)?;
                }
            }
            Command::Moves(square) => match chess_match.possible_moves(square) {
                Ok(mask) => write!(output, "{}", render_board(chess_match, Some(&mask)))?,
                Err(err) => writeln!(output, "{}", err)?,
            },
            Command::Move { from, to } => match chess_match.perform_move(from, to) {
                Ok(captured) => {
                    if let Some(piece) = captured {
                        writeln!(output, "Captured {}", piece.display_char())?;
                    }
                    write!(output, "{}{}", render_board(chess_match, None), render_status(chess_match))?;
                }
                Err(err) => writeln!(output, "{}", err)?,
            },
        }
    }

    info!("Session ended at turn {}", chess_match.turn());
    Ok(())
}
