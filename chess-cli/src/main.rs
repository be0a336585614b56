use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chess_core::{ChessMatch, Layout, MatchConfig};

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("chess_cli=info".parse()?))
        .init();

    // 第一个参数为布局名称或 FEN
    let layout = std::env::args()
        .nth(1)
        .map(|arg| Layout::from_name(&arg))
        .unwrap_or_default();
    info!("Starting match with layout {:?}", layout);

    let mut chess_match = ChessMatch::with_config(MatchConfig::with_layout(layout))?;
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    chess_cli::run_session(&mut chess_match, stdin.lock(), &mut stdout)?;

    Ok(())
}
