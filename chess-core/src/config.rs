//! 对局配置

use serde::{Deserialize, Serialize};

use crate::fen::{QUEENLESS_FEN, STANDARD_FEN};

/// 初始布局
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Layout {
    /// 标准布局：每方 16 枚棋子
    #[default]
    Standard,
    /// 去掉双方的后：每方 15 枚棋子
    Queenless,
    /// 自定义 FEN 局面
    Custom(String),
}

impl Layout {
    /// 布局对应的 FEN 字符串
    pub fn fen(&self) -> &str {
        match self {
            Layout::Standard => STANDARD_FEN,
            Layout::Queenless => QUEENLESS_FEN,
            Layout::Custom(fen) => fen,
        }
    }

    /// 按名称解析内置布局，无法识别的名称视为 FEN
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "standard" => Layout::Standard,
            "queenless" => Layout::Queenless,
            _ => Layout::Custom(name.trim().to_string()),
        }
    }
}

/// 对局配置
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchConfig {
    pub layout: Layout,
}

impl MatchConfig {
    pub fn with_layout(layout: Layout) -> Self {
        Self { layout }
    }
}
