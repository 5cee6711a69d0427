//! 文本分块
//!
//! 把文件输入切成逐段合成的块：整体、按行或按段落

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 分块方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitMode {
    /// 整个文本作为一个块
    #[default]
    None,
    /// 每个非空行一个块
    Lines,
    /// 空行分隔的段落，段内换行合并为空格
    Paragraphs,
}

impl FromStr for SplitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "lines" | "line" => Ok(Self::Lines),
            "paragraphs" | "paragraph" => Ok(Self::Paragraphs),
            other => Err(format!("unknown split mode: {}", other)),
        }
    }
}

/// 检查块是否只有空白（这样的块不发送）
#[inline]
fn is_blank(s: &str) -> bool {
    s.chars().all(char::is_whitespace)
}

/// 按段落切分（支持 \n 和 \r\n）
fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(trimmed);
        }
    }

    // 剩余内容
    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }

    paragraphs
}

/// 对文本进行分块，空白块被丢弃
pub fn split_text(text: &str, mode: SplitMode) -> Vec<String> {
    match mode {
        SplitMode::None => {
            if is_blank(text) {
                Vec::new()
            } else {
                vec![text.trim().to_string()]
            }
        }
        SplitMode::Lines => text
            .lines()
            .map(str::trim)
            .filter(|line| !is_blank(line))
            .map(str::to_string)
            .collect(),
        SplitMode::Paragraphs => split_paragraphs(text),
    }
}
