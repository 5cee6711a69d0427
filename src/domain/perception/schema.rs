//! Perception Context - 评分选项结构

use serde::{Deserialize, Serialize};

/// 量表每一项的刻度数
pub const SCALE_POINTS: usize = 5;

/// 量表刻度在界面上的显示值
pub const SCALE_LABELS: [&str; SCALE_POINTS] = ["-2", "-1", "0", "1", "2"];

/// 评分选项结构
///
/// 由服务端每个样本下发的一行描述: 第一个 token 为类型，
/// 其余部分是 `|` 分隔的选项列表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionSchema {
    /// 每一项在五点量表上打分
    Scale { items: Vec<String> },
    /// 每一项独立勾选
    CheckboxSet { items: Vec<String> },
}

impl OptionSchema {
    /// 解析选项行，例如 `scale natural|clear` 或 `checkbox A|B|C`
    ///
    /// 非 `scale` 的类型一律按复选框处理；没有空格时整行都是选项列表
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches('\r');
        let (kind, params) = match line.find(' ') {
            Some(idx) => (&line[..idx], &line[idx + 1..]),
            None => ("", line),
        };

        let items: Vec<String> = params
            .split('|')
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect();

        if kind == "scale" {
            Self::Scale { items }
        } else {
            Self::CheckboxSet { items }
        }
    }

    pub fn items(&self) -> &[String] {
        match self {
            Self::Scale { items } | Self::CheckboxSet { items } => items,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Scale { .. } => "scale",
            Self::CheckboxSet { .. } => "checkbox",
        }
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items().iter().any(|i| i == item)
    }

    /// 量表两端的文字说明
    pub fn scale_labels(item: &str) -> (String, String) {
        (format!("Absolutely Not {}", item), format!("Totally {}", item))
    }
}
