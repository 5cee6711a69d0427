//! Perception Context - 测试会话

use serde::{Deserialize, Serialize};

use super::{OptionSchema, PerceptionError};

/// 邮箱的启发式校验: 第一个 `.` 出现在第 2 位之后，且 `@` 不在开头
pub fn is_valid_email(email: &str) -> bool {
    let has_dot = email.find('.').is_some_and(|idx| idx > 2);
    let has_at = email.find('@').is_some_and(|idx| idx > 0);
    has_dot && has_at
}

/// `/perceptionTest` 响应
///
/// 行格式: emailId, sampleCount, currentIndex, sampleBaseName, optionSchemaLine,
/// 之后的所有行为问题文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleDetails {
    pub email_id: String,
    pub sample_count: usize,
    pub current_index: usize,
    pub sample_base_name: String,
    pub option_line: String,
    pub question_text: String,
}

impl SampleDetails {
    pub fn parse(response: &str) -> Result<Self, PerceptionError> {
        let lines: Vec<&str> = response
            .split('\n')
            .map(|line| line.trim_end_matches('\r'))
            .collect();

        if lines.len() < 5 {
            return Err(PerceptionError::MalformedResponse(format!(
                "expected at least 5 lines, got {}",
                lines.len()
            )));
        }

        let parse_number = |field: &str, value: &str| {
            value.trim().parse::<usize>().map_err(|_| {
                PerceptionError::MalformedResponse(format!("{} is not a number: {:?}", field, value))
            })
        };

        let question_text = lines[5..]
            .iter()
            .map(|line| format!("{}\n", line))
            .collect::<String>();

        Ok(Self {
            email_id: lines[0].to_string(),
            sample_count: parse_number("sampleCount", lines[1])?,
            current_index: parse_number("currentIndex", lines[2])?,
            sample_base_name: lines[3].to_string(),
            option_line: lines[4].to_string(),
            question_text,
        })
    }

    /// 样本是否已经全部完成
    pub fn is_exhausted(&self) -> bool {
        self.sample_count <= self.current_index
    }
}

/// 感知测试会话
///
/// 不变量:
/// - `0 <= current_index <= sample_count`
/// - `current_index == sample_count` 时会话结束
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerceptionSession {
    email_id: String,
    sample_count: usize,
    current_index: usize,
    current_sample_base_name: String,
    option_schema: OptionSchema,
    question_text: String,
}

impl PerceptionSession {
    /// 由首个样本信息创建会话，样本已耗尽时返回 None
    pub fn start(details: &SampleDetails) -> Option<Self> {
        if details.is_exhausted() {
            return None;
        }
        Some(Self {
            email_id: details.email_id.clone(),
            sample_count: details.sample_count,
            current_index: details.current_index,
            current_sample_base_name: details.sample_base_name.clone(),
            option_schema: OptionSchema::parse(&details.option_line),
            question_text: details.question_text.clone(),
        })
    }

    /// 前进到下一个样本，返回新的索引
    pub fn advance(&mut self) -> usize {
        if self.current_index < self.sample_count {
            self.current_index += 1;
        }
        self.current_index
    }

    /// 用下一个样本的信息更新当前样本
    ///
    /// 选项结构和问题文本沿用会话开始时的内容
    pub fn apply_sample(&mut self, details: &SampleDetails) {
        self.current_index = details.current_index.min(self.sample_count);
        self.current_sample_base_name = details.sample_base_name.clone();
    }

    pub fn is_terminal(&self) -> bool {
        self.current_index == self.sample_count
    }

    /// 当前是否为最后一个样本
    pub fn is_last_sample(&self) -> bool {
        self.current_index + 1 == self.sample_count
    }

    /// 进度显示，如 `2/10`（从 1 开始）
    pub fn progress(&self) -> String {
        format!("{}/{}", self.current_index + 1, self.sample_count)
    }

    // Getters
    pub fn email_id(&self) -> &str {
        &self.email_id
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_sample_base_name(&self) -> &str {
        &self.current_sample_base_name
    }

    pub fn option_schema(&self) -> &OptionSchema {
        &self.option_schema
    }

    pub fn question_text(&self) -> &str {
        &self.question_text
    }
}
