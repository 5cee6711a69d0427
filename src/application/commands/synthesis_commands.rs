//! Synthesis Commands

/// 合成结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisOutcome {
    /// OUTPUT_TYPE 为 AUDIO 时的原始音频
    Audio { data: Vec<u8>, mime_type: String },
    /// 其他输出类型的文本/标注结果，原样返回
    Text(String),
    /// 输入为空或全为空白，未发送请求
    Skipped,
}

impl SynthesisOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }
}
