//! Synthesis Context - Value Objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 输入数据类型
///
/// 服务端的类型集合是开放的，未知的类型名保存在 `Other` 中原样发送
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputType {
    Text,
    Ssml,
    Phonemes,
    RawMaryXml,
    Other(String),
}

impl InputType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "TEXT",
            Self::Ssml => "SSML",
            Self::Phonemes => "PHONEMES",
            Self::RawMaryXml => "RAWMARYXML",
            Self::Other(name) => name.as_str(),
        }
    }
}

impl Default for InputType {
    fn default() -> Self {
        Self::Text
    }
}

impl FromStr for InputType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "TEXT" => Self::Text,
            "SSML" => Self::Ssml,
            "PHONEMES" => Self::Phonemes,
            "RAWMARYXML" => Self::RawMaryXml,
            other => Self::Other(other.to_string()),
        })
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 输出数据类型
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputType {
    Audio,
    Text,
    TargetFeatures,
    HalfphoneTargetFeatures,
    RealisedAcoustParams,
    RealisedDurations,
    PraatTextGrid,
    Other(String),
}

impl OutputType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Audio => "AUDIO",
            Self::Text => "TEXT",
            Self::TargetFeatures => "TARGETFEATURES",
            Self::HalfphoneTargetFeatures => "HALFPHONE_TARGETFEATURES",
            Self::RealisedAcoustParams => "REALISED_ACOUSTPARAMS",
            Self::RealisedDurations => "REALISED_DURATIONS",
            Self::PraatTextGrid => "PRAAT_TEXTGRID",
            Self::Other(name) => name.as_str(),
        }
    }

    /// 该输出类型是否需要服务端生成音频
    pub fn requires_audio(&self) -> bool {
        matches!(
            self,
            Self::Audio | Self::RealisedAcoustParams | Self::RealisedDurations | Self::PraatTextGrid
        )
    }

    /// 是否为目标特征类输出（允许附带特征列表）
    pub fn is_target_features(&self) -> bool {
        matches!(self, Self::TargetFeatures | Self::HalfphoneTargetFeatures)
    }
}

impl Default for OutputType {
    fn default() -> Self {
        Self::Audio
    }
}

impl FromStr for OutputType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "AUDIO" => Self::Audio,
            "TEXT" => Self::Text,
            "TARGETFEATURES" => Self::TargetFeatures,
            "HALFPHONE_TARGETFEATURES" => Self::HalfphoneTargetFeatures,
            "REALISED_ACOUSTPARAMS" => Self::RealisedAcoustParams,
            "REALISED_DURATIONS" => Self::RealisedDurations,
            "PRAAT_TEXTGRID" => Self::PraatTextGrid,
            other => Self::Other(other.to_string()),
        })
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 音频格式令牌，例如 `WAVE_FILE`、`AU_FILE`、`MP3`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AudioFormat(String);

impl AudioFormat {
    pub const WAVE_FILE: &'static str = "WAVE_FILE";

    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn wave() -> Self {
        Self::new(Self::WAVE_FILE)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 由格式令牌推导 MIME 类型
    ///
    /// 取第一个 `_` 之前的部分并转为小写，`wave` 归一为 `wav`：
    /// `WAVE_FILE` -> `audio/wav`，`AU_FILE` -> `audio/au`，`MP3` -> `audio/mp3`
    pub fn mime_type(&self) -> String {
        let stem = match self.0.find('_') {
            Some(idx) => &self.0[..idx],
            None => self.0.as_str(),
        };
        let stem = stem.to_lowercase();
        if stem == "wave" {
            "audio/wav".to_string()
        } else {
            format!("audio/{}", stem)
        }
    }

    /// 建议的文件扩展名
    pub fn extension(&self) -> &'static str {
        match self.mime_type().as_str() {
            "audio/wav" => "wav",
            "audio/au" => "au",
            "audio/aiff" => "aiff",
            "audio/mp3" => "mp3",
            "audio/vorbis" | "audio/ogg" => "ogg",
            _ => "bin",
        }
    }
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self::wave()
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 单个音效在请求中的选择状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSelection {
    pub name: String,
    pub parameters: String,
    pub selected: bool,
}

impl EffectSelection {
    pub fn selected(name: impl Into<String>, parameters: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: parameters.into(),
            selected: true,
        }
    }
}
