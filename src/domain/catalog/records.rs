//! Catalog Context - 服务端信息记录

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::synthesis::{AudioFormat, EffectSelection};

/// 音色记录，对应 `/voices` 响应中的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceRecord {
    pub name: String,
    pub locale: String,
    pub gender: String,
    /// 合成技术: unitselection、hmm 等
    pub voice_type: Option<String>,
    /// 领域（第五列），缺省为通用领域
    pub domain: Option<String>,
    /// 原始行，即 VOICE_SELECTIONS 下拉框中的一项
    pub selection: String,
}

impl VoiceRecord {
    pub fn is_limited_domain(&self) -> bool {
        matches!(self.domain.as_deref(), Some(domain) if domain != "general")
    }
}

/// 音色目录
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceCatalog {
    pub voices: Vec<VoiceRecord>,
}

impl VoiceCatalog {
    pub fn find(&self, name: &str) -> Option<&VoiceRecord> {
        self.voices.iter().find(|v| v.name == name)
    }

    /// 默认选中第一个音色
    pub fn default_voice(&self) -> Option<&VoiceRecord> {
        self.voices.first()
    }

    pub fn by_locale(&self) -> BTreeMap<&str, Vec<&VoiceRecord>> {
        let mut map: BTreeMap<&str, Vec<&VoiceRecord>> = BTreeMap::new();
        for voice in &self.voices {
            map.entry(voice.locale.as_str()).or_default().push(voice);
        }
        map
    }

    pub fn general_domain(&self) -> impl Iterator<Item = &VoiceRecord> {
        self.voices.iter().filter(|v| !v.is_limited_domain())
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}

/// 数据类型记录，对应 `/datatypes` 响应中的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTypeRecord {
    pub name: String,
    pub locale: Option<String>,
    pub is_input: bool,
    pub is_output: bool,
}

/// 数据类型目录
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTypeCatalog {
    pub types: Vec<DataTypeRecord>,
}

impl DataTypeCatalog {
    pub fn input_types(&self) -> impl Iterator<Item = &DataTypeRecord> {
        self.types.iter().filter(|t| t.is_input)
    }

    pub fn output_types(&self) -> impl Iterator<Item = &DataTypeRecord> {
        self.types.iter().filter(|t| t.is_output)
    }

    /// 默认输入类型: TEXT，不存在时取第一个
    pub fn default_input(&self) -> Option<&DataTypeRecord> {
        self.input_types()
            .find(|t| t.name == "TEXT")
            .or_else(|| self.input_types().next())
    }

    /// 默认输出类型: AUDIO，不存在时取第一个
    pub fn default_output(&self) -> Option<&DataTypeRecord> {
        self.output_types()
            .find(|t| t.name == "AUDIO")
            .or_else(|| self.output_types().next())
    }
}

/// 音频格式目录
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioFormatCatalog {
    pub formats: Vec<AudioFormat>,
    default_index: Option<usize>,
}

impl AudioFormatCatalog {
    pub fn new(formats: Vec<AudioFormat>) -> Self {
        // 最后一个包含 WAVE_FILE 的令牌为默认选择
        let default_index = formats
            .iter()
            .rposition(|f| f.as_str().contains(AudioFormat::WAVE_FILE));
        Self {
            formats,
            default_index,
        }
    }

    /// 默认格式，没有 WAVE_FILE 时取第一个
    pub fn default_format(&self) -> Option<&AudioFormat> {
        match self.default_index {
            Some(idx) => self.formats.get(idx),
            None => self.formats.first(),
        }
    }
}

/// 音效记录，对应 `/audioeffects` 响应中的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectRecord {
    pub name: String,
    pub default_parameters: String,
    pub selected: bool,
    pub current_parameters: String,
}

impl EffectRecord {
    pub fn new(name: impl Into<String>, default_parameters: impl Into<String>) -> Self {
        let default_parameters = default_parameters.into();
        Self {
            name: name.into(),
            current_parameters: default_parameters.clone(),
            default_parameters,
            selected: false,
        }
    }

    pub fn toggle(&mut self) {
        self.selected = !self.selected;
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn set_parameters(&mut self, parameters: impl Into<String>) {
        self.current_parameters = parameters.into();
    }

    pub fn reset_to_default(&mut self) {
        self.current_parameters = self.default_parameters.clone();
    }

    /// 转为请求中的音效选择
    pub fn to_selection(&self) -> EffectSelection {
        EffectSelection {
            name: self.name.clone(),
            parameters: self.current_parameters.clone(),
            selected: self.selected,
        }
    }
}

/// 一次性拉取的完整服务端目录
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerCatalog {
    pub voices: VoiceCatalog,
    pub data_types: DataTypeCatalog,
    pub audio_formats: AudioFormatCatalog,
    pub effects: Vec<EffectRecord>,
}
