//! Catalog Context - 服务端信息目录
//!
//! 职责:
//! - 音色、数据类型、音频格式、音效的记录类型
//! - 行式响应的容错解析

mod parser;
mod records;

pub use parser::{
    choose_example_text, parse_audio_formats, parse_data_type_line, parse_data_types,
    parse_effect_line, parse_effects, parse_example_lines, parse_voice_line, parse_voices,
    server_version_number,
};
pub use records::{
    AudioFormatCatalog, DataTypeCatalog, DataTypeRecord, EffectRecord, ServerCatalog,
    VoiceCatalog, VoiceRecord,
};
