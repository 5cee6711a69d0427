//! Catalog Context - 行式响应解析
//!
//! 所有解析都是全函数：空输入、末尾空行、格式不对的行都不会导致失败，
//! 格式不对的行直接跳过

use crate::domain::synthesis::AudioFormat;

use super::records::{
    AudioFormatCatalog, DataTypeCatalog, DataTypeRecord, EffectRecord, VoiceCatalog, VoiceRecord,
};

/// 按行切分，去掉 `\r` 并跳过空行
fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
}

/// 解析单行音色: `name locale gender [type [domain]]`
pub fn parse_voice_line(line: &str) -> Option<VoiceRecord> {
    let mut fields = line.split_whitespace();
    let name = fields.next()?;
    let locale = fields.next()?;
    let gender = fields.next()?;

    Some(VoiceRecord {
        name: name.to_string(),
        locale: locale.to_string(),
        gender: gender.to_string(),
        voice_type: fields.next().map(str::to_string),
        domain: fields.next().map(str::to_string),
        selection: line.to_string(),
    })
}

pub fn parse_voices(text: &str) -> VoiceCatalog {
    VoiceCatalog {
        voices: non_empty_lines(text).filter_map(parse_voice_line).collect(),
    }
}

/// 解析单行数据类型: `NAME [LOCALE=xx] [INPUT] [OUTPUT]`
///
/// 输入/输出标记按子串判断，一行可以同时是输入和输出类型
pub fn parse_data_type_line(line: &str) -> Option<DataTypeRecord> {
    let mut fields = line.split_whitespace();
    let name = fields.next()?;
    let locale = fields
        .find_map(|field| field.strip_prefix("LOCALE="))
        .map(str::to_string);

    Some(DataTypeRecord {
        name: name.to_string(),
        locale,
        is_input: line.contains("INPUT"),
        is_output: line.contains("OUTPUT"),
    })
}

pub fn parse_data_types(text: &str) -> DataTypeCatalog {
    DataTypeCatalog {
        types: non_empty_lines(text)
            .filter_map(parse_data_type_line)
            .collect(),
    }
}

pub fn parse_audio_formats(text: &str) -> AudioFormatCatalog {
    AudioFormatCatalog::new(
        non_empty_lines(text)
            .map(|line| AudioFormat::new(line.trim()))
            .collect(),
    )
}

/// 解析单行音效: 第一个空格之前为名称，之后为默认参数
pub fn parse_effect_line(line: &str) -> Option<EffectRecord> {
    let (name, params) = match line.find(' ') {
        Some(idx) => (&line[..idx], &line[idx + 1..]),
        None => (line, ""),
    };
    if name.is_empty() {
        return None;
    }
    Some(EffectRecord::new(name, params))
}

pub fn parse_effects(text: &str) -> Vec<EffectRecord> {
    non_empty_lines(text).filter_map(parse_effect_line).collect()
}

/// 音色示例文本，每个非空行是一个候选
pub fn parse_example_lines(text: &str) -> Vec<String> {
    non_empty_lines(text).map(str::to_string).collect()
}

/// 选择填入输入框的示例文本
///
/// 输入类型为 TEXT 且存在音色示例时取第一个音色示例，否则取数据类型示例
pub fn choose_example_text(input_type: &str, type_example: &str, voice_examples: &[String]) -> String {
    match voice_examples.first() {
        Some(example) if input_type == "TEXT" => example.clone(),
        _ => type_example.to_string(),
    }
}

/// 从版本信息的第一行提取版本号
///
/// `"Mary TTS server 5.2.1 (impl. 17)"` -> `"5.2.1"`；没有 `.` 时返回整行
pub fn server_version_number(lines: &[String]) -> String {
    let Some(first) = lines.first() else {
        return String::new();
    };

    match first.find('.') {
        Some(dot) => {
            let start = first[..dot].rfind(' ').map(|i| i + 1).unwrap_or(0);
            let end = first[dot..]
                .find(' ')
                .map(|i| dot + i)
                .unwrap_or(first.len());
            first[start..end].to_string()
        }
        None => first.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_voices_skips_blank_and_malformed_lines() {
        let text = "cmu-slt-hsmm en_US female hmm\n\nbroken\nbits1 de female unitselection general\n\n";
        let catalog = parse_voices(text);

        assert_eq!(catalog.len(), 2);
        let first = &catalog.voices[0];
        assert_eq!(first.name, "cmu-slt-hsmm");
        assert_eq!(first.locale, "en_US");
        assert_eq!(first.voice_type.as_deref(), Some("hmm"));
        assert_eq!(first.selection, "cmu-slt-hsmm en_US female hmm");
        assert_eq!(catalog.voices[1].domain.as_deref(), Some("general"));
    }

    #[test]
    fn test_parse_data_types_tags_by_substring() {
        let text = "RAWMARYXML INPUT OUTPUT\nTEXT LOCALE=de INPUT\nAUDIO OUTPUT\nSOMETHING\r\n";
        let catalog = parse_data_types(text);

        let inputs: Vec<&str> = catalog.input_types().map(|t| t.name.as_str()).collect();
        let outputs: Vec<&str> = catalog.output_types().map(|t| t.name.as_str()).collect();
        assert_eq!(inputs, vec!["RAWMARYXML", "TEXT"]);
        assert_eq!(outputs, vec!["RAWMARYXML", "AUDIO"]);
        assert_eq!(catalog.types[1].locale.as_deref(), Some("de"));
        assert_eq!(catalog.default_input().unwrap().name, "TEXT");
        assert_eq!(catalog.default_output().unwrap().name, "AUDIO");
    }

    #[test]
    fn test_parse_audio_formats() {
        let catalog = parse_audio_formats("AU_FILE\nWAVE_FILE\nAIFF_FILE\n");
        assert_eq!(catalog.formats.len(), 3);
        assert_eq!(catalog.default_format().unwrap().as_str(), "WAVE_FILE");
    }

    #[test]
    fn test_parse_effects_splits_at_first_space() {
        let effects = parse_effects("Volume amount:2.0;\nFIRFilter type:3;fc1:500.0; fc2:2000.0;\n Orphan\nRobot\n");

        assert_eq!(effects.len(), 3);
        assert_eq!(effects[0].name, "Volume");
        assert_eq!(effects[0].default_parameters, "amount:2.0;");
        assert_eq!(effects[1].default_parameters, "type:3;fc1:500.0; fc2:2000.0;");
        assert_eq!(effects[2].name, "Robot");
        assert_eq!(effects[2].default_parameters, "");
        assert!(!effects[0].selected);
    }

    #[test]
    fn test_parsing_is_total() {
        assert!(parse_voices("").is_empty());
        assert!(parse_data_types("\n\n").types.is_empty());
        assert!(parse_audio_formats("").default_format().is_none());
        assert!(parse_effects("   \n").is_empty());
        assert!(parse_example_lines("").is_empty());
    }

    #[test]
    fn test_choose_example_text() {
        let voice_examples = vec!["Voice example".to_string()];
        assert_eq!(choose_example_text("TEXT", "Type example", &voice_examples), "Voice example");
        assert_eq!(choose_example_text("SSML", "Type example", &voice_examples), "Type example");
        assert_eq!(choose_example_text("TEXT", "Type example", &[]), "Type example");
    }

    #[test]
    fn test_server_version_number() {
        let lines = vec!["Mary TTS server 5.2.1 (impl. 17)".to_string()];
        assert_eq!(server_version_number(&lines), "5.2.1");

        let lines = vec!["Mary TTS server".to_string()];
        assert_eq!(server_version_number(&lines), "Mary TTS server");

        assert_eq!(server_version_number(&[]), "");
    }
}
