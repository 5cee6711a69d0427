//! Catalog Queries

use crate::domain::synthesis::FormParams;

/// 示例文本查询
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExampleTextQuery {
    /// 某数据类型在某语言下的示例
    ForDataType { datatype: String, locale: String },
    /// 某音色的示例列表（可能多行）
    ForVoice { voice: String },
}

impl ExampleTextQuery {
    pub fn for_data_type(datatype: impl Into<String>, locale: impl Into<String>) -> Self {
        Self::ForDataType {
            datatype: datatype.into(),
            locale: locale.into(),
        }
    }

    pub fn for_voice(voice: impl Into<String>) -> Self {
        Self::ForVoice {
            voice: voice.into(),
        }
    }

    pub fn to_form_params(&self) -> FormParams {
        match self {
            Self::ForDataType { datatype, locale } => FormParams::new()
                .with("datatype", datatype.as_str())
                .with("locale", locale.as_str()),
            Self::ForVoice { voice } => FormParams::new().with("voice", voice.as_str()),
        }
    }
}
