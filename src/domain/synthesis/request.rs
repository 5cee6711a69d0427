//! Synthesis Context - SynthesisRequest

use serde::{Deserialize, Serialize};

use super::{should_show_modification, AudioFormat, EffectSelection, FormParams, InputType, OutputType};

/// 合成请求
///
/// 每次请求单独构造，提交后不再修改。
///
/// 不变量:
/// - 只有 `is_speakable()` 为真的请求才会发往服务端
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisRequest {
    input_text: String,
    input_type: InputType,
    output_type: OutputType,
    locale: String,
    voice: String,
    /// 音色类型（unitselection、hmm 等），用于 modification 可见性判断
    voice_type: Option<String>,
    audio_format: AudioFormat,
    effects: Vec<EffectSelection>,
    /// 直接指定的 OUTPUT_TYPE_PARAMS
    output_type_params: Option<String>,
    /// "modification" 复选框
    modification: bool,
    /// "specify target features" 复选框及其特征列表
    target_features: Option<String>,
}

impl SynthesisRequest {
    pub fn new(input_text: impl Into<String>) -> Self {
        Self {
            input_text: input_text.into(),
            input_type: InputType::default(),
            output_type: OutputType::default(),
            locale: "en_US".to_string(),
            voice: String::new(),
            voice_type: None,
            audio_format: AudioFormat::default(),
            effects: Vec::new(),
            output_type_params: None,
            modification: false,
            target_features: None,
        }
    }

    pub fn with_input_type(mut self, input_type: InputType) -> Self {
        self.input_type = input_type;
        self
    }

    pub fn with_output_type(mut self, output_type: OutputType) -> Self {
        self.output_type = output_type;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    pub fn with_voice_type(mut self, voice_type: impl Into<String>) -> Self {
        self.voice_type = Some(voice_type.into());
        self
    }

    pub fn with_audio_format(mut self, audio_format: AudioFormat) -> Self {
        self.audio_format = audio_format;
        self
    }

    pub fn with_effect(mut self, effect: EffectSelection) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = EffectSelection>) -> Self {
        self.effects.extend(effects);
        self
    }

    pub fn with_output_type_params(mut self, params: impl Into<String>) -> Self {
        self.output_type_params = Some(params.into());
        self
    }

    pub fn with_modification(mut self, enabled: bool) -> Self {
        self.modification = enabled;
        self
    }

    pub fn with_target_features(mut self, features: impl Into<String>) -> Self {
        self.target_features = Some(features.into());
        self
    }

    /// 输入文本非空且不全为空白
    pub fn is_speakable(&self) -> bool {
        !self.input_text.trim().is_empty()
    }

    /// 实际生效的 OUTPUT_TYPE_PARAMS
    ///
    /// 优先级: modification > target features > 直接指定
    pub fn effective_output_type_params(&self) -> Option<String> {
        if self.modification
            && should_show_modification(
                self.voice_type.as_deref().unwrap_or_default(),
                self.output_type.as_str(),
            )
        {
            return Some("MODIFICATION".to_string());
        }

        if let Some(features) = self.target_features.as_deref() {
            if self.output_type.is_target_features() && !features.is_empty() {
                return Some(features.to_string());
            }
        }

        self.output_type_params
            .as_ref()
            .filter(|p| !p.is_empty())
            .cloned()
    }

    /// 序列化为 `/process` 的请求参数
    pub fn to_form_params(&self) -> FormParams {
        let mut params = FormParams::new();
        params
            .push("INPUT_TEXT", self.input_text.as_str())
            .push("INPUT_TYPE", self.input_type.as_str())
            .push("OUTPUT_TYPE", self.output_type.as_str())
            .push("LOCALE", self.locale.as_str())
            .push("AUDIO", self.audio_format.as_str())
            .push("VOICE", self.voice.as_str());

        if let Some(value) = self.effective_output_type_params() {
            params.push("OUTPUT_TYPE_PARAMS", value);
        }

        for effect in self.effects.iter().filter(|e| e.selected && !e.name.is_empty()) {
            params
                .push(format!("effect_{}_selected", effect.name), "on")
                .push(
                    format!("effect_{}_parameters", effect.name),
                    effect.parameters.as_str(),
                );
        }

        params
    }

    // Getters
    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn input_type(&self) -> &InputType {
        &self.input_type
    }

    pub fn output_type(&self) -> &OutputType {
        &self.output_type
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn voice(&self) -> &str {
        &self.voice
    }

    pub fn audio_format(&self) -> &AudioFormat {
        &self.audio_format
    }

    pub fn effects(&self) -> &[EffectSelection] {
        &self.effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> SynthesisRequest {
        SynthesisRequest::new("Hello world")
            .with_locale("en_US")
            .with_voice("cmu-slt-hsmm")
    }

    #[test]
    fn test_always_includes_core_parameters() {
        let params = base_request().to_form_params();
        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec!["INPUT_TEXT", "INPUT_TYPE", "OUTPUT_TYPE", "LOCALE", "AUDIO", "VOICE"]
        );
        assert_eq!(params.get("AUDIO"), Some("WAVE_FILE"));
        assert_eq!(params.get("OUTPUT_TYPE"), Some("AUDIO"));
    }

    #[test]
    fn test_only_selected_effects_are_sent() {
        let request = base_request()
            .with_effect(EffectSelection::selected("Robot", "amount:100.0;"))
            .with_effect(EffectSelection {
                name: "Whisper".to_string(),
                parameters: "amount:50.0;".to_string(),
                selected: false,
            })
            .with_effect(EffectSelection::selected("", "dropped"));
        let params = request.to_form_params();

        assert_eq!(params.get("effect_Robot_selected"), Some("on"));
        assert_eq!(params.get("effect_Robot_parameters"), Some("amount:100.0;"));
        assert!(!params.contains_key("effect_Whisper_selected"));
        assert!(params.iter().all(|(k, _)| !k.is_empty()));
        assert!(!params.encode().contains("effect__"));
    }

    #[test]
    fn test_modification_requires_unitselection_and_audio() {
        let request = base_request().with_modification(true).with_voice_type("hmm");
        assert!(!request.to_form_params().contains_key("OUTPUT_TYPE_PARAMS"));

        let request = base_request()
            .with_modification(true)
            .with_voice_type("unitselection");
        assert_eq!(
            request.to_form_params().get("OUTPUT_TYPE_PARAMS"),
            Some("MODIFICATION")
        );

        let request = base_request()
            .with_modification(true)
            .with_voice_type("unitselection")
            .with_output_type(OutputType::Text);
        assert!(!request.to_form_params().contains_key("OUTPUT_TYPE_PARAMS"));
    }

    #[test]
    fn test_target_features_only_for_target_feature_outputs() {
        let request = base_request()
            .with_output_type(OutputType::TargetFeatures)
            .with_target_features("phone stressed");
        assert_eq!(
            request.to_form_params().get("OUTPUT_TYPE_PARAMS"),
            Some("phone stressed")
        );

        let request = base_request()
            .with_output_type(OutputType::HalfphoneTargetFeatures)
            .with_target_features("");
        assert!(!request.to_form_params().contains_key("OUTPUT_TYPE_PARAMS"));

        let request = base_request().with_target_features("phone");
        assert!(!request.to_form_params().contains_key("OUTPUT_TYPE_PARAMS"));
    }

    #[test]
    fn test_blank_input_is_not_speakable() {
        assert!(!SynthesisRequest::new("").is_speakable());
        assert!(!SynthesisRequest::new(" \n\t ").is_speakable());
        assert!(SynthesisRequest::new(" a ").is_speakable());
    }
}
