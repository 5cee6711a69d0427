//! CommandLineDriver - 命令行合成流程
//!
//! 构造合成请求、逐块调用合成服务，把音频交给播放器，文本结果写到输出

use std::io::Write;
use std::sync::Arc;
use thiserror::Error;

use super::args::{CatalogKind, CliArgs, EffectArg, DEFAULT_GREETING};
use crate::application::{
    ApplicationError, AudioPlayerPort, CatalogFetcher, HttpTransportPort, PlaybackError,
    SynthesisOutcome, TtsSessionClient,
};
use crate::config::SynthesisDefaults;
use crate::domain::catalog::server_version_number;
use crate::domain::split_text;
use crate::domain::synthesis::{AudioFormat, EffectSelection, SynthesisRequest};

/// 命令行错误
#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Application(#[from] ApplicationError),

    #[error("Playback failed: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Failed to read {path}: {source}")]
    ReadInput {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct CommandLineDriver {
    tts: TtsSessionClient,
    catalog: CatalogFetcher,
    player: Arc<dyn AudioPlayerPort>,
}

impl CommandLineDriver {
    pub fn new(transport: Arc<dyn HttpTransportPort>, player: Arc<dyn AudioPlayerPort>) -> Self {
        Self {
            tts: TtsSessionClient::new(transport.clone()),
            catalog: CatalogFetcher::new(transport),
            player,
        }
    }

    /// 执行一次命令行调用；文本类结果写入 `out`
    pub async fn run<W: Write>(
        &self,
        args: &CliArgs,
        defaults: &SynthesisDefaults,
        out: &mut W,
    ) -> Result<(), DriverError> {
        if let Some(kind) = args.list {
            return self.list(kind, args.json, out).await;
        }

        let chunks = read_chunks(args).await?;
        let effects = self.resolve_effects(&args.effects).await?;

        tracing::debug!(chunks = chunks.len(), effects = effects.len(), "Speaking input");

        for chunk in chunks {
            if args.echo {
                eprintln!("{}", chunk);
            }

            let request = build_request(chunk, args, defaults, &effects);
            match self.tts.synthesize(request).await? {
                SynthesisOutcome::Audio { data, mime_type } => {
                    self.player.play(&data, &mime_type).await?;
                }
                SynthesisOutcome::Text(text) => {
                    out.write_all(text.as_bytes())?;
                    if !text.ends_with('\n') {
                        out.write_all(b"\n")?;
                    }
                }
                SynthesisOutcome::Skipped => {}
            }
        }

        out.flush()?;
        Ok(())
    }

    /// 未给出参数的音效使用服务端默认参数
    async fn resolve_effects(&self, effects: &[EffectArg]) -> Result<Vec<EffectSelection>, DriverError> {
        let mut selections = Vec::with_capacity(effects.len());
        for effect in effects {
            let parameters = match &effect.parameters {
                Some(parameters) => parameters.clone(),
                None => self
                    .catalog
                    .fetch_effect_default_parameters(&effect.name)
                    .await?
                    .trim()
                    .to_string(),
            };
            selections.push(EffectSelection::selected(effect.name.as_str(), parameters));
        }
        Ok(selections)
    }

    async fn list<W: Write>(&self, kind: CatalogKind, json: bool, out: &mut W) -> Result<(), DriverError> {
        match kind {
            CatalogKind::Voices => {
                let catalog = self.catalog.fetch_voices().await?;
                if json {
                    serde_json::to_writer_pretty(&mut *out, &catalog)?;
                    writeln!(out)?;
                } else {
                    for voice in &catalog.voices {
                        let voice_type = voice.voice_type.as_deref().unwrap_or("-");
                        let domain = voice.domain.as_deref().unwrap_or("general");
                        writeln!(
                            out,
                            "{:<24} {:<8} {:<8} {:<14} {}",
                            voice.name, voice.locale, voice.gender, voice_type, domain
                        )?;
                    }
                }
            }
            CatalogKind::Datatypes => {
                let catalog = self.catalog.fetch_data_types().await?;
                if json {
                    serde_json::to_writer_pretty(&mut *out, &catalog)?;
                    writeln!(out)?;
                } else {
                    for data_type in &catalog.types {
                        let direction = match (data_type.is_input, data_type.is_output) {
                            (true, true) => "INPUT OUTPUT",
                            (true, false) => "INPUT",
                            (false, true) => "OUTPUT",
                            (false, false) => "",
                        };
                        let locale = data_type.locale.as_deref().unwrap_or("");
                        writeln!(out, "{:<28} {:<8} {}", data_type.name, locale, direction)?;
                    }
                }
            }
            CatalogKind::Audioformats => {
                let catalog = self.catalog.fetch_audio_formats().await?;
                if json {
                    serde_json::to_writer_pretty(&mut *out, &catalog)?;
                    writeln!(out)?;
                } else {
                    let default = catalog.default_format().cloned();
                    for format in &catalog.formats {
                        let marker = if Some(format) == default.as_ref() { " *" } else { "" };
                        writeln!(out, "{}{}", format, marker)?;
                    }
                }
            }
            CatalogKind::Effects => {
                let effects = self.catalog.fetch_effects().await?;
                if json {
                    serde_json::to_writer_pretty(&mut *out, &effects)?;
                    writeln!(out)?;
                } else {
                    for effect in &effects {
                        writeln!(out, "{:<16} {}", effect.name, effect.default_parameters)?;
                    }
                }
            }
            CatalogKind::Version => {
                let lines = self.catalog.fetch_version().await?;
                if json {
                    let value = serde_json::json!({
                        "version": server_version_number(&lines),
                        "details": lines,
                    });
                    serde_json::to_writer_pretty(&mut *out, &value)?;
                    writeln!(out)?;
                } else {
                    for line in &lines {
                        writeln!(out, "{}", line)?;
                    }
                }
            }
        }

        out.flush()?;
        Ok(())
    }
}

/// 输入文本切块: 命令行文本 > 文件 > 问候语
async fn read_chunks(args: &CliArgs) -> Result<Vec<String>, DriverError> {
    if let Some(text) = args.inline_text() {
        return Ok(vec![text]);
    }

    match &args.file {
        Some(path) => {
            let text = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| DriverError::ReadInput {
                    path: path.display().to_string(),
                    source,
                })?;
            Ok(split_text(&text, args.split))
        }
        None => Ok(vec![DEFAULT_GREETING.to_string()]),
    }
}

fn build_request(
    text: String,
    args: &CliArgs,
    defaults: &SynthesisDefaults,
    effects: &[EffectSelection],
) -> SynthesisRequest {
    let mut defaults = defaults.clone();
    args.apply_synthesis_overrides(&mut defaults);

    let mut request = SynthesisRequest::new(text)
        .with_input_type(defaults.input_type.parse().unwrap_or_default())
        .with_output_type(defaults.output_type.parse().unwrap_or_default())
        .with_locale(defaults.locale.as_str())
        .with_voice(defaults.voice.clone().unwrap_or_default())
        .with_audio_format(AudioFormat::new(defaults.audio_format.as_str()))
        .with_effects(effects.iter().cloned())
        .with_modification(args.modification);

    if let Some(voice_type) = &args.voice_type {
        request = request.with_voice_type(voice_type.as_str());
    }
    if let Some(features) = &args.target_features {
        request = request.with_target_features(features.as_str());
    }
    request
}
