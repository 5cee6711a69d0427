//! 命令行参数

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{AppConfig, SynthesisDefaults};
use crate::domain::SplitMode;

/// 没有输入时朗读的问候语
pub const DEFAULT_GREETING: &str = "Welcome to the world of speech synthesis!";

/// Command-line client for a MARY TTS server
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "mary-client")]
#[command(version)]
#[command(about = "Speak text through a MARY TTS server", long_about = None)]
pub struct CliArgs {
    /// Words to speak (defaults to a greeting)
    pub words: Vec<String>,

    /// Read the text from a file
    #[arg(short = 'f', long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// How to chunk file input: none, lines, paragraphs
    #[arg(long, default_value = "none")]
    pub split: SplitMode,

    /// Audio format token, e.g. WAVE_FILE
    #[arg(short = 'a', long, value_name = "FORMAT")]
    pub audio: Option<String>,

    /// Server host
    #[arg(long)]
    pub host: Option<String>,

    /// Server port
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Input data type, e.g. TEXT, SSML
    #[arg(short = 'i', long, value_name = "TYPE")]
    pub input_type: Option<String>,

    /// Output data type, e.g. AUDIO, PHONEMES
    #[arg(short = 'o', long, value_name = "TYPE")]
    pub output_type: Option<String>,

    /// Locale, e.g. en_US
    #[arg(short = 'l', long)]
    pub locale: Option<String>,

    /// Voice name
    #[arg(short = 'v', long)]
    pub voice: Option<String>,

    /// Apply an audio effect; server defaults are used when PARAMS is omitted
    #[arg(long = "effect", value_name = "NAME[=PARAMS]", value_parser = EffectArg::parse)]
    pub effects: Vec<EffectArg>,

    /// Request prosody modification (unit selection voices with audio output only)
    #[arg(long)]
    pub modification: bool,

    /// Target feature list for TARGETFEATURES output
    #[arg(long, value_name = "LIST")]
    pub target_features: Option<String>,

    /// Type of the selected voice, e.g. unitselection, hmm
    #[arg(long, value_name = "TYPE")]
    pub voice_type: Option<String>,

    /// Echo each chunk to stderr before speaking it
    #[arg(short = 'e', long)]
    pub echo: bool,

    /// Also write the audio bytes to stdout
    #[arg(short = 't', long)]
    pub tee: bool,

    /// Write audio to a file instead of playing it
    #[arg(short = 'w', long = "write", value_name = "PATH")]
    pub write: Option<PathBuf>,

    /// Print a server catalog and exit
    #[arg(long, value_enum, value_name = "CATALOG")]
    pub list: Option<CatalogKind>,

    /// Print catalogs as JSON
    #[arg(long, requires = "list")]
    pub json: bool,

    /// Run an interactive perception test
    #[arg(long, value_name = "EMAIL", conflicts_with = "list")]
    pub perception: Option<String>,

    /// Configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// 可列出的服务端目录
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CatalogKind {
    Voices,
    Datatypes,
    Audioformats,
    Effects,
    Version,
}

/// `--effect` 参数: 名称和可选的参数串
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectArg {
    pub name: String,
    pub parameters: Option<String>,
}

impl EffectArg {
    /// `Robot` 或 `Robot=amount:80.0;`
    pub fn parse(arg: &str) -> Result<Self, String> {
        let (name, parameters) = match arg.split_once('=') {
            Some((name, params)) => (name.trim(), Some(params.to_string())),
            None => (arg.trim(), None),
        };
        if name.is_empty() {
            return Err(format!("missing effect name in '{}'", arg));
        }
        Ok(Self {
            name: name.to_string(),
            parameters,
        })
    }
}

impl CliArgs {
    /// 用命令行参数覆盖配置值
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
            config.server.base_url = None;
        }
        if let Some(port) = self.port {
            config.server.port = port;
            config.server.base_url = None;
        }

        self.apply_synthesis_overrides(&mut config.synthesis);
    }

    /// 用命令行参数覆盖合成默认值
    pub fn apply_synthesis_overrides(&self, synthesis: &mut SynthesisDefaults) {
        if let Some(input_type) = &self.input_type {
            synthesis.input_type = input_type.clone();
        }
        if let Some(output_type) = &self.output_type {
            synthesis.output_type = output_type.clone();
        }
        if let Some(locale) = &self.locale {
            synthesis.locale = locale.clone();
        }
        if let Some(voice) = &self.voice {
            synthesis.voice = Some(voice.clone());
        }
        if let Some(audio) = &self.audio {
            synthesis.audio_format = audio.clone();
        }
    }

    /// 命令行上直接给出的文本
    pub fn inline_text(&self) -> Option<String> {
        if self.words.is_empty() {
            None
        } else {
            Some(self.words.join(" "))
        }
    }

}
