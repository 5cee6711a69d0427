//! Configuration Types
//!
//! 定义所有配置结构体

use serde::{Deserialize, Serialize};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// MARY 服务端地址
    #[serde(default)]
    pub server: ServerConfig,

    /// HTTP 客户端配置
    #[serde(default)]
    pub client: ClientConfig,

    /// 合成请求默认值
    #[serde(default)]
    pub synthesis: SynthesisDefaults,

    /// 音频播放配置
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务端配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// 完整的服务端根地址，设置后忽略 host/port
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    59125
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
        }
    }
}

impl ServerConfig {
    /// 服务端根地址
    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| format!("http://{}:{}", self.host, self.port))
    }
}

/// HTTP 客户端配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// 单次请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
        }
    }
}

/// 合成请求默认值
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SynthesisDefaults {
    #[serde(default = "default_input_type")]
    pub input_type: String,

    #[serde(default = "default_output_type")]
    pub output_type: String,

    #[serde(default = "default_locale")]
    pub locale: String,

    /// 为空时由服务端选择默认音色
    #[serde(default)]
    pub voice: Option<String>,

    #[serde(default = "default_audio_format")]
    pub audio_format: String,
}

fn default_input_type() -> String {
    "TEXT".to_string()
}

fn default_output_type() -> String {
    "AUDIO".to_string()
}

fn default_locale() -> String {
    "en_US".to_string()
}

fn default_audio_format() -> String {
    "WAVE_FILE".to_string()
}

impl Default for SynthesisDefaults {
    fn default() -> Self {
        Self {
            input_type: default_input_type(),
            output_type: default_output_type(),
            locale: default_locale(),
            voice: None,
            audio_format: default_audio_format(),
        }
    }
}

/// 音频播放配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackConfig {
    /// 外部播放程序，音频从标准输入写入
    #[serde(default = "default_playback_command")]
    pub command: String,

    #[serde(default = "default_playback_args")]
    pub args: Vec<String>,
}

fn default_playback_command() -> String {
    "aplay".to_string()
}

fn default_playback_args() -> Vec<String> {
    vec!["-q".to_string(), "-".to_string()]
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            command: default_playback_command(),
            args: default_playback_args(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
