//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（mary-client.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["mary-client", "mary-client.local"];

/// 加载应用配置
///
/// # 环境变量示例
/// - `MARY_SERVER__HOST=tts.example.org`
/// - `MARY_SERVER__PORT=59125`
/// - `MARY_CLIENT__TIMEOUT_SECS=10`
/// - `MARY_SYNTHESIS__VOICE=cmu-slt-hsmm`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，给定时文件必须存在；为 None 时搜索工作目录
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "localhost")?
        .set_default("server.port", 59125)?
        .set_default("client.timeout_secs", 30)?
        .set_default("synthesis.input_type", "TEXT")?
        .set_default("synthesis.output_type", "AUDIO")?
        .set_default("synthesis.locale", "en_US")?
        .set_default("synthesis.audio_format", "WAVE_FILE")?
        .set_default("playback.command", "aplay")?
        .set_default("playback.args", vec!["-q", "-"])?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: MARY_SERVER__HOST=tts.example.org
    builder = builder.add_source(
        Environment::with_prefix("MARY")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.server.host.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Server host cannot be empty".to_string(),
        ));
    }

    if config.client.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Client timeout cannot be 0".to_string(),
        ));
    }

    if config.playback.command.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Playback command cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（debug 级别）
pub fn print_config(config: &AppConfig) {
    tracing::debug!("=== Client Configuration ===");
    tracing::debug!("Server: {}", config.server.base_url());
    tracing::debug!("Timeout: {}s", config.client.timeout_secs);
    tracing::debug!(
        "Synthesis: {} -> {} ({}), voice={}, audio={}",
        config.synthesis.input_type,
        config.synthesis.output_type,
        config.synthesis.locale,
        config.synthesis.voice.as_deref().unwrap_or("<server default>"),
        config.synthesis.audio_format
    );
    tracing::debug!(
        "Playback: {} {}",
        config.playback.command,
        config.playback.args.join(" ")
    );
    tracing::debug!("Log Level: {}", config.log.level);
    tracing::debug!("============================");
}
