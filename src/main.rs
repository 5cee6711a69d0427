//! mary-client - MARY TTS 命令行客户端
//!
//! - 朗读命令行文本或文件（可按行/段落分块）
//! - 列出服务端目录（音色、数据类型、音频格式、音效、版本）
//! - 交互式感知测试

use std::sync::Arc;

use clap::Parser;

use marytts_client::application::{AudioPlayerPort, PerceptionTestController};
use marytts_client::cli::{run_perception_test, CliArgs, CommandLineDriver, Console};
use marytts_client::config::{load_config_from_path, print_config, LogConfig, PlaybackConfig};
use marytts_client::infrastructure::adapters::{
    CommandAudioPlayer, CommandAudioPlayerConfig, FanOutAudioPlayer, FileAudioPlayer,
    HttpTransportClient, HttpTransportClientConfig, StdoutAudioPlayer,
};

fn init_tracing(log: &LogConfig) {
    let log_filter = format!("warn,marytts_client={},mary_client={}", log.level, log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    // stdout 留给音频和文本输出
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// 根据参数组装音频输出: 写文件或外部播放器，可选再写一份到 stdout
fn build_player(args: &CliArgs, playback: &PlaybackConfig) -> Arc<dyn AudioPlayerPort> {
    let primary: Arc<dyn AudioPlayerPort> = match &args.write {
        Some(path) => Arc::new(FileAudioPlayer::new(path)),
        None => Arc::new(CommandAudioPlayer::new(CommandAudioPlayerConfig {
            command: playback.command.clone(),
            args: playback.args.clone(),
        })),
    };

    if args.tee {
        let tee: Arc<dyn AudioPlayerPort> = Arc::new(StdoutAudioPlayer::stdout());
        Arc::new(FanOutAudioPlayer::new(vec![primary, tee]))
    } else {
        primary
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 加载配置（优先级：命令行 > 环境变量 > 配置文件 > 默认值）
    let mut config = load_config_from_path(args.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    args.apply_overrides(&mut config);

    init_tracing(&config.log);
    print_config(&config);

    let transport = Arc::new(HttpTransportClient::new(
        HttpTransportClientConfig::new(config.server.base_url())
            .with_timeout(config.client.timeout_secs),
    )?);
    let player = build_player(&args, &config.playback);

    let work = async {
        if let Some(email) = &args.perception {
            let mut controller = PerceptionTestController::new(transport.clone());
            let mut console = Console::new(
                tokio::io::BufReader::new(tokio::io::stdin()),
                tokio::io::stdout(),
            );
            run_perception_test(&mut controller, player.clone(), email, &mut console).await
        } else {
            let driver = CommandLineDriver::new(transport.clone(), player.clone());
            let mut stdout = std::io::stdout();
            driver.run(&args, &config.synthesis, &mut stdout).await
        }
    };

    tokio::select! {
        result = work => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted");
        }
    }

    Ok(())
}
