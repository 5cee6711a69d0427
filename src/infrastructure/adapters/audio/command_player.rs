//! Command Audio Player - 通过外部播放程序播放音频
//!
//! 音频经由标准输入写给播放程序，例如 `aplay -q -`

use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;

use crate::application::ports::{AudioPlayerPort, PlaybackError};

/// 外部播放程序配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandAudioPlayerConfig {
    pub command: String,
    pub args: Vec<String>,
}

impl Default for CommandAudioPlayerConfig {
    fn default() -> Self {
        Self {
            command: "aplay".to_string(),
            args: vec!["-q".to_string(), "-".to_string()],
        }
    }
}

pub struct CommandAudioPlayer {
    config: CommandAudioPlayerConfig,
}

impl CommandAudioPlayer {
    pub fn new(config: CommandAudioPlayerConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl AudioPlayerPort for CommandAudioPlayer {
    async fn play(&self, audio: &[u8], mime_type: &str) -> Result<(), PlaybackError> {
        tracing::debug!(
            command = %self.config.command,
            mime_type = %mime_type,
            size = audio.len(),
            "Starting audio player"
        );

        let mut child = Command::new(&self.config.command)
            .args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| PlaybackError::Spawn(format!("{}: {}", self.config.command, e)))?;

        let stdin = child.stdin.take();
        let stderr = child.stderr.take();

        // 写入音频的同时读取 stderr，避免双方都卡在写满的管道上
        let write = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(audio).await?;
                // 关闭 stdin，播放程序才能读到 EOF
                stdin.shutdown().await?;
            }
            Ok::<(), std::io::Error>(())
        };
        let drain = async move {
            let mut buf = Vec::new();
            if let Some(mut stderr) = stderr {
                let _ = stderr.read_to_end(&mut buf).await;
            }
            buf
        };
        let (written, stderr) = tokio::join!(write, drain);

        let status = child
            .wait()
            .await
            .map_err(|e| PlaybackError::IoError(e.to_string()))?;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr).trim().to_string();
            return Err(PlaybackError::PlayerFailed(format!(
                "{} ({}): {}",
                self.config.command, status, stderr
            )));
        }
        written.map_err(|e| PlaybackError::IoError(e.to_string()))?;

        Ok(())
    }
}
