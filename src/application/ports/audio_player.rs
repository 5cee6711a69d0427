//! Audio Player Port - 音频播放抽象
//!
//! 播放设备与编解码不在本 crate 范围内，由注入的实现负责

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("Failed to start player: {0}")]
    Spawn(String),

    #[error("Player exited with error: {0}")]
    PlayerFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

#[async_trait]
pub trait AudioPlayerPort: Send + Sync {
    /// 播放一段完整的音频
    async fn play(&self, audio: &[u8], mime_type: &str) -> Result<(), PlaybackError>;
}
