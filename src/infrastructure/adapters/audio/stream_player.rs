//! Stream / FanOut Audio Players
//!
//! - StdoutAudioPlayer: 把原始音频写到标准输出，便于管道处理
//! - FanOutAudioPlayer: 把同一段音频依次交给多个播放器

use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

use crate::application::ports::{AudioPlayerPort, PlaybackError};

/// 写入任意异步输出流的播放器
pub struct StreamAudioPlayer<W> {
    writer: Mutex<W>,
}

/// 写入标准输出
pub type StdoutAudioPlayer = StreamAudioPlayer<tokio::io::Stdout>;

impl<W> StreamAudioPlayer<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl StdoutAudioPlayer {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

#[async_trait]
impl<W> AudioPlayerPort for StreamAudioPlayer<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn play(&self, audio: &[u8], _mime_type: &str) -> Result<(), PlaybackError> {
        let mut writer = self.writer.lock().await;
        writer
            .write_all(audio)
            .await
            .map_err(|e| PlaybackError::IoError(e.to_string()))?;
        writer
            .flush()
            .await
            .map_err(|e| PlaybackError::IoError(e.to_string()))
    }
}

/// 依次交给每个播放器，遇到第一个错误即返回
pub struct FanOutAudioPlayer {
    players: Vec<Arc<dyn AudioPlayerPort>>,
}

impl FanOutAudioPlayer {
    pub fn new(players: Vec<Arc<dyn AudioPlayerPort>>) -> Self {
        Self { players }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[async_trait]
impl AudioPlayerPort for FanOutAudioPlayer {
    async fn play(&self, audio: &[u8], mime_type: &str) -> Result<(), PlaybackError> {
        for player in &self.players {
            player.play(audio, mime_type).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stream_player_writes_raw_bytes() {
        let player = StreamAudioPlayer::new(Vec::<u8>::new());
        player.play(b"RIFF", "audio/wav").await.unwrap();
        player.play(b"WAVE", "audio/wav").await.unwrap();
        assert_eq!(player.into_inner(), b"RIFFWAVE".to_vec());
    }

    #[tokio::test]
    async fn test_fan_out_reaches_every_player() {
        let first = Arc::new(StreamAudioPlayer::new(Vec::<u8>::new()));
        let second = Arc::new(StreamAudioPlayer::new(Vec::<u8>::new()));
        let players: Vec<Arc<dyn AudioPlayerPort>> = vec![first.clone(), second.clone()];
        let fan_out = FanOutAudioPlayer::new(players);

        fan_out.play(b"audio", "audio/wav").await.unwrap();
        drop(fan_out);

        let first = Arc::try_unwrap(first).ok().unwrap().into_inner();
        let second = Arc::try_unwrap(second).ok().unwrap().into_inner();
        assert_eq!(first, b"audio".to_vec());
        assert_eq!(second, b"audio".to_vec());
    }
}
