//! File Audio Player - 把音频写入文件
//!
//! 第一段写入给定路径，之后的分段依次写入 `name-1.ext`、`name-2.ext` ...

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::fs;

use crate::application::ports::{AudioPlayerPort, PlaybackError};

pub struct FileAudioPlayer {
    path: PathBuf,
    written: AtomicUsize,
}

impl FileAudioPlayer {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            written: AtomicUsize::new(0),
        }
    }

    /// 第 index 段音频的文件路径（从 0 开始）
    pub fn path_for(&self, index: usize) -> PathBuf {
        if index == 0 {
            return self.path.clone();
        }

        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_name = match self.path.extension() {
            Some(ext) => format!("{}-{}.{}", stem, index, ext.to_string_lossy()),
            None => format!("{}-{}", stem, index),
        };
        self.path.with_file_name(file_name)
    }
}

#[async_trait]
impl AudioPlayerPort for FileAudioPlayer {
    async fn play(&self, audio: &[u8], mime_type: &str) -> Result<(), PlaybackError> {
        let index = self.written.fetch_add(1, Ordering::SeqCst);
        let path = self.path_for(index);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| PlaybackError::IoError(e.to_string()))?;
        }

        fs::write(&path, audio)
            .await
            .map_err(|e| PlaybackError::IoError(format!("{}: {}", path.display(), e)))?;

        tracing::info!(
            path = %path.display(),
            mime_type = %mime_type,
            size = audio.len(),
            "Audio written"
        );
        Ok(())
    }
}
