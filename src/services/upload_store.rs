//! 上传音频的临时存储 - 业务能力层
//!
//! 只负责"暂存 / 读取 / 删除上传的音频"能力。
//! 临时文件在识别结束后立即删除；漏删时由 Drop 兜底。

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use crate::error::FileError;
use crate::models::AudioPayload;

/// 上传文件名为空时使用的名字
pub const DEFAULT_AUDIO_NAME: &str = "default_audio.webm";

/// 临时音频存储
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 确保上传目录存在
    pub async fn ensure_dir(&self) -> Result<(), FileError> {
        if fs::try_exists(&self.dir).await.unwrap_or(false) {
            return Ok(());
        }
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| FileError::CreateDirFailed {
                path: self.dir.display().to_string(),
                source,
            })?;
        debug!("创建上传文件夹: {}", self.dir.display());
        Ok(())
    }

    /// 保存上传的音频
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<TempAudioFile, FileError> {
        let file_name = secure_file_name(original_name);
        let path = self
            .dir
            .join(format!("{}-{}", uuid::Uuid::new_v4().simple(), file_name));

        fs::write(&path, bytes)
            .await
            .map_err(|source| FileError::WriteFailed {
                path: path.display().to_string(),
                source,
            })?;
        debug!("音频文件已保存到: {} ({} bytes)", path.display(), bytes.len());

        Ok(TempAudioFile {
            path,
            file_name,
            removed: false,
        })
    }
}

/// 一个已落盘的上传音频
#[derive(Debug)]
pub struct TempAudioFile {
    path: PathBuf,
    file_name: String,
    removed: bool,
}

impl TempAudioFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 清洗后的原始文件名
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// 读取为识别用的音频
    pub async fn read(&self) -> Result<AudioPayload, FileError> {
        let bytes = fs::read(&self.path)
            .await
            .map_err(|source| FileError::ReadFailed {
                path: self.path.display().to_string(),
                source,
            })?;
        Ok(AudioPayload::new(self.file_name.clone(), bytes))
    }

    /// 删除临时文件
    pub async fn remove(mut self) -> Result<(), FileError> {
        self.removed = true;
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!("临时音频文件已删除: {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(FileError::DeleteFailed {
                path: self.path.display().to_string(),
                source,
            }),
        }
    }
}

impl Drop for TempAudioFile {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("删除临时音频文件失败 {}: {}", self.path.display(), e);
            }
        }
    }
}

/// 清洗上传文件名：去掉路径部分，只保留 ASCII 字母数字和 `.-_`
pub fn secure_file_name(original: &str) -> String {
    let base = original.rsplit(['/', '\\']).next().unwrap_or_default();
    let path = Path::new(base);
    let stem = sanitize_part(path.file_stem().and_then(|s| s.to_str()).unwrap_or_default());
    let ext = sanitize_part(path.extension().and_then(|s| s.to_str()).unwrap_or_default());

    match (stem.is_empty(), ext.is_empty()) {
        (true, true) => DEFAULT_AUDIO_NAME.to_string(),
        (false, true) => stem,
        (true, false) => format!("audio.{}", ext),
        (false, false) => format!("{}.{}", stem, ext),
    }
}

fn sanitize_part(part: &str) -> String {
    let cleaned: String = part
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    cleaned.trim_matches(|c| c == '.' || c == '_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_file_name() {
        assert_eq!(secure_file_name("answer 1.webm"), "answer_1.webm");
        assert_eq!(secure_file_name("../../etc/passwd"), "passwd");
        assert_eq!(secure_file_name("C:\\tmp\\录音.wav"), "audio.wav");
        assert_eq!(secure_file_name(""), DEFAULT_AUDIO_NAME);
        assert_eq!(secure_file_name("...."), DEFAULT_AUDIO_NAME);
    }

    #[tokio::test]
    async fn test_save_read_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("uploads"));
        store.ensure_dir().await.unwrap();

        let file = store.save("answer.webm", b"webm-bytes").await.unwrap();
        let path = file.path().to_path_buf();
        assert!(path.exists());
        assert_eq!(file.file_name(), "answer.webm");

        let payload = file.read().await.unwrap();
        assert_eq!(payload.bytes, b"webm-bytes");
        assert_eq!(payload.file_name, "answer.webm");

        file.remove().await.unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_drop_deletes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());

        let path = {
            let file = store.save("a.mp3", b"x").await.unwrap();
            file.path().to_path_buf()
        };
        assert!(!path.exists());
    }
}
