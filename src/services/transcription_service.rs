//! 语音识别服务 - 业务能力层
//!
//! 只负责"音频 → 文本"能力。结果要么是文本（可能为空），要么是明确的失败原因。

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::clients::CapabilityProvider;
use crate::error::{CapabilityError, TranscriptionFailure};
use crate::models::AudioPayload;
use crate::utils::truncate_text;

/// 语音识别服务
pub struct TranscriptionService {
    provider: Arc<dyn CapabilityProvider>,
    max_bytes: usize,
}

impl TranscriptionService {
    pub fn new(provider: Arc<dyn CapabilityProvider>, max_bytes: usize) -> Self {
        Self {
            provider,
            max_bytes,
        }
    }

    /// 识别音频
    ///
    /// 音频在本函数返回前被释放，无论成功与否
    pub async fn transcribe(
        &self,
        audio: AudioPayload,
        language_hint: Option<&str>,
    ) -> Result<String, TranscriptionFailure> {
        let language_hint = language_hint.map(str::trim).filter(|l| !l.is_empty());

        if audio.is_empty() {
            warn!("音频内容为空: {}", audio.file_name);
            return Err(TranscriptionFailure::UnsupportedFormat);
        }
        if audio.len() > self.max_bytes {
            warn!(
                "音频文件过大: {} bytes (上限 {} bytes)",
                audio.len(),
                self.max_bytes
            );
            return Err(TranscriptionFailure::PayloadTooLarge);
        }
        if audio.format().is_none() {
            warn!(
                "无效的音频文件格式: {} (支持 mp3, mp4, mpeg, mpga, m4a, wav, webm)",
                audio.file_name
            );
            return Err(TranscriptionFailure::UnsupportedFormat);
        }

        info!(
            "🎙️ 正在进行语音识别 (语言: {})...",
            language_hint.unwrap_or("自动检测")
        );
        debug!("音频: {:?}", audio);

        match self.provider.transcribe_audio(audio, language_hint).await {
            Ok(text) => {
                let text = text.trim().to_string();
                info!("✓ 识别结果: {}", truncate_text(&text, 100));
                Ok(text)
            }
            Err(e) => {
                warn!("❌ 语音识别失败 ({}): {}", self.provider.name(), e);
                Err(match e {
                    CapabilityError::PayloadTooLarge { .. } => TranscriptionFailure::PayloadTooLarge,
                    CapabilityError::UnsupportedFormat { .. } => {
                        TranscriptionFailure::UnsupportedFormat
                    }
                    other => TranscriptionFailure::Unknown(other.to_string()),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{MockProvider, RecordedCall};

    fn service(mock: &MockProvider, max_bytes: usize) -> TranscriptionService {
        TranscriptionService::new(Arc::new(mock.clone()), max_bytes)
    }

    #[tokio::test]
    async fn test_empty_text_is_success() {
        let mock = MockProvider::new();
        mock.push_transcription(Ok("   ".to_string()));

        let result = service(&mock, 1024)
            .transcribe(AudioPayload::new("silence.webm", vec![0; 16]), Some("zh"))
            .await;
        assert_eq!(result, Ok(String::new()));
    }

    #[tokio::test]
    async fn test_provider_too_large_is_distinguished() {
        let mock = MockProvider::new();
        mock.push_transcription(Err(CapabilityError::PayloadTooLarge {
            message: "File too large".to_string(),
        }));

        let result = service(&mock, 1024)
            .transcribe(AudioPayload::new("a.mp3", vec![1; 8]), None)
            .await;
        assert_eq!(result, Err(TranscriptionFailure::PayloadTooLarge));
    }

    #[tokio::test]
    async fn test_local_checks_skip_provider() {
        let mock = MockProvider::new();
        let svc = service(&mock, 4);

        assert_eq!(
            svc.transcribe(AudioPayload::new("a.wav", vec![1; 5]), None).await,
            Err(TranscriptionFailure::PayloadTooLarge)
        );
        assert_eq!(
            svc.transcribe(AudioPayload::new("a.txt", vec![1; 2]), None).await,
            Err(TranscriptionFailure::UnsupportedFormat)
        );
        assert_eq!(
            svc.transcribe(AudioPayload::new("a.wav", Vec::new()), None).await,
            Err(TranscriptionFailure::UnsupportedFormat)
        );
        assert_eq!(mock.transcription_calls(), 0);
    }

    #[tokio::test]
    async fn test_other_errors_are_unknown() {
        let mock = MockProvider::new();
        mock.push_transcription(Err(CapabilityError::Api {
            message: "502 Bad Gateway".to_string(),
        }));

        let result = service(&mock, 1024)
            .transcribe(AudioPayload::new("a.m4a", vec![1; 8]), Some(" "))
            .await;
        assert!(matches!(result, Err(TranscriptionFailure::Unknown(m)) if m.contains("502")));
        assert_eq!(
            mock.calls(),
            vec![RecordedCall::Transcription {
                file_name: "a.m4a".to_string(),
                size: 8,
                language_hint: None,
            }]
        );
    }
}
