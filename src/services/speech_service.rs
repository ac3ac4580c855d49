//! 语音合成服务 - 业务能力层
//!
//! 按需朗读任意文本（例如朗读问题），不持有会话状态。

use std::sync::Arc;
use tracing::{info, warn};

use crate::clients::CapabilityProvider;
use crate::error::{CapabilityError, SynthesisFailure};
use crate::models::SpeechOptions;

/// 语音合成服务
pub struct SpeechService {
    provider: Arc<dyn CapabilityProvider>,
    max_chars: usize,
}

impl SpeechService {
    pub fn new(provider: Arc<dyn CapabilityProvider>, max_chars: usize) -> Self {
        Self {
            provider,
            max_chars,
        }
    }

    /// 合成语音，返回 mp3 字节
    pub async fn synthesize(
        &self,
        text: &str,
        options: SpeechOptions,
    ) -> Result<Vec<u8>, SynthesisFailure> {
        let char_count = text.chars().count();
        if char_count > self.max_chars {
            warn!(
                "输入文本过长: {} 个字符 (上限 {})",
                char_count, self.max_chars
            );
            return Err(SynthesisFailure::InputTooLong);
        }

        info!(
            "🔊 正在进行语音合成 (模型: {}, 语音: {})...",
            options.model, options.voice
        );

        match self
            .provider
            .synthesize_speech(text, options.voice, options.model)
            .await
        {
            Ok(audio) => {
                info!("✓ 语音合成成功，音频大小: {} bytes", audio.len());
                Ok(audio)
            }
            Err(CapabilityError::InputTooLong { message }) => {
                warn!("❌ 输入文本过长: {}", message);
                Err(SynthesisFailure::InputTooLong)
            }
            Err(e) => {
                warn!("❌ 语音合成失败 ({}): {}", self.provider.name(), e);
                Err(SynthesisFailure::Failed(e.to_string()))
            }
        }
    }
}
