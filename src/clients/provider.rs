//! 能力提供方接口
//!
//! 编排层只依赖这个 trait，具体的 AI 服务（或测试替身）在启动时注入。

use async_trait::async_trait;

use crate::error::CapabilityError;
use crate::models::{AudioPayload, SpeechModel, SpeechVoice};

/// 无状态的外部 AI 能力
#[async_trait]
pub trait CapabilityProvider: Send + Sync {
    /// 提供方名称（仅用于日志）
    fn name(&self) -> &str;

    /// 文本生成：问题生成、回答分析、总体评估共用
    async fn generate_text(&self, system_role: &str, prompt: &str)
        -> Result<String, CapabilityError>;

    /// 语音识别
    ///
    /// 音频按值传入，调用返回时字节即被释放
    async fn transcribe_audio(
        &self,
        audio: AudioPayload,
        language_hint: Option<&str>,
    ) -> Result<String, CapabilityError>;

    /// 语音合成，返回编码后的音频字节
    async fn synthesize_speech(
        &self,
        text: &str,
        voice: SpeechVoice,
        model: SpeechModel,
    ) -> Result<Vec<u8>, CapabilityError>;
}
