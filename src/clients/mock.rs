//! 测试用能力提供方
//!
//! 按能力分别排队脚本化的结果，并记录每一次调用。
//! 队列为空时返回固定的默认结果。

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::clients::provider::CapabilityProvider;
use crate::error::CapabilityError;
use crate::models::{AudioPayload, SpeechModel, SpeechVoice};

/// 一次被记录的调用
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Text {
        system_role: String,
        prompt: String,
    },
    Transcription {
        file_name: String,
        size: usize,
        language_hint: Option<String>,
    },
    Speech {
        text: String,
        voice: SpeechVoice,
        model: SpeechModel,
    },
}

#[derive(Default)]
struct MockState {
    text_responses: VecDeque<Result<String, CapabilityError>>,
    transcription_responses: VecDeque<Result<String, CapabilityError>>,
    speech_responses: VecDeque<Result<Vec<u8>, CapabilityError>>,
    calls: Vec<RecordedCall>,
}

/// 可脚本化的能力提供方
#[derive(Clone, Default)]
pub struct MockProvider {
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn push_text(&self, response: Result<String, CapabilityError>) -> &Self {
        self.state().text_responses.push_back(response);
        self
    }

    pub fn push_transcription(&self, response: Result<String, CapabilityError>) -> &Self {
        self.state().transcription_responses.push_back(response);
        self
    }

    pub fn push_speech(&self, response: Result<Vec<u8>, CapabilityError>) -> &Self {
        self.state().speech_responses.push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state().calls.clone()
    }

    /// 所有文本生成调用的 (system_role, prompt)
    pub fn text_prompts(&self) -> Vec<(String, String)> {
        self.state()
            .calls
            .iter()
            .filter_map(|call| match call {
                RecordedCall::Text {
                    system_role,
                    prompt,
                } => Some((system_role.clone(), prompt.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn text_calls(&self) -> usize {
        self.count(|call| matches!(call, RecordedCall::Text { .. }))
    }

    pub fn transcription_calls(&self) -> usize {
        self.count(|call| matches!(call, RecordedCall::Transcription { .. }))
    }

    pub fn speech_calls(&self) -> usize {
        self.count(|call| matches!(call, RecordedCall::Speech { .. }))
    }

    fn count(&self, predicate: impl Fn(&RecordedCall) -> bool) -> usize {
        self.state().calls.iter().filter(|call| predicate(call)).count()
    }
}

#[async_trait]
impl CapabilityProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate_text(
        &self,
        system_role: &str,
        prompt: &str,
    ) -> Result<String, CapabilityError> {
        let mut state = self.state();
        state.calls.push(RecordedCall::Text {
            system_role: system_role.to_string(),
            prompt: prompt.to_string(),
        });
        state
            .text_responses
            .pop_front()
            .unwrap_or_else(|| Ok("mock response".to_string()))
    }

    async fn transcribe_audio(
        &self,
        audio: AudioPayload,
        language_hint: Option<&str>,
    ) -> Result<String, CapabilityError> {
        let mut state = self.state();
        state.calls.push(RecordedCall::Transcription {
            file_name: audio.file_name.clone(),
            size: audio.len(),
            language_hint: language_hint.map(str::to_string),
        });
        state
            .transcription_responses
            .pop_front()
            .unwrap_or_else(|| Ok("mock transcript".to_string()))
    }

    async fn synthesize_speech(
        &self,
        text: &str,
        voice: SpeechVoice,
        model: SpeechModel,
    ) -> Result<Vec<u8>, CapabilityError> {
        let mut state = self.state();
        state.calls.push(RecordedCall::Speech {
            text: text.to_string(),
            voice,
            model,
        });
        state
            .speech_responses
            .pop_front()
            .unwrap_or_else(|| Ok(b"ID3mock".to_vec()))
    }
}
