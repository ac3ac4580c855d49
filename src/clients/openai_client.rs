//! OpenAI 能力提供方
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 对话、语音识别、语音合成共用同一个客户端
//! - 兼容 OpenAI API 的服务（通过 `openai_base_url` 切换）

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::audio::{
        AudioInput, AudioResponseFormat, CreateSpeechRequestArgs, CreateTranscriptionRequestArgs,
        SpeechModel as OpenAiSpeechModel, SpeechResponseFormat, Voice,
    },
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use regex::Regex;
use std::time::Duration;
use tracing::{debug, warn};

use crate::clients::provider::CapabilityProvider;
use crate::config::Config;
use crate::error::{CapabilityError, ConfigError};
use crate::models::{AudioPayload, SpeechModel, SpeechVoice};

/// OpenAI 能力提供方
///
/// 启动时构建一次，之后所有会话共享
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    chat_model: String,
    chat_temperature: f32,
    transcription_model: String,
}

impl OpenAiProvider {
    /// 创建新的提供方
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.openai_api_key)
            .with_api_base(&config.openai_base_url);

        let mut client = Client::with_config(openai_config);

        if let Some(secs) = config.request_timeout_secs {
            let http_client = reqwest::Client::builder()
                .timeout(Duration::from_secs(secs))
                .build()
                .map_err(|e| ConfigError::Invalid {
                    key: "request_timeout_secs",
                    reason: e.to_string(),
                })?;
            client = client.with_http_client(http_client);
        }

        Ok(Self {
            client,
            chat_model: config.chat_model.clone(),
            chat_temperature: config.chat_temperature,
            transcription_model: config.transcription_model.clone(),
        })
    }
}

#[async_trait]
impl CapabilityProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate_text(
        &self,
        system_role: &str,
        prompt: &str,
    ) -> Result<String, CapabilityError> {
        debug!("调用对话 API，模型: {}", self.chat_model);
        debug!("提示词长度: {} 字符", prompt.chars().count());

        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(system_role)
            .build()
            .map_err(invalid_request)?;
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(invalid_request)?;

        let messages = vec![
            ChatCompletionRequestMessage::System(system_msg),
            ChatCompletionRequestMessage::User(user_msg),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.chat_model)
            .messages(messages)
            .temperature(self.chat_temperature)
            .build()
            .map_err(invalid_request)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("对话 API 调用失败: {}", e);
            classify_error(&e.to_string())
        })?;

        debug!("对话 API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or(CapabilityError::EmptyResponse)?;

        Ok(content.trim().to_string())
    }

    async fn transcribe_audio(
        &self,
        audio: AudioPayload,
        language_hint: Option<&str>,
    ) -> Result<String, CapabilityError> {
        debug!(
            "调用语音识别 API，模型: {}，语言: {}，大小: {} bytes",
            self.transcription_model,
            language_hint.unwrap_or("自动检测"),
            audio.len()
        );

        let AudioPayload { file_name, bytes } = audio;
        let mut builder = CreateTranscriptionRequestArgs::default();
        builder
            .file(AudioInput::from_vec_u8(file_name, bytes))
            .model(&self.transcription_model)
            .response_format(AudioResponseFormat::Text);
        if let Some(language) = language_hint {
            builder.language(language);
        }
        let request = builder.build().map_err(invalid_request)?;

        // text 格式直接返回纯文本
        let raw = self
            .client
            .audio()
            .transcription()
            .create_raw(request)
            .await
            .map_err(|e| {
                warn!("语音识别 API 调用失败: {}", e);
                classify_error(&e.to_string())
            })?;

        Ok(String::from_utf8_lossy(&raw).trim().to_string())
    }

    async fn synthesize_speech(
        &self,
        text: &str,
        voice: SpeechVoice,
        model: SpeechModel,
    ) -> Result<Vec<u8>, CapabilityError> {
        debug!("调用语音合成 API，模型: {}，语音: {}", model, voice);

        let request = CreateSpeechRequestArgs::default()
            .model(openai_speech_model(model))
            .voice(openai_voice(voice))
            .input(text)
            .response_format(SpeechResponseFormat::Mp3)
            .build()
            .map_err(invalid_request)?;

        let response = self
            .client
            .audio()
            .speech()
            .create(request)
            .await
            .map_err(|e| {
                warn!("语音合成 API 调用失败: {}", e);
                classify_error(&e.to_string())
            })?;

        Ok(response.bytes.to_vec())
    }
}

fn invalid_request(e: OpenAIError) -> CapabilityError {
    CapabilityError::InvalidRequest {
        message: e.to_string(),
    }
}

fn openai_voice(voice: SpeechVoice) -> Voice {
    match voice {
        SpeechVoice::Alloy => Voice::Alloy,
        SpeechVoice::Echo => Voice::Echo,
        SpeechVoice::Fable => Voice::Fable,
        SpeechVoice::Onyx => Voice::Onyx,
        SpeechVoice::Nova => Voice::Nova,
        SpeechVoice::Shimmer => Voice::Shimmer,
    }
}

fn openai_speech_model(model: SpeechModel) -> OpenAiSpeechModel {
    match model {
        SpeechModel::Tts1 => OpenAiSpeechModel::Tts1,
        SpeechModel::Tts1Hd => OpenAiSpeechModel::Tts1Hd,
        SpeechModel::Gpt4oMiniTts => OpenAiSpeechModel::Other(model.name().to_string()),
    }
}

/// 将提供方的错误文本归类为可区分的失败原因
fn classify_error(message: &str) -> CapabilityError {
    let matches = |pattern: &str| {
        Regex::new(pattern)
            .map(|re| re.is_match(message))
            .unwrap_or(false)
    };

    let message = message.to_string();
    if matches(r"(?i)file too large|maximum content size|payload too large|request entity too large")
    {
        CapabilityError::PayloadTooLarge { message }
    } else if matches(r"(?i)invalid file format|unsupported (file|audio)? ?format|could not be decoded")
    {
        CapabilityError::UnsupportedFormat { message }
    } else if matches(r"(?i)input too long|string too long|maximum (input )?length") {
        CapabilityError::InputTooLong { message }
    } else {
        CapabilityError::Api { message }
    }
}
