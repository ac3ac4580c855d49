//! 语音合成选项
//!
//! 语音和模型都是固定的预设集合，输出格式固定为 mp3。

use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 预设语音
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechVoice {
    Alloy,
    Echo,
    Fable,
    Onyx,
    #[default]
    Nova,
    Shimmer,
}

impl SpeechVoice {
    pub const ALL: [SpeechVoice; 6] = [
        SpeechVoice::Alloy,
        SpeechVoice::Echo,
        SpeechVoice::Fable,
        SpeechVoice::Onyx,
        SpeechVoice::Nova,
        SpeechVoice::Shimmer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SpeechVoice::Alloy => "alloy",
            SpeechVoice::Echo => "echo",
            SpeechVoice::Fable => "fable",
            SpeechVoice::Onyx => "onyx",
            SpeechVoice::Nova => "nova",
            SpeechVoice::Shimmer => "shimmer",
        }
    }
}

impl FromStr for SpeechVoice {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|voice| voice.name() == wanted)
            .ok_or_else(|| InputError::UnknownVoice(s.to_string()))
    }
}

impl fmt::Display for SpeechVoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 预设合成模型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SpeechModel {
    #[serde(rename = "tts-1")]
    Tts1,
    #[default]
    #[serde(rename = "tts-1-hd")]
    Tts1Hd,
    #[serde(rename = "gpt-4o-mini-tts")]
    Gpt4oMiniTts,
}

impl SpeechModel {
    pub const ALL: [SpeechModel; 3] = [
        SpeechModel::Tts1,
        SpeechModel::Tts1Hd,
        SpeechModel::Gpt4oMiniTts,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SpeechModel::Tts1 => "tts-1",
            SpeechModel::Tts1Hd => "tts-1-hd",
            SpeechModel::Gpt4oMiniTts => "gpt-4o-mini-tts",
        }
    }
}

impl FromStr for SpeechModel {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|model| model.name() == wanted)
            .ok_or_else(|| InputError::UnknownSpeechModel(s.to_string()))
    }
}

impl fmt::Display for SpeechModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 一次合成请求的选项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpeechOptions {
    pub voice: SpeechVoice,
    pub model: SpeechModel,
}

impl SpeechOptions {
    /// 输出固定为 mp3
    pub const MIME_TYPE: &'static str = "audio/mpeg";

    /// 从客户端可选字段解析，缺省时使用给定默认值
    pub fn resolve(
        voice: Option<&str>,
        model: Option<&str>,
        defaults: SpeechOptions,
    ) -> Result<Self, InputError> {
        let voice = match voice.filter(|v| !v.trim().is_empty()) {
            Some(v) => v.parse()?,
            None => defaults.voice,
        };
        let model = match model.filter(|m| !m.trim().is_empty()) {
            Some(m) => m.parse()?,
            None => defaults.model,
        };
        Ok(Self { voice, model })
    }
}
