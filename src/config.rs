//! 程序配置
//!
//! 默认值 → 可选的 TOML 文件 → 环境变量，后者覆盖前者。

use crate::error::ConfigError;
use crate::models::{SpeechModel, SpeechVoice};
use serde::Deserialize;
use std::path::Path;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- OpenAI 配置 ---
    pub openai_api_key: String,
    pub openai_base_url: String,
    /// 问题生成、回答分析、总体评估使用的对话模型
    pub chat_model: String,
    pub chat_temperature: f32,
    pub transcription_model: String,
    /// 请求超时（秒），不设置则不限时
    pub request_timeout_secs: Option<u64>,
    // --- 面试配置 ---
    /// 每场面试生成的问题数量
    pub question_count: usize,
    /// 客户端未指定时的识别语言
    pub default_language: String,
    pub tts_voice: SpeechVoice,
    pub tts_model: SpeechModel,
    // --- 上传与限制 ---
    pub upload_dir: String,
    pub max_upload_bytes: usize,
    pub max_transcription_bytes: usize,
    pub max_speech_chars: usize,
    // --- HTTP 服务 ---
    pub http_host: String,
    pub http_port: u16,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            openai_base_url: "https://api.openai.com/v1".to_string(),
            chat_model: "gpt-4o".to_string(),
            chat_temperature: 0.7,
            transcription_model: "whisper-1".to_string(),
            request_timeout_secs: None,
            question_count: 5,
            default_language: "zh".to_string(),
            tts_voice: SpeechVoice::default(),
            tts_model: SpeechModel::default(),
            upload_dir: "uploads".to_string(),
            max_upload_bytes: 16 * 1024 * 1024,
            max_transcription_bytes: 25 * 1024 * 1024,
            max_speech_chars: 4096,
            http_host: "0.0.0.0".to_string(),
            http_port: 5000,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量加载，未设置的项使用默认值
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载，再叠加环境变量
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        let file_config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
                path: path.display().to_string(),
                source,
            })?;
        file_config.with_env_overrides()
    }

    fn with_env_overrides(self) -> Result<Self, ConfigError> {
        Ok(Self {
            openai_api_key: env_string("OPENAI_API_KEY").unwrap_or(self.openai_api_key),
            openai_base_url: env_string("OPENAI_BASE_URL").unwrap_or(self.openai_base_url),
            chat_model: env_string("CHAT_MODEL").unwrap_or(self.chat_model),
            chat_temperature: env_parse("CHAT_TEMPERATURE", "f32")?.unwrap_or(self.chat_temperature),
            transcription_model: env_string("TRANSCRIPTION_MODEL")
                .unwrap_or(self.transcription_model),
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS", "u64")?
                .or(self.request_timeout_secs),
            question_count: env_parse("QUESTION_COUNT", "usize")?.unwrap_or(self.question_count),
            default_language: env_string("DEFAULT_LANGUAGE").unwrap_or(self.default_language),
            tts_voice: env_parse("TTS_VOICE", "voice")?.unwrap_or(self.tts_voice),
            tts_model: env_parse("TTS_MODEL", "speech model")?.unwrap_or(self.tts_model),
            upload_dir: env_string("UPLOAD_DIR").unwrap_or(self.upload_dir),
            max_upload_bytes: env_parse("MAX_UPLOAD_BYTES", "usize")?
                .unwrap_or(self.max_upload_bytes),
            max_transcription_bytes: env_parse("MAX_TRANSCRIPTION_BYTES", "usize")?
                .unwrap_or(self.max_transcription_bytes),
            max_speech_chars: env_parse("MAX_SPEECH_CHARS", "usize")?
                .unwrap_or(self.max_speech_chars),
            http_host: env_string("HTTP_HOST").unwrap_or(self.http_host),
            http_port: env_parse("PORT", "u16")?.unwrap_or(self.http_port),
            verbose_logging: env_parse("VERBOSE_LOGGING", "bool")?.unwrap_or(self.verbose_logging),
        })
    }

    /// 校验启动所需的配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.openai_api_key.trim().is_empty() {
            return Err(ConfigError::Missing("OPENAI_API_KEY"));
        }
        if self.question_count == 0 {
            return Err(ConfigError::Invalid {
                key: "question_count",
                reason: "必须为正整数".to_string(),
            });
        }
        Ok(())
    }

    /// HTTP 监听地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

fn env_string(var_name: &str) -> Option<String> {
    std::env::var(var_name).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(
    var_name: &str,
    expected_type: &str,
) -> Result<Option<T>, ConfigError> {
    match env_string(var_name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.question_count, 5);
        assert_eq!(config.default_language, "zh");
        assert_eq!(config.max_upload_bytes, 16 * 1024 * 1024);
        assert_eq!(config.tts_voice, SpeechVoice::Nova);
        assert_eq!(config.tts_model, SpeechModel::Tts1Hd);
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_validate_requires_api_key() {
        let config = Config::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing("OPENAI_API_KEY"))
        ));

        let config = Config {
            openai_api_key: "sk-test".to_string(),
            question_count: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            chat_model = "gpt-4o-mini"
            question_count = 3
            tts_voice = "alloy"
            "#,
        )
        .unwrap();
        assert_eq!(config.chat_model, "gpt-4o-mini");
        assert_eq!(config.question_count, 3);
        assert_eq!(config.tts_voice, SpeechVoice::Alloy);
        assert_eq!(config.transcription_model, "whisper-1");
    }
}
