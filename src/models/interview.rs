//! 面试数据模型
//!
//! 每个阶段都产生新的不可变实体，上一阶段的原始输入（尤其是音频字节）
//! 在被消费后即释放。

use crate::error::InputError;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// 岗位描述
///
/// 原文保存，作为每次能力调用的提示上下文
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct JobDescription(String);

impl JobDescription {
    pub fn new(text: impl Into<String>) -> Result<Self, InputError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(InputError::EmptyJobDescription);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 面试问题（序号从 1 开始）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub number: usize,
    pub text: String,
}

impl Question {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number, self.text)
    }
}

/// 支持识别的音频格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Mp4,
    Mpeg,
    Mpga,
    M4a,
    Wav,
    Webm,
}

impl AudioFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "mp3" => Some(AudioFormat::Mp3),
            "mp4" => Some(AudioFormat::Mp4),
            "mpeg" => Some(AudioFormat::Mpeg),
            "mpga" => Some(AudioFormat::Mpga),
            "m4a" => Some(AudioFormat::M4a),
            "wav" => Some(AudioFormat::Wav),
            "webm" => Some(AudioFormat::Webm),
            _ => None,
        }
    }
}

/// 上传的原始音频
///
/// 只在识别完成之前存在，调用识别时按值移交
pub struct AudioPayload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl AudioPayload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// 根据文件扩展名判断格式
    pub fn format(&self) -> Option<AudioFormat> {
        Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(AudioFormat::from_extension)
    }
}

// 不打印音频内容
impl fmt::Debug for AudioPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioPayload")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// 一次回答提交
#[derive(Debug)]
pub struct AnswerSubmission {
    pub question: Question,
    pub audio: AudioPayload,
    /// 语言代码，例如 "zh"、"en"，为空时自动检测
    pub language: Option<String>,
    pub submitted_at: DateTime<Local>,
    /// 回答时长（秒），用于计算语速
    pub duration_seconds: Option<f64>,
}

impl AnswerSubmission {
    pub fn new(question: Question, audio: AudioPayload, language: Option<String>) -> Self {
        Self {
            question,
            audio,
            language: language.filter(|l| !l.trim().is_empty()),
            submitted_at: Local::now(),
            duration_seconds: None,
        }
    }

    pub fn with_duration(mut self, duration_seconds: Option<f64>) -> Self {
        self.duration_seconds = duration_seconds;
        self
    }
}

/// 识别结果
///
/// 空文本是合法的成功结果（例如静音），与失败不同
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptionResult {
    pub text: String,
    /// 来源问题的序号（仅引用）
    pub question_number: usize,
    pub submitted_at: DateTime<Local>,
}

/// 单个回答的分析
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerAnalysis {
    pub text: String,
}

/// 一道题的完整记录：问题、回答文本、初步分析
///
/// 字段名与前端回放的 `interview_data` 保持一致
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewTriple {
    pub question: String,
    pub answer_text: String,
    pub analysis: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaking_rate: Option<f64>,
}

impl InterviewTriple {
    pub fn new(
        question: &Question,
        transcript: &TranscriptionResult,
        analysis: &AnswerAnalysis,
    ) -> Self {
        Self {
            question: question.text.clone(),
            answer_text: transcript.text.clone(),
            analysis: analysis.text.clone(),
            speaking_rate: None,
        }
    }

    pub fn with_speaking_rate(mut self, speaking_rate: Option<f64>) -> Self {
        self.speaking_rate = speaking_rate;
        self
    }
}

/// 总体评估
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OverallSummary {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_description_rejects_blank() {
        assert!(matches!(
            JobDescription::new("   \n"),
            Err(InputError::EmptyJobDescription)
        ));
        let jd = JobDescription::new("  Backend engineer  ").unwrap();
        assert_eq!(jd.as_str(), "  Backend engineer  ");
    }

    #[test]
    fn test_audio_format_from_file_name() {
        assert_eq!(
            AudioPayload::new("answer.WEBM", vec![1]).format(),
            Some(AudioFormat::Webm)
        );
        assert_eq!(AudioPayload::new("answer.txt", vec![1]).format(), None);
        assert_eq!(AudioPayload::new("answer", vec![1]).format(), None);
    }

    #[test]
    fn test_submission_drops_blank_language() {
        let submission = AnswerSubmission::new(
            Question::new(1, "介绍一下你自己"),
            AudioPayload::new("a.webm", vec![0; 4]),
            Some("  ".to_string()),
        );
        assert_eq!(submission.language, None);
    }

    #[test]
    fn test_triple_deserializes_without_speaking_rate() {
        let triple: InterviewTriple = serde_json::from_str(
            r#"{"question": "Q", "answer_text": "", "analysis": "A"}"#,
        )
        .unwrap();
        assert_eq!(triple.answer_text, "");
        assert_eq!(triple.speaking_rate, None);
    }
}
