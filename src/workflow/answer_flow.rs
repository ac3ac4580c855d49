//! 回答处理流程 - 流程层
//!
//! 核心职责：定义"一个回答"的完整处理流程
//!
//! 流程顺序：
//! 1. 语音识别（失败则短路，不做分析）
//! 2. 回答分析（失败时降级为固定文本）
//! 3. 计算语速（提供了回答时长时）

use std::sync::Arc;
use tracing::{info, warn};

use crate::clients::CapabilityProvider;
use crate::error::TranscriptionFailure;
use crate::models::{
    AnswerAnalysis, AnswerSubmission, InterviewTriple, JobDescription, Question,
    TranscriptionResult,
};
use crate::services::{AnalysisService, TranscriptionService};
use crate::utils::calculate_speaking_rate;

/// 一个回答的处理结果
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOutcome {
    pub question: Question,
    pub transcript: TranscriptionResult,
    pub analysis: AnswerAnalysis,
    /// 语速（字/分钟），未提供时长时为空
    pub speaking_rate: Option<f64>,
}

impl AnswerOutcome {
    /// 转为会话记录中的一条
    pub fn to_triple(&self) -> InterviewTriple {
        InterviewTriple::new(&self.question, &self.transcript, &self.analysis)
            .with_speaking_rate(self.speaking_rate)
    }
}

/// 已识别、尚未分析的回答
#[derive(Debug, Clone, PartialEq)]
pub struct TranscribedAnswer {
    pub question: Question,
    pub transcript: TranscriptionResult,
    pub duration_seconds: Option<f64>,
}

/// 回答处理流程
///
/// - 编排识别 → 分析的顺序
/// - 不持有任何会话状态
/// - 只依赖业务能力（services）
pub struct AnswerFlow {
    transcription: TranscriptionService,
    analysis: AnalysisService,
}

impl AnswerFlow {
    pub fn new(provider: Arc<dyn CapabilityProvider>, max_transcription_bytes: usize) -> Self {
        Self {
            transcription: TranscriptionService::new(provider.clone(), max_transcription_bytes),
            analysis: AnalysisService::new(provider),
        }
    }

    /// 完整处理一个回答：识别，然后分析
    pub async fn run(
        &self,
        submission: AnswerSubmission,
        job_description: &JobDescription,
    ) -> Result<AnswerOutcome, TranscriptionFailure> {
        let transcribed = self.transcribe(submission).await?;
        Ok(self.analyze(transcribed, job_description).await)
    }

    /// 步骤 1: 语音识别
    ///
    /// 音频在此移交并释放；失败时直接返回，调用方不应再请求分析
    pub async fn transcribe(
        &self,
        submission: AnswerSubmission,
    ) -> Result<TranscribedAnswer, TranscriptionFailure> {
        let AnswerSubmission {
            question,
            audio,
            language,
            submitted_at,
            duration_seconds,
        } = submission;

        info!("[问题 {}] 📝 开始处理回答", question.number);

        let text = match self.transcription.transcribe(audio, language.as_deref()).await {
            Ok(text) => text,
            Err(failure) => {
                warn!("[问题 {}] ⚠️ 语音识别失败，跳过分析: {}", question.number, failure);
                return Err(failure);
            }
        };

        Ok(TranscribedAnswer {
            transcript: TranscriptionResult {
                text,
                question_number: question.number,
                submitted_at,
            },
            question,
            duration_seconds,
        })
    }

    /// 步骤 2 和 3: 回答分析与语速
    pub async fn analyze(
        &self,
        transcribed: TranscribedAnswer,
        job_description: &JobDescription,
    ) -> AnswerOutcome {
        let TranscribedAnswer {
            question,
            transcript,
            duration_seconds,
        } = transcribed;

        let analysis = self
            .analysis
            .analyze(&question, &transcript.text, job_description)
            .await;

        let speaking_rate =
            duration_seconds.map(|secs| calculate_speaking_rate(&transcript.text, secs));

        info!("[问题 {}] ✓ 回答处理完成", question.number);

        AnswerOutcome {
            question,
            transcript,
            analysis,
            speaking_rate,
        }
    }
}
