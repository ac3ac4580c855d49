//! 面试会话编排器 - 编排层
//!
//! ## 职责
//!
//! 把出题、识别、分析、总结串成一场面试：
//!
//! ```text
//! start_session      → QuestionService（问题为空则整场失败）
//! submit_answer      → AnswerFlow（识别失败则不分析）
//! transcribe_answer / analyze_answer → 同上，拆成两步
//! finalize_session   → AssessmentService（记录为空则失败）
//! synthesize         → SpeechService（与会话无关）
//! ```
//!
//! 编排器在两次调用之间不保存任何状态：调用方持有岗位描述和已完成的记录，
//! 每次调用时显式传入，因此多个会话可以并发进行而无需协调。

use std::sync::Arc;
use tracing::{error, info};

use crate::clients::CapabilityProvider;
use crate::config::Config;
use crate::error::{AppError, AppResult, SessionError};
use crate::models::{
    AnswerSubmission, InterviewTriple, JobDescription, OverallSummary, Question, SessionRecord,
    SpeechOptions,
};
use crate::services::{AssessmentService, QuestionService, SpeechService};
use crate::utils::truncate_text;
use crate::workflow::{AnswerFlow, AnswerOutcome, TranscribedAnswer};

/// 面试会话编排器
pub struct InterviewOrchestrator {
    questions: QuestionService,
    answer_flow: AnswerFlow,
    assessment: AssessmentService,
    speech: SpeechService,
    question_count: usize,
    speech_defaults: SpeechOptions,
}

impl InterviewOrchestrator {
    /// 用注入的能力提供方创建编排器
    pub fn new(provider: Arc<dyn CapabilityProvider>, config: &Config) -> Self {
        Self {
            questions: QuestionService::new(provider.clone()),
            answer_flow: AnswerFlow::new(provider.clone(), config.max_transcription_bytes),
            assessment: AssessmentService::new(provider.clone()),
            speech: SpeechService::new(provider, config.max_speech_chars),
            question_count: config.question_count,
            speech_defaults: SpeechOptions {
                voice: config.tts_voice,
                model: config.tts_model,
            },
        }
    }

    pub fn speech_defaults(&self) -> SpeechOptions {
        self.speech_defaults
    }

    /// 开始面试：生成问题
    pub async fn start_session(&self, job_description: &JobDescription) -> AppResult<Vec<Question>> {
        info!(
            "🎬 开始面试流程，岗位描述: {}",
            truncate_text(job_description.as_str(), 100)
        );

        let questions = self
            .questions
            .generate_questions(job_description, self.question_count)
            .await;

        if questions.is_empty() {
            error!("❌ 未能生成面试问题");
            return Err(SessionError::QuestionGenerationFailed.into());
        }

        info!("✓ 成功生成 {} 个问题", questions.len());
        Ok(questions)
    }

    /// 开始面试并返回会话记录
    pub async fn open_session(&self, job_description: JobDescription) -> AppResult<SessionRecord> {
        let questions = self.start_session(&job_description).await?;
        let mut record = SessionRecord::new(job_description);
        record.set_questions(questions)?;
        Ok(record)
    }

    /// 提交一个回答：识别，然后分析
    ///
    /// 识别失败时直接返回该失败，不会请求分析
    pub async fn submit_answer(
        &self,
        submission: AnswerSubmission,
        job_description: &JobDescription,
    ) -> AppResult<AnswerOutcome> {
        self.answer_flow
            .run(submission, job_description)
            .await
            .map_err(AppError::from)
    }

    /// 只识别一个回答
    ///
    /// 与 `analyze_answer` 配合使用，调用方可以在两步之间释放音频来源
    pub async fn transcribe_answer(
        &self,
        submission: AnswerSubmission,
    ) -> AppResult<TranscribedAnswer> {
        self.answer_flow
            .transcribe(submission)
            .await
            .map_err(AppError::from)
    }

    /// 分析一个已识别的回答，不会失败
    pub async fn analyze_answer(
        &self,
        transcribed: TranscribedAnswer,
        job_description: &JobDescription,
    ) -> AnswerOutcome {
        self.answer_flow.analyze(transcribed, job_description).await
    }

    /// 总体评估
    ///
    /// 记录按提交顺序拼接；记录为空时失败
    pub async fn finalize_session(
        &self,
        job_description: &JobDescription,
        triples: &[InterviewTriple],
    ) -> AppResult<OverallSummary> {
        if triples.is_empty() {
            return Err(AppError::missing("interview_data"));
        }

        info!("📊 开始总体分析，共 {} 道题", triples.len());

        self.assessment
            .assess(job_description, triples)
            .await
            .map_err(|e| {
                error!("❌ 生成总体分析失败: {}", e);
                AppError::from(SessionError::AssessmentFailed(e))
            })
    }

    /// 消费整场会话记录生成总体评估，之后记录不可再修改
    pub async fn finalize_record(&self, record: SessionRecord) -> AppResult<OverallSummary> {
        if record.triples().is_empty() {
            return Err(AppError::missing("interview_data"));
        }
        let (job_description, triples) = record.into_parts()?;
        self.finalize_session(&job_description, &triples).await
    }

    /// 朗读文本
    pub async fn synthesize(&self, text: &str, options: SpeechOptions) -> AppResult<Vec<u8>> {
        if text.trim().is_empty() {
            return Err(AppError::missing("text"));
        }
        self.speech
            .synthesize(text, options)
            .await
            .map_err(AppError::from)
    }
}
