//! 面试会话记录
//!
//! ```text
//! Created → QuestionsReady → (AnswerPending → AnswerScored)* → Finalized
//! ```
//!
//! 编排器本身不保存会话，记录由调用方持有并在总结时整体移交。

use crate::error::SessionError;
use crate::models::interview::{InterviewTriple, JobDescription, Question};
use std::fmt;

/// 会话阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Created,
    QuestionsReady,
    AnswerPending,
    AnswerScored,
    Finalized,
}

impl SessionPhase {
    pub fn name(self) -> &'static str {
        match self {
            SessionPhase::Created => "Created",
            SessionPhase::QuestionsReady => "QuestionsReady",
            SessionPhase::AnswerPending => "AnswerPending",
            SessionPhase::AnswerScored => "AnswerScored",
            SessionPhase::Finalized => "Finalized",
        }
    }

    fn can_move_to(self, next: SessionPhase) -> bool {
        use SessionPhase::*;
        matches!(
            (self, next),
            (Created, QuestionsReady)
                | (QuestionsReady, AnswerPending)
                | (AnswerScored, AnswerPending)
                | (AnswerPending, AnswerScored)
                | (AnswerScored, Finalized)
        )
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 一场面试的全部记录
#[derive(Debug, Clone)]
pub struct SessionRecord {
    job_description: JobDescription,
    questions: Vec<Question>,
    triples: Vec<InterviewTriple>,
    phase: SessionPhase,
}

impl SessionRecord {
    pub fn new(job_description: JobDescription) -> Self {
        Self {
            job_description,
            questions: Vec::new(),
            triples: Vec::new(),
            phase: SessionPhase::Created,
        }
    }

    /// 用客户端回放的记录重建会话
    pub fn replay(job_description: JobDescription, triples: Vec<InterviewTriple>) -> Self {
        let phase = if triples.is_empty() {
            SessionPhase::Created
        } else {
            SessionPhase::AnswerScored
        };
        Self {
            job_description,
            questions: Vec::new(),
            triples,
            phase,
        }
    }

    pub fn job_description(&self) -> &JobDescription {
        &self.job_description
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn triples(&self) -> &[InterviewTriple] {
        &self.triples
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    fn transition(&mut self, next: SessionPhase) -> Result<(), SessionError> {
        if !self.phase.can_move_to(next) {
            return Err(SessionError::InvalidTransition {
                from: self.phase.name(),
                to: next.name(),
            });
        }
        self.phase = next;
        Ok(())
    }

    /// 问题只生成一次
    pub fn set_questions(&mut self, questions: Vec<Question>) -> Result<(), SessionError> {
        if questions.is_empty() {
            return Err(SessionError::QuestionGenerationFailed);
        }
        self.transition(SessionPhase::QuestionsReady)?;
        self.questions = questions;
        Ok(())
    }

    /// 开始等待下一道题的回答
    pub fn begin_answer(&mut self) -> Result<(), SessionError> {
        self.transition(SessionPhase::AnswerPending)
    }

    /// 记录一道题的结果
    pub fn record_answer(&mut self, triple: InterviewTriple) -> Result<(), SessionError> {
        self.transition(SessionPhase::AnswerScored)?;
        self.triples.push(triple);
        Ok(())
    }

    /// 进入总结阶段，交出记录的内容
    pub(crate) fn into_parts(
        mut self,
    ) -> Result<(JobDescription, Vec<InterviewTriple>), SessionError> {
        self.transition(SessionPhase::Finalized)?;
        Ok((self.job_description, self.triples))
    }
}
