//! 问题生成服务 - 业务能力层
//!
//! 只负责"根据岗位描述出题"能力，不关心会话流程

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::clients::CapabilityProvider;
use crate::models::{JobDescription, Question};

/// 出题时使用的系统角色
pub const INTERVIEWER_ROLE: &str = "你是一个专业的面试官。";

/// 问题生成服务
///
/// 职责：
/// - 每场面试调用一次问题生成能力
/// - 按行解析返回文本
/// - 能力调用失败时返回空列表，由调用方决定如何向用户呈现
pub struct QuestionService {
    provider: Arc<dyn CapabilityProvider>,
}

impl QuestionService {
    pub fn new(provider: Arc<dyn CapabilityProvider>) -> Self {
        Self { provider }
    }

    /// 生成面试问题
    ///
    /// # 返回
    /// 有序问题列表；空列表表示"无法生成面试问题"
    pub async fn generate_questions(
        &self,
        job_description: &JobDescription,
        count: usize,
    ) -> Vec<Question> {
        if count == 0 {
            warn!("问题数量为 0，跳过生成");
            return Vec::new();
        }

        let prompt = build_question_prompt(job_description, count);
        debug!("出题提示词长度: {} 字符", prompt.chars().count());

        match self.provider.generate_text(INTERVIEWER_ROLE, &prompt).await {
            Ok(raw) => {
                let questions = parse_questions(&raw);
                info!("✓ 生成 {} 个面试问题 (期望 {} 个)", questions.len(), count);
                questions
            }
            Err(e) => {
                error!("❌ 生成面试问题失败 ({}): {}", self.provider.name(), e);
                Vec::new()
            }
        }
    }
}

fn build_question_prompt(job_description: &JobDescription, count: usize) -> String {
    format!(
        r#"你是一个专业的面试官。请根据以下职位描述，生成 {} 个相关的面试问题。
问题应该覆盖技术能力、行为问题和情景问题。

职位描述：
---
{}
---

请直接列出问题，每行一个问题。"#,
        count, job_description
    )
}

/// 解析模型返回的问题文本
///
/// 按换行拆分并丢弃空行；若一行都没有，则把整段文本当作一个问题。
/// 整段为空白时返回空列表。
pub fn parse_questions(raw: &str) -> Vec<Question> {
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if !lines.is_empty() {
        return lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| Question::new(i + 1, line))
            .collect();
    }

    let whole = raw.trim();
    if whole.is_empty() {
        warn!("模型返回的问题文本为空");
        return Vec::new();
    }
    vec![Question::new(1, whole)]
}
