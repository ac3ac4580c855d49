//! 回答分析服务 - 业务能力层
//!
//! 一个回答 → 一次请求 → 一段分析。失败时返回固定的提示文本，
//! 让会话的其余部分可以继续。

use std::sync::Arc;
use tracing::{info, warn};

use crate::clients::CapabilityProvider;
use crate::models::{AnswerAnalysis, JobDescription, Question};

/// 分析时使用的系统角色
pub const EVALUATOR_ROLE: &str = "你是一位资深的面试评估官。";

/// 分析失败时返回的固定文本
pub const ANALYSIS_FAILURE_TEXT: &str = "无法分析回答。";

/// 回答分析服务
pub struct AnalysisService {
    provider: Arc<dyn CapabilityProvider>,
}

impl AnalysisService {
    pub fn new(provider: Arc<dyn CapabilityProvider>) -> Self {
        Self { provider }
    }

    /// 分析一道题的回答，从不返回错误
    pub async fn analyze(
        &self,
        question: &Question,
        transcript: &str,
        job_description: &JobDescription,
    ) -> AnswerAnalysis {
        let prompt = build_analysis_prompt(question, transcript, job_description);

        let text = match self.provider.generate_text(EVALUATOR_ROLE, &prompt).await {
            Ok(text) if !text.trim().is_empty() => {
                info!("✓ 问题 {} 的回答分析完成", question.number);
                text.trim().to_string()
            }
            Ok(_) => {
                warn!("⚠️ 问题 {} 的分析结果为空", question.number);
                ANALYSIS_FAILURE_TEXT.to_string()
            }
            Err(e) => {
                warn!(
                    "⚠️ 问题 {} 的回答分析失败 ({}): {}",
                    question.number,
                    self.provider.name(),
                    e
                );
                ANALYSIS_FAILURE_TEXT.to_string()
            }
        };

        AnswerAnalysis { text }
    }
}

fn build_analysis_prompt(
    question: &Question,
    transcript: &str,
    job_description: &JobDescription,
) -> String {
    format!(
        r#"你是一位资深的面试评估官。请根据以下信息分析应聘者的回答：

职位描述：
---
{}
---

面试问题：
{}

应聘者回答：
{}
---

请从以下几个方面进行评估：
1.  **相关性**：回答是否直接针对问题，并与职位要求相关？
2.  **清晰度**：回答是否条理清晰，易于理解？
3.  **深度和具体性**：回答是否展现了足够的思考深度和具体例子？
4.  **沟通能力**：从回答中体现出的沟通技巧如何？

请给出一个综合评价，并指出优点和可以改进的地方。"#,
        job_description, question.text, transcript
    )
}
