//! 总体评估服务 - 业务能力层
//!
//! 把整场面试的记录拼成一个提示词，交给评估能力给出综合评价。

use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{debug, info};

use crate::clients::CapabilityProvider;
use crate::error::CapabilityError;
use crate::models::{InterviewTriple, JobDescription, OverallSummary};

/// 总体评估时使用的系统角色
pub const HIRING_MANAGER_ROLE: &str = "你是一位资深的招聘经理。";

/// 总体评估服务
pub struct AssessmentService {
    provider: Arc<dyn CapabilityProvider>,
}

impl AssessmentService {
    pub fn new(provider: Arc<dyn CapabilityProvider>) -> Self {
        Self { provider }
    }

    /// 生成总体评估，原样返回评估文本
    pub async fn assess(
        &self,
        job_description: &JobDescription,
        triples: &[InterviewTriple],
    ) -> Result<OverallSummary, CapabilityError> {
        let prompt = build_summary_prompt(job_description, triples);
        debug!(
            "总体评估提示词长度: {} 字符，共 {} 道题",
            prompt.chars().count(),
            triples.len()
        );

        let text = self
            .provider
            .generate_text(HIRING_MANAGER_ROLE, &prompt)
            .await?;

        info!("✓ 总体分析生成成功");
        Ok(OverallSummary {
            text: text.trim().to_string(),
        })
    }
}

/// 按提交顺序拼接每道题的问题、回答与初步分析
pub fn build_summary_prompt(job_description: &JobDescription, triples: &[InterviewTriple]) -> String {
    let mut prompt = format!(
        r#"你是一位资深的招聘经理。请根据以下职位描述和候选人在模拟面试中各问题的回答及初步分析，
给出一个关于候选人整体表现的综合评估。

职位描述：
---
{}
---

面试表现详情：
"#,
        job_description
    );

    for triple in triples {
        // String 的 fmt::Write 不会失败
        let _ = write!(
            prompt,
            "\n问题: {}\n回答: {}\n初步分析: {}\n",
            triple.question, triple.answer_text, triple.analysis
        );
        if let Some(rate) = triple.speaking_rate {
            let _ = writeln!(prompt, "语速: {:.2} 字/分钟", rate);
        }
        prompt.push_str("---\n");
    }

    prompt.push_str(
        "\n请综合评估候选人的强项、潜在的不足之处，以及与该职位的匹配度。\n\
         请注意评估回答速度是否合适 (如果提供了相关信息)，以及整体沟通表达能力。\n",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(q: &str, a: &str, r: &str, rate: Option<f64>) -> InterviewTriple {
        InterviewTriple {
            question: q.to_string(),
            answer_text: a.to_string(),
            analysis: r.to_string(),
            speaking_rate: rate,
        }
    }

    #[test]
    fn test_prompt_keeps_submission_order() {
        let jd = JobDescription::new("数据工程师").unwrap();
        let prompt = build_summary_prompt(
            &jd,
            &[
                triple("问题甲", "回答甲", "分析甲", None),
                triple("问题乙", "回答乙", "分析乙", Some(180.5)),
            ],
        );

        let positions: Vec<usize> = ["问题甲", "回答甲", "分析甲", "问题乙", "回答乙", "分析乙"]
            .iter()
            .map(|needle| prompt.find(needle).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(prompt.contains("数据工程师"));
        assert!(prompt.contains("语速: 180.50 字/分钟"));
        assert_eq!(prompt.matches("语速:").count(), 1);
        assert!(prompt.contains("匹配度"));
    }
}
