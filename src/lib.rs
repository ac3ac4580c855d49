//! # Mock Interview
//!
//! 模拟面试服务：根据岗位描述出题，识别候选人的录音回答并逐题分析，
//! 可朗读问题，最后给出整场面试的总体评估。
//!
//! ## 架构设计
//!
//! 本系统采用严格的分层架构：
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 外部能力的唯一入口
//! - `CapabilityProvider` - 文本生成 / 语音识别 / 语音合成三种能力
//! - `OpenAiProvider` - 基于 OpenAI 的实现；`MockProvider` 用于测试
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，每个服务只做一件事
//! - `QuestionService` / `TranscriptionService` / `AnalysisService`
//! - `SpeechService` / `AssessmentService` / `UploadStore`
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个回答"的完整处理流程
//! - `AnswerFlow` - 识别 → 分析 → 语速
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - 一场面试：出题、逐题提交、总体评估
//!
//! ### ⑤ 传输层（HTTP）
//! - `http/` - JSON / multipart 接口，错误统一为 `{"error": ...}`

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::{CapabilityProvider, MockProvider, OpenAiProvider};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use http::{create_router, AppState};
pub use models::{InterviewTriple, JobDescription, Question, SessionRecord};
pub use orchestrator::InterviewOrchestrator;
pub use workflow::{AnswerFlow, AnswerOutcome};
