//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! http (传输层：表单、上传、JSON)
//!     ↓
//! orchestrator::InterviewOrchestrator (一场面试)
//!     ↓
//! workflow::AnswerFlow (一个回答)
//!     ↓
//! services (能力层：出题 / 识别 / 分析 / 合成 / 评估)
//!     ↓
//! clients (基础设施：CapabilityProvider)
//! ```
//!
//! ## 设计原则
//!
//! 1. **无状态**：会话数据由调用方持有并显式传入
//! 2. **依赖注入**：能力提供方在启动时构建一次并注入
//! 3. **向下依赖**：编排层 → workflow → services → clients

pub mod interview_orchestrator;

pub use interview_orchestrator::InterviewOrchestrator;
