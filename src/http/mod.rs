//! HTTP 接口 - 传输层
//!
//! 只负责把请求翻译成编排器调用，再把结果翻译回 JSON：
//! - POST /start_interview - 根据岗位描述生成问题
//! - POST /submit_answer - 上传一段录音，返回识别文本与分析
//! - POST /synthesize_speech - 朗读文本，返回 audio/mpeg
//! - POST /overall_analysis - 对整场面试做总体评估
//! - GET /health - 健康检查

mod handlers;
mod routes;
mod state;

pub use handlers::ErrorResponse;
pub use routes::create_router;
pub use state::AppState;
