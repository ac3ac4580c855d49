use std::sync::Arc;

use crate::config::Config;
use crate::orchestrator::InterviewOrchestrator;
use crate::services::UploadStore;

/// 处理器共享的状态
///
/// 只持有无状态的编排器和上传目录，面试会话本身由客户端保存
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<InterviewOrchestrator>,
    pub uploads: UploadStore,
    /// 请求未指定语言时使用
    pub default_language: String,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(orchestrator: Arc<InterviewOrchestrator>, config: &Config) -> Self {
        Self {
            orchestrator,
            uploads: UploadStore::new(&config.upload_dir),
            default_language: config.default_language.clone(),
            max_upload_bytes: config.max_upload_bytes,
        }
    }
}
