use super::handlers;
use super::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// 创建路由
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        .route("/health", get(handlers::health_check))
        // 面试流程
        .route("/start_interview", post(handlers::start_interview))
        .route("/submit_answer", post(handlers::submit_answer))
        .route("/overall_analysis", post(handlers::overall_analysis))
        // 语音合成
        .route("/synthesize_speech", post(handlers::synthesize_speech))
        // 超限的上传在处理器内以 413 返回
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
