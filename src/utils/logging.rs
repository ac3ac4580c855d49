/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化日志
///
/// `RUST_LOG` 优先；否则按 `verbose_logging` 选择 debug 或 info
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mock_interview={0},tower_http={0}", default_level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 模拟面试服务");
    info!("🤖 对话模型: {}", config.chat_model);
    info!("🎙️ 识别模型: {}", config.transcription_model);
    info!(
        "🔊 语音合成: {} / {}",
        config.tts_model, config.tts_voice
    );
    info!("📋 每场面试问题数: {}", config.question_count);
    info!("📁 上传文件夹: {}", config.upload_dir);
    info!("🌐 监听地址: {}", config.bind_addr());
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("岗位描述很长", 2), "岗位...");
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("", 3), "");
    }
}
