use std::path::PathBuf;

use anyhow::Result;
use mock_interview::utils::logging;
use mock_interview::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // .env 不存在时忽略
    let _ = dotenvy::dotenv();

    // 加载配置
    let config = match std::env::var("CONFIG_FILE") {
        Ok(path) if !path.trim().is_empty() => Config::load(&PathBuf::from(path))?,
        _ => Config::from_env()?,
    };

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
