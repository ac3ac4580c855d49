use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;

use crate::clients::{CapabilityProvider, OpenAiProvider};
use crate::config::Config;
use crate::http::{create_router, AppState};
use crate::orchestrator::InterviewOrchestrator;
use crate::utils::logging::log_startup;

/// 应用主结构
pub struct App {
    config: Config,
    state: AppState,
}

impl App {
    /// 初始化应用
    ///
    /// 能力提供方在这里构建一次，之后注入到所有服务中
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate()?;

        let provider: Arc<dyn CapabilityProvider> = Arc::new(OpenAiProvider::new(&config)?);
        Self::with_provider(config, provider).await
    }

    /// 使用指定的能力提供方初始化
    pub async fn with_provider(
        config: Config,
        provider: Arc<dyn CapabilityProvider>,
    ) -> Result<Self> {
        info!("🔌 能力提供方: {}", provider.name());

        let orchestrator = Arc::new(InterviewOrchestrator::new(provider, &config));
        let state = AppState::new(orchestrator, &config);
        state.uploads.ensure_dir().await?;

        log_startup(&config);

        Ok(Self { config, state })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// 启动 HTTP 服务，直到进程退出
    pub async fn run(self) -> Result<()> {
        let addr = self.config.bind_addr();
        let listener = TcpListener::bind(&addr).await?;
        info!("✓ HTTP 服务已启动: http://{}", addr);

        axum::serve(listener, create_router(self.state)).await?;
        Ok(())
    }
}
