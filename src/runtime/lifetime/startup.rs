use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::AppState;
use crate::config::StaticConfig;
use crate::storage::{Storage, StorageFactory};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub state: AppState,
}

/// 准备服务器启动的上下文
/// 包括存储后端和 HTTP 共享状态
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create(&config.storage)
        .await
        .context("Failed to initialize storage backend")?;

    if config.admin.is_enabled() {
        info!("Admin panel available at: {}", crate::api::constants::ADMIN_PREFIX);
    } else {
        warn!("Admin panel is disabled (admin.password is empty)");
    }

    let state = AppState::new(storage.clone(), config);

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext { storage, state })
}
