use tokio::signal;
use tracing::{info, warn};

/// 等待 Ctrl+C，用于优雅关闭
///
/// 没有后台任务需要刷新，收到信号后直接返回。
pub async fn listen_for_shutdown() {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, stopping server...");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }
}
