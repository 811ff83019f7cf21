use tokio::signal;
use tracing::{info, warn};

/// 等待 Ctrl+C 信号
///
/// 无法注册信号处理时永不返回，服务器只能被外部终止。
pub async fn listen_for_shutdown() {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, stopping server...");
        }
        Err(e) => {
            warn!("Failed to listen for Ctrl+C: {}. Graceful shutdown disabled.", e);
            std::future::pending::<()>().await;
        }
    }
}
