use actix_web::web;
use tracing::{debug, info, warn};

use crate::config::StaticConfig;
use crate::errors::Result;
use crate::services::{GeoIpProvider, LookupService};

pub struct StartupContext {
    pub lookup: web::Data<LookupService>,
}

/// 准备服务器启动的上下文
///
/// 打开 GeoIP 数据库（整个进程只打开一次）并构造查询服务。
/// 数据库无法打开时返回 `DatabaseOpen` 错误。
pub fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let geoip = GeoIpProvider::open(&config.database)?;
    let lookup = LookupService::from_config(geoip, config);

    if config.auth_enabled() {
        info!(
            "Shared secret required in the {} header",
            config.server.auth_header
        );
    } else {
        warn!("No server.password configured, all requests are accepted");
    }

    info!(
        "DNS timeout {}ms, lookup timeout {}ms",
        config.dns.timeout_ms, config.database.lookup_timeout_ms
    );
    debug!("Pre-startup processing completed in {:?}", start_time.elapsed());

    Ok(StartupContext {
        lookup: web::Data::new(lookup),
    })
}
