use actix_web::web;

use super::services::{check_routes, health_routes};
use crate::config::ServerConfig;
use crate::services::LookupService;

/// 注册全部路由与共享状态
///
/// `lookup` 在启动时构造一次；`web::Data` 内部是 Arc，所有 worker 共享同一个数据库句柄。
pub fn configure_routes(
    cfg: &mut web::ServiceConfig,
    lookup: web::Data<LookupService>,
    server: &ServerConfig,
) {
    cfg.app_data(lookup)
        .service(health_routes(server))
        .service(check_routes(server));
}
