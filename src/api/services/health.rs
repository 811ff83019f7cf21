use actix_web::http::header::CONTENT_TYPE;
use actix_web::{HttpResponse, Responder, web};
use tracing::trace;

use crate::api::middleware::SharedSecretAuth;
use crate::config::ServerConfig;

/// Health Service
///
/// 存活探针，只返回 `pong`，不访问数据库。
pub struct HealthService;

impl HealthService {
    pub async fn ping() -> impl Responder {
        trace!("Received ping request");

        HttpResponse::Ok()
            .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
            .body("pong")
    }
}

/// Health 路由配置
///
/// 鉴权失败时返回纯文本，不经过 JSON Content-Type 中间件。
pub fn health_routes(server: &ServerConfig) -> impl actix_web::dev::HttpServiceFactory + use<> {
    web::resource("/ping")
        .wrap(SharedSecretAuth::plain_text(server))
        .route(web::get().to(HealthService::ping))
}
