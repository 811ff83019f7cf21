use actix_web::{HttpResponse, web};
use tracing::{debug, trace};

use crate::api::envelope::Envelope;
use crate::api::middleware::{JsonContentType, SharedSecretAuth};
use crate::config::ServerConfig;
use crate::services::{GeoRecord, LookupService};

/// Check Service
///
/// `GET /check/{address}`：地址可以是 IPv4/IPv6 字面量或主机名。
pub struct CheckService;

impl CheckService {
    pub async fn check(path: web::Path<String>, lookup: web::Data<LookupService>) -> HttpResponse {
        let address = path.into_inner();
        trace!("Received check request for {}", address);

        match lookup.check(&address).await {
            Ok(outcome) => {
                debug!(
                    "Check {} ({}) -> {} in {:?}",
                    address, outcome.address, outcome.record.country_code, outcome.elapsed
                );
                Envelope::success(format!("OK [took {:?}]", outcome.elapsed), outcome.record)
                    .into_response()
            }
            // 底层原因已在 LookupService 中记录，这里只返回固定消息
            Err(e) => Envelope::<GeoRecord>::error(e.client_message()).into_response(),
        }
    }
}

/// Check 路由配置
///
/// JsonContentType 在最外层，鉴权失败的响应也带 JSON Content-Type。
pub fn check_routes(server: &ServerConfig) -> impl actix_web::dev::HttpServiceFactory + use<> {
    web::scope("/check")
        .wrap(SharedSecretAuth::envelope(server))
        .wrap(JsonContentType)
        .route("/{address}", web::get().to(CheckService::check))
}
