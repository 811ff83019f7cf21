//! 统一响应格式
//!
//! 所有业务结果（包括错误）都以 HTTP 200 返回，成功与否只体现在 `status` 字段中。
//! `Content-Type` 由 [`JsonContentType`](super::middleware::JsonContentType) 中间件设置。

use actix_web::HttpResponse;
use actix_web::http::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// 响应信封：`{"status": ..., "message": ..., "data": ...}`
///
/// `data` 在错误时序列化为 `null`，不会省略。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: Status,
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> Envelope<T> {
    /// 序列化为 HTTP 200 响应
    ///
    /// 只有序列化本身失败时才返回 500。
    pub fn into_response(self) -> HttpResponse {
        match serde_json::to_string(&self) {
            Ok(body) => HttpResponse::Ok().body(body),
            Err(e) => {
                error!("Failed to serialize response envelope: {}", e);
                HttpResponse::InternalServerError()
                    .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
                    .body(e.to_string())
            }
        }
    }
}
