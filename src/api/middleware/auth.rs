//! 共享密钥校验中间件
//!
//! 配置了 `server.password` 时，请求必须在 `server.auth_header` 指定的请求头中
//! 携带完全相同的值。失败时仍返回 HTTP 200，响应体按路由不同分为 JSON 信封或纯文本。

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::{trace, warn};

use crate::api::envelope::Envelope;
use crate::config::ServerConfig;
use crate::errors::GeolocatorError;

/// 校验失败时的响应格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// `{"status":"error","message":"Invalid password","data":null}`
    Envelope,
    /// `Invalid password`
    PlainText,
}

/// 共享密钥中间件
#[derive(Clone)]
pub struct SharedSecretAuth {
    secret: Arc<str>,
    header: Arc<str>,
    rejection: Rejection,
}

impl SharedSecretAuth {
    pub fn new(server: &ServerConfig, rejection: Rejection) -> Self {
        Self {
            secret: Arc::from(server.password.as_str()),
            header: Arc::from(server.auth_header.as_str()),
            rejection,
        }
    }

    /// 失败时返回 JSON 信封
    pub fn envelope(server: &ServerConfig) -> Self {
        Self::new(server, Rejection::Envelope)
    }

    /// 失败时返回纯文本
    pub fn plain_text(server: &ServerConfig) -> Self {
        Self::new(server, Rejection::PlainText)
    }
}

impl<S, B> Transform<S, ServiceRequest> for SharedSecretAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SharedSecretAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SharedSecretAuthMiddleware {
            service: Rc::new(service),
            secret: self.secret.clone(),
            header: self.header.clone(),
            rejection: self.rejection,
        }))
    }
}

pub struct SharedSecretAuthMiddleware<S> {
    service: Rc<S>,
    secret: Arc<str>,
    header: Arc<str>,
    rejection: Rejection,
}

impl<S> SharedSecretAuthMiddleware<S> {
    /// 常量时间比较请求头与共享密钥
    fn is_authorized(req: &ServiceRequest, header: &str, secret: &str) -> bool {
        match req.headers().get(header) {
            Some(value) => value.as_bytes().ct_eq(secret.as_bytes()).into(),
            None => false,
        }
    }

    fn rejection_response(rejection: Rejection, err: &GeolocatorError) -> HttpResponse {
        let message = err.client_message();
        match rejection {
            Rejection::Envelope => Envelope::<()>::error(message).into_response(),
            Rejection::PlainText => HttpResponse::Ok()
                .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
                .body(message),
        }
    }
}

impl<S, B> Service<ServiceRequest> for SharedSecretAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let secret = self.secret.clone();
        let header = self.header.clone();
        let rejection = self.rejection;

        Box::pin(async move {
            // 未配置密钥时不校验
            if secret.is_empty() {
                let response = srv.call(req).await?.map_into_left_body();
                return Ok(response);
            }

            if !Self::is_authorized(&req, &header, &secret) {
                let err = GeolocatorError::unauthorized(format!(
                    "missing or invalid {} header",
                    header
                ));
                warn!(
                    "Rejected request to {} from {:?}: {}",
                    req.path(),
                    req.peer_addr(),
                    err
                );
                return Ok(req.into_response(
                    Self::rejection_response(rejection, &err).map_into_right_body(),
                ));
            }

            trace!("Shared secret accepted for {}", req.path());
            let response = srv.call(req).await?.map_into_left_body();
            Ok(response)
        })
    }
}
