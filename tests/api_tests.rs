//! HTTP API tests
//!
//! Exercises `/ping` and `/check/{address}` end to end through the actix
//! service, with an in-memory GeoIP fixture and a fixture DNS resolver.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use async_trait::async_trait;
use serde_json::Value;

use geolocator::api::configure_routes;
use geolocator::config::ServerConfig;
use geolocator::errors::{GeolocatorError, Result};
use geolocator::services::{
    AddressResolver, GeoIpLookup, GeoIpProvider, GeoRecord, LookupService,
};

// =============================================================================
// Fixtures
// =============================================================================

struct FixtureGeoIp {
    records: HashMap<IpAddr, GeoRecord>,
}

#[async_trait]
impl GeoIpLookup for FixtureGeoIp {
    async fn lookup(&self, ip: IpAddr) -> Result<GeoRecord> {
        self.records
            .get(&ip)
            .cloned()
            .ok_or_else(|| GeolocatorError::lookup(format!("{} not found", ip)))
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}

struct FixtureResolver {
    hosts: HashMap<String, Vec<IpAddr>>,
}

#[async_trait]
impl AddressResolver for FixtureResolver {
    async fn resolve(&self, host: &str) -> Result<Vec<IpAddr>> {
        self.hosts
            .get(host)
            .cloned()
            .ok_or_else(|| GeolocatorError::invalid_address(format!("{} NXDOMAIN", host)))
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}

const LONDON: &str = "81.2.69.160";
const TOKYO_V6: &str = "2001:218::1";
const PRIVATE: &str = "10.0.0.1";

fn london_record() -> GeoRecord {
    GeoRecord {
        continent: "Europe".to_string(),
        country_name: "United Kingdom".to_string(),
        country_code: "GB".to_string(),
        state_name: "England".to_string(),
        city_name: "London".to_string(),
        postal_code: String::new(),
        latitude: 51.5142,
        longitude: -0.0931,
        timezone: "Europe/London".to_string(),
    }
}

/// 没有行政区划的记录
fn tokyo_record() -> GeoRecord {
    GeoRecord {
        continent: "Asia".to_string(),
        country_name: "Japan".to_string(),
        country_code: "JP".to_string(),
        state_name: String::new(),
        city_name: "Tokyo".to_string(),
        postal_code: "100-0001".to_string(),
        latitude: 35.6895,
        longitude: 139.6917,
        timezone: "Asia/Tokyo".to_string(),
    }
}

fn lookup_service() -> web::Data<LookupService> {
    let geoip = FixtureGeoIp {
        records: HashMap::from([
            (LONDON.parse().unwrap(), london_record()),
            (TOKYO_V6.parse().unwrap(), tokyo_record()),
        ]),
    };
    let resolver = FixtureResolver {
        hosts: HashMap::from([
            ("london.example".to_string(), vec![LONDON.parse().unwrap()]),
            ("intranet.example".to_string(), vec![PRIVATE.parse().unwrap()]),
        ]),
    };

    web::Data::new(LookupService::new(
        GeoIpProvider::from_lookup(Arc::new(geoip)),
        Arc::new(resolver),
        Duration::from_secs(1),
        Duration::from_secs(1),
    ))
}

fn server_config(password: &str) -> ServerConfig {
    ServerConfig {
        password: password.to_string(),
        ..Default::default()
    }
}

fn content_type(resp: &actix_web::dev::ServiceResponse) -> String {
    resp.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

// =============================================================================
// /ping
// =============================================================================

#[tokio::test]
async fn test_ping_without_secret() {
    let server = server_config("");
    let app = test::init_service(
        App::new().configure(|cfg| configure_routes(cfg, lookup_service(), &server)),
    )
    .await;

    let req = TestRequest::get().uri("/ping").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(content_type(&resp).starts_with("text/plain"));
    let body = test::read_body(resp).await;
    assert_eq!(body.as_ref(), b"pong");
}

#[tokio::test]
async fn test_ping_rejects_missing_secret() {
    let server = server_config("s3cret");
    let app = test::init_service(
        App::new().configure(|cfg| configure_routes(cfg, lookup_service(), &server)),
    )
    .await;

    let req = TestRequest::get().uri("/ping").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(content_type(&resp).starts_with("text/plain"));
    let body = test::read_body(resp).await;
    assert_eq!(body.as_ref(), b"Invalid password");
}

#[tokio::test]
async fn test_ping_rejects_wrong_secret() {
    let server = server_config("s3cret");
    let app = test::init_service(
        App::new().configure(|cfg| configure_routes(cfg, lookup_service(), &server)),
    )
    .await;

    let req = TestRequest::get()
        .uri("/ping")
        .insert_header(("Authorization", "s3cret-but-longer"))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body.as_ref(), b"Invalid password");
}

#[tokio::test]
async fn test_ping_accepts_secret() {
    let server = server_config("s3cret");
    let app = test::init_service(
        App::new().configure(|cfg| configure_routes(cfg, lookup_service(), &server)),
    )
    .await;

    let req = TestRequest::get()
        .uri("/ping")
        .insert_header(("Authorization", "s3cret"))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body.as_ref(), b"pong");
}

// =============================================================================
// /check/{address}
// =============================================================================

#[tokio::test]
async fn test_check_ipv4_success() {
    let server = server_config("");
    let app = test::init_service(
        App::new().configure(|cfg| configure_routes(cfg, lookup_service(), &server)),
    )
    .await;

    let req = TestRequest::get().uri("/check/81.2.69.160").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(content_type(&resp), "application/json");

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert!(body["message"].as_str().unwrap().starts_with("OK [took "));
    assert_eq!(body["data"]["country_code"], "GB");
    assert_eq!(body["data"]["city_name"], "London");
    assert_eq!(body["data"]["state_name"], "England");
    assert_eq!(body["data"]["timezone"], "Europe/London");
}

#[tokio::test]
async fn test_check_ipv6_without_subdivision() {
    let server = server_config("");
    let app = test::init_service(
        App::new().configure(|cfg| configure_routes(cfg, lookup_service(), &server)),
    )
    .await;

    let req = TestRequest::get().uri("/check/2001:218::1").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["country_code"], "JP");
    assert_eq!(body["data"]["state_name"], "");
    assert_eq!(body["data"]["postal_code"], "100-0001");
}

#[tokio::test]
async fn test_check_hostname_is_transparent() {
    let server = server_config("");
    let app = test::init_service(
        App::new().configure(|cfg| configure_routes(cfg, lookup_service(), &server)),
    )
    .await;

    let req = TestRequest::get().uri("/check/london.example").to_request();
    let by_name: Value = test::call_and_read_body_json(&app, req).await;
    let req = TestRequest::get().uri("/check/81.2.69.160").to_request();
    let by_ip: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(by_name["status"], "success");
    assert_eq!(by_name["data"], by_ip["data"]);
}

#[tokio::test]
async fn test_check_not_in_database() {
    let server = server_config("");
    let app = test::init_service(
        App::new().configure(|cfg| configure_routes(cfg, lookup_service(), &server)),
    )
    .await;

    let req = TestRequest::get().uri("/check/10.0.0.1").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(content_type(&resp), "application/json");
    let body = test::read_body(resp).await;
    assert_eq!(
        body.as_ref(),
        br#"{"status":"error","message":"Cannot process request","data":null}"#
    );
}

#[tokio::test]
async fn test_check_hostname_resolving_outside_database() {
    let server = server_config("");
    let app = test::init_service(
        App::new().configure(|cfg| configure_routes(cfg, lookup_service(), &server)),
    )
    .await;

    let req = TestRequest::get().uri("/check/intranet.example").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Cannot process request");
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_check_invalid_address() {
    let server = server_config("");
    let app = test::init_service(
        App::new().configure(|cfg| configure_routes(cfg, lookup_service(), &server)),
    )
    .await;

    let req = TestRequest::get().uri("/check/not-an-ip").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(
        body.as_ref(),
        br#"{"status":"error","message":"Invalid ip address","data":null}"#
    );
}

#[tokio::test]
async fn test_check_rejects_missing_secret_before_resolution() {
    let server = server_config("s3cret");
    let app = test::init_service(
        App::new().configure(|cfg| configure_routes(cfg, lookup_service(), &server)),
    )
    .await;

    for uri in ["/check/81.2.69.160", "/check/not-an-ip"] {
        let req = TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(content_type(&resp), "application/json");
        let body = test::read_body(resp).await;
        assert_eq!(
            body.as_ref(),
            br#"{"status":"error","message":"Invalid password","data":null}"#
        );
    }
}

#[tokio::test]
async fn test_check_accepts_secret() {
    let server = server_config("s3cret");
    let app = test::init_service(
        App::new().configure(|cfg| configure_routes(cfg, lookup_service(), &server)),
    )
    .await;

    let req = TestRequest::get()
        .uri("/check/81.2.69.160")
        .insert_header(("Authorization", "s3cret"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "success");
}

#[tokio::test]
async fn test_check_custom_auth_header() {
    let server = ServerConfig {
        password: "s3cret".to_string(),
        auth_header: "X-Api-Key".to_string(),
        ..Default::default()
    };
    let app = test::init_service(
        App::new().configure(|cfg| configure_routes(cfg, lookup_service(), &server)),
    )
    .await;

    let req = TestRequest::get()
        .uri("/check/81.2.69.160")
        .insert_header(("Authorization", "s3cret"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Invalid password");

    let req = TestRequest::get()
        .uri("/check/81.2.69.160")
        .insert_header(("X-Api-Key", "s3cret"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "success");
}

#[tokio::test]
async fn test_check_repeated_calls_identical() {
    let server = server_config("");
    let app = test::init_service(
        App::new().configure(|cfg| configure_routes(cfg, lookup_service(), &server)),
    )
    .await;

    let req = TestRequest::get().uri("/check/81.2.69.160").to_request();
    let first: Value = test::call_and_read_body_json(&app, req).await;

    for _ in 0..5 {
        let req = TestRequest::get().uri("/check/81.2.69.160").to_request();
        let again: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(again["data"], first["data"]);
    }
}

#[tokio::test]
async fn test_check_requires_single_segment() {
    let server = server_config("");
    let app = test::init_service(
        App::new().configure(|cfg| configure_routes(cfg, lookup_service(), &server)),
    )
    .await;

    let req = TestRequest::get().uri("/check/81.2.69.160/extra").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
