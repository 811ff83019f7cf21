//! GeoIP Provider 抽象层
//!
//! 统一的 GeoIP 查询接口。启动时打开一次数据库，之后所有请求共享同一个只读句柄。

use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::maxmind::MaxMindProvider;
use crate::config::DatabaseConfig;
use crate::errors::Result;

/// 地理位置信息
///
/// 所有名称字段只取英文版本；数据库中缺失的字符串为空串，缺失的坐标为 0。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoRecord {
    pub continent: String,
    pub country_name: String,
    /// ISO 3166-1 alpha-2 国家代码 (e.g., "CN", "US")
    pub country_code: String,
    /// 第一级行政区划名称，没有行政区划时为空串
    pub state_name: String,
    pub city_name: String,
    pub postal_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

/// GeoIP 查询 trait
///
/// 实现必须支持并发只读查询，调用方不加锁。
#[async_trait]
pub trait GeoIpLookup: Send + Sync {
    /// 查询 IP 地址的地理位置，地址不存在或数据库损坏时返回 `Lookup` 错误
    async fn lookup(&self, ip: IpAddr) -> Result<GeoRecord>;

    /// 获取 provider 名称（用于日志）
    fn name(&self) -> &'static str;
}

/// 统一 GeoIP Provider
pub struct GeoIpProvider {
    inner: Arc<dyn GeoIpLookup>,
}

impl GeoIpProvider {
    /// 根据数据库配置打开 MaxMind 数据库
    ///
    /// 文件缺失、不可读或已损坏时返回 `DatabaseOpen` 错误（启动期致命）。
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        let provider = MaxMindProvider::open(&config.file)?;
        info!(
            "GeoIP: Using {} database at {} (build epoch {})",
            provider.database_type(),
            config.file,
            provider.build_epoch()
        );
        Ok(Self::from_lookup(Arc::new(provider)))
    }

    /// 使用任意查询实现
    pub fn from_lookup(inner: Arc<dyn GeoIpLookup>) -> Self {
        info!("GeoIP: Initialized with {} provider", inner.name());
        Self { inner }
    }

    /// 查询 IP 地址的地理位置
    pub async fn lookup(&self, ip: IpAddr) -> Result<GeoRecord> {
        self.inner.lookup(ip).await
    }

    /// 获取当前使用的 provider 名称
    pub fn provider_name(&self) -> &'static str {
        self.inner.name()
    }
}

impl Clone for GeoIpProvider {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
