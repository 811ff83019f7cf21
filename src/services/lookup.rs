//! 地址查询服务
//!
//! 串联地址解析与 GeoIP 查询：字面量 IP 或主机名 → IpAddr → GeoRecord。
//! DNS 与数据库查询都有超时，超时分别视为地址解析失败和查询失败。

use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::time::timeout;
use tracing::{debug, warn};

use super::geoip::{GeoIpProvider, GeoRecord};
use super::resolver::{AddressResolver, SystemResolver, parse_literal};
use crate::config::StaticConfig;
use crate::errors::{GeolocatorError, Result};

/// 一次成功查询的结果
#[derive(Debug, Clone, PartialEq)]
pub struct LookupOutcome {
    /// 实际查询的地址（主机名解析后的第一个地址）
    pub address: IpAddr,
    pub record: GeoRecord,
    /// 解析 + 查询 + 组装的耗时，仅供展示
    pub elapsed: Duration,
}

/// 查询服务，启动时构造一次，所有请求共享
#[derive(Clone)]
pub struct LookupService {
    geoip: GeoIpProvider,
    resolver: Arc<dyn AddressResolver>,
    dns_timeout: Duration,
    lookup_timeout: Duration,
}

impl LookupService {
    pub fn new(
        geoip: GeoIpProvider,
        resolver: Arc<dyn AddressResolver>,
        dns_timeout: Duration,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            geoip,
            resolver,
            dns_timeout,
            lookup_timeout,
        }
    }

    /// 使用系统 DNS 和配置中的超时时间
    pub fn from_config(geoip: GeoIpProvider, config: &StaticConfig) -> Self {
        Self::new(
            geoip,
            Arc::new(SystemResolver),
            Duration::from_millis(config.dns.timeout_ms),
            Duration::from_millis(config.database.lookup_timeout_ms),
        )
    }

    /// 将路径参数解析为 IP 地址
    ///
    /// 先按字面量解析；否则做 DNS 查询并取返回列表中的第一个地址。
    pub async fn resolve_address(&self, address: &str) -> Result<IpAddr> {
        if let Some(ip) = parse_literal(address) {
            return Ok(ip);
        }

        let ips = timeout(self.dns_timeout, self.resolver.resolve(address))
            .await
            .map_err(|_| {
                GeolocatorError::invalid_address(format!(
                    "DNS lookup for {} timed out after {:?}",
                    address, self.dns_timeout
                ))
            })??;

        let ip = ips.first().copied().ok_or_else(|| {
            GeolocatorError::invalid_address(format!(
                "DNS lookup for {} returned no addresses",
                address
            ))
        })?;

        debug!(
            "Resolved {} to {} via {} resolver",
            address,
            ip,
            self.resolver.name()
        );
        Ok(ip)
    }

    /// 查询已解析地址的地理位置
    pub async fn lookup_ip(&self, ip: IpAddr) -> Result<GeoRecord> {
        timeout(self.lookup_timeout, self.geoip.lookup(ip))
            .await
            .map_err(|_| {
                GeolocatorError::lookup(format!(
                    "{} lookup for {} timed out after {:?}",
                    self.geoip.provider_name(),
                    ip,
                    self.lookup_timeout
                ))
            })?
    }

    /// 完整查询流程：解析地址 → 查询数据库 → 组装记录
    pub async fn check(&self, address: &str) -> Result<LookupOutcome> {
        let start = Instant::now();

        let ip = self.resolve_address(address).await.inspect_err(|e| {
            debug!("Address resolution failed for {}: {}", address, e);
        })?;

        let record = self.lookup_ip(ip).await.inspect_err(|e| {
            warn!("GeoIP lookup failed for {} ({}): {}", address, ip, e);
        })?;

        Ok(LookupOutcome {
            address: ip,
            record,
            elapsed: start.elapsed(),
        })
    }
}
