//! 地址解析
//!
//! 路径参数先按 IP 字面量解析（v4 或 v6），失败后当作主机名做正向 DNS 查询。

use std::net::IpAddr;

use async_trait::async_trait;
use tracing::trace;

use crate::errors::{GeolocatorError, Result};

/// 将字符串按 IP 字面量解析
pub fn parse_literal(address: &str) -> Option<IpAddr> {
    address.parse().ok()
}

/// DNS 正向解析 trait
#[async_trait]
pub trait AddressResolver: Send + Sync {
    /// 解析主机名，返回解析器给出的全部地址（保持原始顺序）
    async fn resolve(&self, host: &str) -> Result<Vec<IpAddr>>;

    /// 获取 resolver 名称（用于日志）
    fn name(&self) -> &'static str;
}

/// 使用操作系统解析器（getaddrinfo）
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

#[async_trait]
impl AddressResolver for SystemResolver {
    async fn resolve(&self, host: &str) -> Result<Vec<IpAddr>> {
        let addrs = tokio::net::lookup_host((host, 0)).await.map_err(|e| {
            GeolocatorError::invalid_address(format!("Cannot resolve {}: {}", host, e))
        })?;

        let ips: Vec<IpAddr> = addrs.map(|addr| addr.ip()).collect();
        trace!("Resolved {} to {:?}", host, ips);
        Ok(ips)
    }

    fn name(&self) -> &'static str {
        "system"
    }
}
