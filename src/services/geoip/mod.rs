//! GeoIP 服务模块
//!
//! 提供 IP 地址地理位置查询功能，数据来自本地 MaxMind GeoIP2/GeoLite2 City 数据库

mod maxmind;
mod provider;

pub use maxmind::MaxMindProvider;
pub use provider::{GeoIpLookup, GeoIpProvider, GeoRecord};
