//! MaxMind GeoLite2 数据库实现
//!
//! 使用本地 MaxMind GeoLite2-City.mmdb 文件进行 IP 地理位置查询

use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use maxminddb::{Reader, geoip2};
use tracing::trace;

use super::provider::{GeoIpLookup, GeoRecord};
use crate::errors::{GeolocatorError, Result};

/// MaxMind GeoIP Provider
pub struct MaxMindProvider {
    reader: Arc<Reader<Vec<u8>>>,
}

impl MaxMindProvider {
    /// 从文件路径打开 MaxMind 数据库
    pub fn open(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Err(GeolocatorError::database_open(
                "No database file configured (set database.file)",
            ));
        }

        let reader = Reader::open_readfile(path).map_err(|e| {
            GeolocatorError::database_open(format!("Cannot open database {}: {}", path, e))
        })?;
        Ok(Self {
            reader: Arc::new(reader),
        })
    }

    pub fn database_type(&self) -> &str {
        &self.reader.metadata.database_type
    }

    pub fn build_epoch(&self) -> u64 {
        self.reader.metadata.build_epoch
    }

    fn lookup_blocking(reader: &Reader<Vec<u8>>, ip: IpAddr) -> Result<GeoRecord> {
        let result = reader.lookup(ip)?;
        if !result.has_data() {
            return Err(GeolocatorError::lookup(format!(
                "Address {} not found in database",
                ip
            )));
        }

        let city: geoip2::City = result.decode()?.ok_or_else(|| {
            GeolocatorError::lookup(format!("Address {} has no city record", ip))
        })?;

        Ok(record_from_city(&city))
    }
}

/// 将 City 记录转换为 GeoRecord，只取英文名称
fn record_from_city(city: &geoip2::City<'_>) -> GeoRecord {
    let english = |name: Option<&str>| name.unwrap_or_default().to_string();

    let state_name = city
        .subdivisions
        .first()
        .map(|subdivision| english(subdivision.names.english))
        .unwrap_or_default();

    GeoRecord {
        continent: english(city.continent.names.english),
        country_name: english(city.country.names.english),
        country_code: english(city.country.iso_code),
        state_name,
        city_name: english(city.city.names.english),
        postal_code: english(city.postal.code),
        latitude: city.location.latitude.unwrap_or_default(),
        longitude: city.location.longitude.unwrap_or_default(),
        timezone: english(city.location.time_zone),
    }
}

#[async_trait]
impl GeoIpLookup for MaxMindProvider {
    async fn lookup(&self, ip: IpAddr) -> Result<GeoRecord> {
        let reader = Arc::clone(&self.reader);

        // 同步查询放到阻塞线程池，不占用 worker
        let record =
            tokio::task::spawn_blocking(move || MaxMindProvider::lookup_blocking(&reader, ip))
                .await
                .map_err(|e| GeolocatorError::lookup(format!("Lookup task failed: {}", e)))??;

        trace!(
            "MaxMind lookup for {}: country={}, city={}",
            ip, record.country_code, record.city_name
        );

        Ok(record)
    }

    fn name(&self) -> &'static str {
        "MaxMind"
    }
}
