use serde::{Deserialize, Serialize};

/// 静态配置（启动时加载，运行期间不可变）
///
/// 来源优先级：命令行参数 > 环境变量 > config.json > 默认值
///
/// config.json 使用与命令行参数一致的点号键名：
/// ```json
/// {
///   "server.ip": "0.0.0.0",
///   "server.port": 8000,
///   "server.password": "secret",
///   "database.file": "GeoLite2-City.mmdb"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub dns: DnsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 监听地址，形如 `127.0.0.1:8000`
    ///
    /// `server.ip` 为空时监听所有接口；IPv6 地址加方括号。
    pub fn bind_address(&self) -> String {
        let ip = self.server.ip.trim();
        let port = self.server.port;

        if ip.is_empty() {
            format!("0.0.0.0:{}", port)
        } else if ip.contains(':') && !ip.starts_with('[') {
            format!("[{}]:{}", ip, port)
        } else {
            format!("{}:{}", ip, port)
        }
    }

    /// 是否启用共享密钥校验
    pub fn auth_enabled(&self) -> bool {
        !self.server.password.is_empty()
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_server_ip")]
    pub ip: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// 共享密钥，为空时不校验
    #[serde(default)]
    pub password: String,
    /// 携带共享密钥的请求头
    #[serde(default = "default_auth_header")]
    pub auth_header: String,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// GeoIP 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatabaseConfig {
    /// MaxMind City 数据库文件路径 (GeoLite2-City.mmdb)
    #[serde(default)]
    pub file: String,
    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,
}

/// DNS 解析配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DnsConfig {
    #[serde(default = "default_dns_timeout_ms")]
    pub timeout_ms: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
}

// ============================================================
// Default value functions
// ============================================================

pub(crate) fn default_server_ip() -> String {
    "127.0.0.1".to_string()
}

pub(crate) fn default_server_port() -> u16 {
    8000
}

fn default_auth_header() -> String {
    "Authorization".to_string()
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_lookup_timeout_ms() -> u64 {
    1000
}

fn default_dns_timeout_ms() -> u64 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: default_server_ip(),
            port: default_server_port(),
            password: String::new(),
            auth_header: default_auth_header(),
            workers: default_workers(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            file: String::new(),
            lookup_timeout_ms: default_lookup_timeout_ms(),
        }
    }
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_dns_timeout_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}
