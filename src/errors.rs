use std::fmt;

/// 客户端可见的固定错误消息
pub const MSG_INVALID_PASSWORD: &str = "Invalid password";
pub const MSG_INVALID_ADDRESS: &str = "Invalid ip address";
pub const MSG_CANNOT_PROCESS: &str = "Cannot process request";

#[derive(Debug, Clone)]
pub enum GeolocatorError {
    Config(String),
    DatabaseOpen(String),
    Bind(String),
    Unauthorized(String),
    InvalidAddress(String),
    Lookup(String),
}

impl GeolocatorError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            GeolocatorError::Config(_) => "E001",
            GeolocatorError::DatabaseOpen(_) => "E002",
            GeolocatorError::Bind(_) => "E003",
            GeolocatorError::Unauthorized(_) => "E004",
            GeolocatorError::InvalidAddress(_) => "E005",
            GeolocatorError::Lookup(_) => "E006",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            GeolocatorError::Config(_) => "Configuration Error",
            GeolocatorError::DatabaseOpen(_) => "Database Open Error",
            GeolocatorError::Bind(_) => "Bind Error",
            GeolocatorError::Unauthorized(_) => "Authorization Error",
            GeolocatorError::InvalidAddress(_) => "Address Resolution Error",
            GeolocatorError::Lookup(_) => "Lookup Error",
        }
    }

    /// 获取错误详情（仅用于服务端日志）
    pub fn message(&self) -> &str {
        match self {
            GeolocatorError::Config(msg) => msg,
            GeolocatorError::DatabaseOpen(msg) => msg,
            GeolocatorError::Bind(msg) => msg,
            GeolocatorError::Unauthorized(msg) => msg,
            GeolocatorError::InvalidAddress(msg) => msg,
            GeolocatorError::Lookup(msg) => msg,
        }
    }

    /// 返回给客户端的消息，不包含底层原因
    pub fn client_message(&self) -> &'static str {
        match self {
            GeolocatorError::Unauthorized(_) => MSG_INVALID_PASSWORD,
            GeolocatorError::InvalidAddress(_) => MSG_INVALID_ADDRESS,
            GeolocatorError::Config(_)
            | GeolocatorError::DatabaseOpen(_)
            | GeolocatorError::Bind(_)
            | GeolocatorError::Lookup(_) => MSG_CANNOT_PROCESS,
        }
    }

    /// 是否为启动期致命错误
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            GeolocatorError::Config(_) | GeolocatorError::DatabaseOpen(_) | GeolocatorError::Bind(_)
        )
    }

    /// 格式化为彩色输出（用于启动失败）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for GeolocatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for GeolocatorError {}

// 便捷的构造函数
impl GeolocatorError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        GeolocatorError::Config(msg.into())
    }

    pub fn database_open<T: Into<String>>(msg: T) -> Self {
        GeolocatorError::DatabaseOpen(msg.into())
    }

    pub fn bind<T: Into<String>>(msg: T) -> Self {
        GeolocatorError::Bind(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        GeolocatorError::Unauthorized(msg.into())
    }

    pub fn invalid_address<T: Into<String>>(msg: T) -> Self {
        GeolocatorError::InvalidAddress(msg.into())
    }

    pub fn lookup<T: Into<String>>(msg: T) -> Self {
        GeolocatorError::Lookup(msg.into())
    }
}

impl From<config::ConfigError> for GeolocatorError {
    fn from(err: config::ConfigError) -> Self {
        GeolocatorError::Config(err.to_string())
    }
}

impl From<maxminddb::MaxMindDbError> for GeolocatorError {
    fn from(err: maxminddb::MaxMindDbError) -> Self {
        GeolocatorError::Lookup(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GeolocatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_hides_cause() {
        let err = GeolocatorError::lookup("address 10.0.0.1 not found in database");
        assert_eq!(err.client_message(), MSG_CANNOT_PROCESS);
        assert!(!err.client_message().contains("10.0.0.1"));
    }

    #[test]
    fn test_client_messages() {
        assert_eq!(
            GeolocatorError::unauthorized("bad header").client_message(),
            "Invalid password"
        );
        assert_eq!(
            GeolocatorError::invalid_address("nxdomain").client_message(),
            "Invalid ip address"
        );
    }

    #[test]
    fn test_fatal_variants() {
        assert!(GeolocatorError::config("x").is_fatal());
        assert!(GeolocatorError::database_open("x").is_fatal());
        assert!(GeolocatorError::bind("x").is_fatal());
        assert!(!GeolocatorError::lookup("x").is_fatal());
        assert!(!GeolocatorError::unauthorized("x").is_fatal());
    }

    #[test]
    fn test_display_uses_simple_format() {
        let err = GeolocatorError::bind("address in use");
        assert_eq!(err.to_string(), "Bind Error: address in use");
        assert_eq!(err.code(), "E003");
    }
}
