use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};

use super::{FlagOverrides, StaticConfig};
use crate::errors::{GeolocatorError, Result};

/// 默认配置文件名（位于可执行文件所在目录）
pub const CONFIG_FILE_NAME: &str = "config.json";

/// 环境变量前缀，分隔符 `__`，例如 `GEOLOCATOR__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "GEOLOCATOR";

/// 可执行文件旁的 config.json
pub fn default_config_path() -> Result<PathBuf> {
    let exe = std::env::current_exe()
        .map_err(|e| GeolocatorError::config(format!("Cannot locate executable: {}", e)))?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// 加载启动配置
///
/// `config_path` 为 None 时使用 [`default_config_path`]。
pub fn load_config(config_path: Option<&Path>, overrides: &FlagOverrides) -> Result<StaticConfig> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };
    load_config_from(&path, Some(ENV_PREFIX), overrides)
}

/// 从指定文件、环境变量和命令行参数加载配置
///
/// 优先级：命令行参数 > 环境变量 > 配置文件 > 默认值
///
/// 文件不存在时跳过；文件存在但无法解析时返回 `Config` 错误。
/// 这里不检查数据库文件是否存在，打开数据库时才会报错。
pub fn load_config_from(
    path: &Path,
    env_prefix: Option<&str>,
    overrides: &FlagOverrides,
) -> Result<StaticConfig> {
    let mut builder = Config::builder();

    if path.is_file() {
        builder = builder.add_source(File::from(path).format(FileFormat::Json).required(true));
    }

    if let Some(prefix) = env_prefix {
        // 环境变量一律按字符串读入，数值字段在反序列化时再转换
        builder = builder.add_source(Environment::with_prefix(prefix).separator("__"));
    }

    let builder = builder
        .set_override_option("server.ip", overrides.server_ip.clone())?
        .set_override_option("server.port", overrides.server_port.map(i64::from))?
        .set_override_option("server.password", overrides.server_password.clone())?
        .set_override_option("database.file", overrides.database_file.clone())?;

    let settings = builder.build().map_err(|e| {
        GeolocatorError::config(format!(
            "Configuration file {} could not be read: {}",
            path.display(),
            e
        ))
    })?;

    settings.try_deserialize::<StaticConfig>().map_err(|e| {
        GeolocatorError::config(format!(
            "Configuration file {} is invalid: {}",
            path.display(),
            e
        ))
    })
}
