//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. `PORT` 环境变量（仅 server.port）
//! 2. 环境变量（前缀 `LEDGERGATE_`）
//! 3. 配置文件（config.toml）
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// # 环境变量示例
/// - `LEDGERGATE_SERVER__PORT=8080`
/// - `LEDGERGATE_LEDGER__GATEWAY_URL=http://gateway:8080`
/// - `LEDGERGATE_WALLET__IDENTITY=admin`
/// - `PORT=3001`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("server.static_dir", "files")?
        .set_default("server.index_file", "index.html")?
        .set_default("ledger.gateway_url", "http://localhost:8080")?
        .set_default("ledger.channel", "mychannel")?
        .set_default("ledger.contract", "fabcar")?
        .set_default("ledger.timeout_secs", 30)?
        .set_default("wallet.path", "wallet")?
        .set_default("wallet.identity", "user1")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量
    // 前缀: LEDGERGATE_
    // 层级分隔符: __ (双下划线)
    builder = builder.add_source(
        Environment::with_prefix("LEDGERGATE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 部署平台常用的 PORT
    builder = builder.set_override_option("server.port", std::env::var("PORT").ok())?;

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.ledger.gateway_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Ledger gateway URL cannot be empty".to_string(),
        ));
    }

    if config.ledger.channel.is_empty() || config.ledger.contract.is_empty() {
        return Err(ConfigError::ValidationError(
            "Ledger channel and contract cannot be empty".to_string(),
        ));
    }

    if config.ledger.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Ledger timeout cannot be 0".to_string(),
        ));
    }

    if config.wallet.identity.is_empty() {
        return Err(ConfigError::ValidationError(
            "Wallet identity cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Static Directory: {:?}", config.server.static_dir);
    tracing::info!("Ledger Gateway: {}", config.ledger.gateway_url);
    tracing::info!(
        "Channel / Contract: {} / {}",
        config.ledger.channel,
        config.ledger.contract
    );
    tracing::info!("Ledger Timeout: {}s", config.ledger.timeout_secs);
    tracing::info!("Wallet: {:?}", config.wallet.path);
    tracing::info!("Identity: {}", config.wallet.identity);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_gateway_url() {
        let mut config = AppConfig::default();
        config.ledger.gateway_url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_identity() {
        let mut config = AppConfig::default();
        config.wallet.identity = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_timeout() {
        let mut config = AppConfig::default();
        config.ledger.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[ledger]\ncontract = \"election\"\n\n[wallet]\nidentity = \"admin\""
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.ledger.contract, "election");
        assert_eq!(config.ledger.channel, "mychannel");
        assert_eq!(config.wallet.identity, "admin");
    }
}
