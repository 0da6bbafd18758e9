//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 账本网关配置
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// 钱包配置
    #[serde(default)]
    pub wallet: WalletConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 静态文件目录
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// `/` 返回的首页文件（相对静态文件目录）
    #[serde(default = "default_index_file")]
    pub index_file: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("files")
}

fn default_index_file() -> String {
    "index.html".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            index_file: default_index_file(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 首页文件路径
    pub fn index_path(&self) -> PathBuf {
        self.static_dir.join(&self.index_file)
    }
}

/// 账本网关配置
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// 网关基础 URL
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,

    /// 通道名
    #[serde(default = "default_channel")]
    pub channel: String,

    /// 合约名
    #[serde(default = "default_contract")]
    pub contract: String,

    /// 单次调用超时时间（秒）
    #[serde(default = "default_ledger_timeout")]
    pub timeout_secs: u64,
}

fn default_gateway_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_channel() -> String {
    "mychannel".to_string()
}

fn default_contract() -> String {
    "fabcar".to_string()
}

fn default_ledger_timeout() -> u64 {
    30
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            gateway_url: default_gateway_url(),
            channel: default_channel(),
            contract: default_contract(),
            timeout_secs: default_ledger_timeout(),
        }
    }
}

/// 钱包配置
#[derive(Debug, Clone, Deserialize)]
pub struct WalletConfig {
    /// 钱包目录
    #[serde(default = "default_wallet_path")]
    pub path: PathBuf,

    /// 连接账本使用的身份
    #[serde(default = "default_identity")]
    pub identity: String,
}

fn default_wallet_path() -> PathBuf {
    PathBuf::from("wallet")
}

fn default_identity() -> String {
    "user1".to_string()
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            path: default_wallet_path(),
            identity: default_identity(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.ledger.channel, "mychannel");
        assert_eq!(config.ledger.contract, "fabcar");
        assert_eq!(config.wallet.identity, "user1");
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_index_path() {
        let config = ServerConfig::default();
        assert_eq!(config.index_path(), PathBuf::from("files/index.html"));
    }
}
