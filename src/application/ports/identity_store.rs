//! Identity Store Port - 本地钱包身份查询
//!
//! 启动时用于确认固定身份已注册，并为网关请求提供身份信息

use thiserror::Error;

/// 钱包错误
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Malformed identity {label}: {reason}")]
    Malformed { label: String, reason: String },
}

/// 钱包中的身份
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub label: String,
    /// 所属组织 MSP（旧格式钱包可能缺失）
    pub msp_id: Option<String>,
}

/// Identity Store Port
pub trait IdentityStorePort: Send + Sync {
    /// 按 label 查找身份，不存在时返回 `Ok(None)`
    fn get(&self, label: &str) -> Result<Option<Identity>, WalletError>;

    fn exists(&self, label: &str) -> Result<bool, WalletError> {
        Ok(self.get(label)?.is_some())
    }
}
