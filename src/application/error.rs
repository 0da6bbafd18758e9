//! 应用层错误定义
//!
//! 交易本身的失败不在这里：网关错误被转换为 `TransactionOutcome::Failure`，
//! 由响应策略决定输出形态。

use thiserror::Error;

/// 应用层错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    /// 必需参数缺失，交易不会被调用
    #[error("Missing required parameter: {name}")]
    MissingParameter { name: String },

    /// 账本返回的结果无法按预期解析
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl ApplicationError {
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload(message.into())
    }
}

impl From<serde_json::Error> for ApplicationError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidPayload(err.to_string())
    }
}
