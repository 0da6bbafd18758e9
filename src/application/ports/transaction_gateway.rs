//! Transaction Gateway Port - 账本交易网关抽象
//!
//! 只消费两个操作：
//! - `submit`: 写交易，排序并持久化到账本
//! - `evaluate`: 只读查询，不与并发的 submit 排序
//!
//! 具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// 网关错误
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    /// 合约或背书节点拒绝了交易
    #[error("Transaction rejected: {0}")]
    Rejected(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 交易请求：交易名 + 按位置排列的字符串参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub name: String,
    pub args: Vec<String>,
}

impl TransactionRequest {
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// 交易结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionOutcome {
    Success(Vec<u8>),
    Failure(String),
}

impl TransactionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl From<Result<Vec<u8>, GatewayError>> for TransactionOutcome {
    fn from(result: Result<Vec<u8>, GatewayError>) -> Self {
        match result {
            Ok(bytes) => Self::Success(bytes),
            Err(e) => Self::Failure(e.to_string()),
        }
    }
}

/// Transaction Gateway Port
///
/// 进程内只有一个实例，所有请求只读共享
#[async_trait]
pub trait TransactionGatewayPort: Send + Sync {
    /// 提交写交易
    async fn submit(&self, request: &TransactionRequest) -> Result<Vec<u8>, GatewayError>;

    /// 执行只读查询
    async fn evaluate(&self, request: &TransactionRequest) -> Result<Vec<u8>, GatewayError>;

    /// 检查网关是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_error_keeps_message() {
        let outcome = TransactionOutcome::from(Err(GatewayError::Rejected(
            "election not found".to_string(),
        )));
        assert_eq!(
            outcome,
            TransactionOutcome::Failure("Transaction rejected: election not found".to_string())
        );
        assert!(!outcome.is_success());
    }
}
