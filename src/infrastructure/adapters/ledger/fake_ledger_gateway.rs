//! Fake Ledger Gateway - 用于测试的交易网关
//!
//! 记录每次调用，按交易名返回预设结果，不访问网络

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::application::ports::{GatewayError, TransactionGatewayPort, TransactionRequest};
use crate::domain::MutationKind;

/// 记录的一次调用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub kind: MutationKind,
    pub request: TransactionRequest,
}

impl RecordedCall {
    pub fn submit(name: &str, args: &[&str]) -> Self {
        Self::new(MutationKind::Submit, name, args)
    }

    pub fn evaluate(name: &str, args: &[&str]) -> Self {
        Self::new(MutationKind::Evaluate, name, args)
    }

    fn new(kind: MutationKind, name: &str, args: &[&str]) -> Self {
        Self {
            kind,
            request: TransactionRequest::new(name, args.iter().map(|a| a.to_string()).collect()),
        }
    }
}

#[derive(Debug, Clone)]
enum Scripted {
    Ok(Vec<u8>),
    Err(String),
}

/// Fake Ledger Gateway
///
/// 未预设的交易返回空字节
pub struct FakeLedgerGateway {
    responses: Mutex<HashMap<String, Scripted>>,
    calls: Mutex<Vec<RecordedCall>>,
    healthy: bool,
}

impl FakeLedgerGateway {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            healthy: true,
        }
    }

    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            ..Self::new()
        }
    }

    /// 预设成功结果
    pub fn respond_ok(&self, transaction: &str, payload: &[u8]) {
        self.script(transaction, Scripted::Ok(payload.to_vec()));
    }

    /// 预设失败结果（以 `GatewayError::Rejected` 返回）
    pub fn respond_err(&self, transaction: &str, reason: &str) {
        self.script(transaction, Scripted::Err(reason.to_string()));
    }

    /// 已发生的调用（按顺序）
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn script(&self, transaction: &str, response: Scripted) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.insert(transaction.to_string(), response);
        }
    }

    fn record(
        &self,
        kind: MutationKind,
        request: &TransactionRequest,
    ) -> Result<Vec<u8>, GatewayError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                kind,
                request: request.clone(),
            });
        }

        tracing::debug!(
            transaction = %request.name,
            kind = kind.as_str(),
            "FakeLedgerGateway: returning scripted result"
        );

        let scripted = self
            .responses
            .lock()
            .ok()
            .and_then(|r| r.get(&request.name).cloned());

        match scripted {
            Some(Scripted::Ok(payload)) => Ok(payload),
            Some(Scripted::Err(message)) => Err(GatewayError::Rejected(message)),
            None => Ok(Vec::new()),
        }
    }
}

impl Default for FakeLedgerGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransactionGatewayPort for FakeLedgerGateway {
    async fn submit(&self, request: &TransactionRequest) -> Result<Vec<u8>, GatewayError> {
        self.record(MutationKind::Submit, request)
    }

    async fn evaluate(&self, request: &TransactionRequest) -> Result<Vec<u8>, GatewayError> {
        self.record(MutationKind::Evaluate, request)
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }
}
