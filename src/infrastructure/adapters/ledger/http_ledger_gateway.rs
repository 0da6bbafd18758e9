//! HTTP Ledger Gateway - 通过 REST 网关调用账本合约
//!
//! 实现 TransactionGatewayPort trait
//!
//! 网关 API:
//! POST {gateway_url}/channels/{channel}/contracts/{contract}/submit
//! POST {gateway_url}/channels/{channel}/contracts/{contract}/evaluate
//! Request: {"transaction": "...", "arguments": ["..."], "identity": "user1", "mspId": "Org1MSP"}  (JSON)
//! Response: 合约返回的原始字节
//!
//! GET {gateway_url}/health

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{
    GatewayError, Identity, TransactionGatewayPort, TransactionRequest,
};
use crate::domain::MutationKind;

/// 网关请求体 (JSON)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LedgerHttpRequest<'a> {
    transaction: &'a str,
    arguments: &'a [String],
    identity: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    msp_id: Option<&'a str>,
}

/// HTTP Ledger Gateway 配置
#[derive(Debug, Clone)]
pub struct HttpLedgerGatewayConfig {
    /// 网关基础 URL
    pub gateway_url: String,
    /// 通道名
    pub channel: String,
    /// 合约名
    pub contract: String,
    /// 单次调用超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpLedgerGatewayConfig {
    fn default() -> Self {
        Self {
            gateway_url: "http://localhost:8080".to_string(),
            channel: "mychannel".to_string(),
            contract: "fabcar".to_string(),
            timeout_secs: 30,
        }
    }
}

impl HttpLedgerGatewayConfig {
    pub fn new(gateway_url: impl Into<String>) -> Self {
        Self {
            gateway_url: gateway_url.into(),
            ..Default::default()
        }
    }

    pub fn with_contract(mut self, channel: impl Into<String>, contract: impl Into<String>) -> Self {
        self.channel = channel.into();
        self.contract = contract.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP Ledger Gateway
///
/// 进程生命周期内只创建一次，以 `Arc` 共享给所有请求
pub struct HttpLedgerGateway {
    client: Client,
    config: HttpLedgerGatewayConfig,
    identity: Identity,
}

impl HttpLedgerGateway {
    pub fn new(config: HttpLedgerGatewayConfig, identity: Identity) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            config,
            identity,
        })
    }

    fn transaction_url(&self, kind: MutationKind) -> String {
        format!(
            "{}/channels/{}/contracts/{}/{}",
            self.config.gateway_url.trim_end_matches('/'),
            self.config.channel,
            self.config.contract,
            kind.as_str()
        )
    }

    fn health_url(&self) -> String {
        format!("{}/health", self.config.gateway_url.trim_end_matches('/'))
    }

    async fn invoke(
        &self,
        kind: MutationKind,
        request: &TransactionRequest,
    ) -> Result<Vec<u8>, GatewayError> {
        let url = self.transaction_url(kind);
        let body = LedgerHttpRequest {
            transaction: &request.name,
            arguments: &request.args,
            identity: &self.identity.label,
            msp_id: self.identity.msp_id.as_deref(),
        };

        tracing::debug!(
            url = %url,
            transaction = %request.name,
            "Sending ledger request"
        );

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else if e.is_connect() {
                    GatewayError::NetworkError(format!("Cannot connect to ledger gateway: {}", e))
                } else {
                    GatewayError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let payload = response
            .bytes()
            .await
            .map_err(|e| GatewayError::InvalidResponse(format!("Failed to read payload: {}", e)))?
            .to_vec();

        tracing::debug!(
            transaction = %request.name,
            payload_size = payload.len(),
            "Ledger request completed"
        );

        Ok(payload)
    }
}

#[async_trait]
impl TransactionGatewayPort for HttpLedgerGateway {
    async fn submit(&self, request: &TransactionRequest) -> Result<Vec<u8>, GatewayError> {
        self.invoke(MutationKind::Submit, request).await
    }

    async fn evaluate(&self, request: &TransactionRequest) -> Result<Vec<u8>, GatewayError> {
        self.invoke(MutationKind::Evaluate, request).await
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(&self.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            label: "user1".to_string(),
            msp_id: Some("Org1MSP".to_string()),
        }
    }

    #[test]
    fn test_config_default() {
        let config = HttpLedgerGatewayConfig::default();
        assert_eq!(config.gateway_url, "http://localhost:8080");
        assert_eq!(config.channel, "mychannel");
        assert_eq!(config.contract, "fabcar");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_config_builder() {
        let config = HttpLedgerGatewayConfig::new("http://gw:9000")
            .with_contract("votes", "election")
            .with_timeout(5);
        assert_eq!(config.gateway_url, "http://gw:9000");
        assert_eq!(config.channel, "votes");
        assert_eq!(config.contract, "election");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_transaction_urls() {
        let gateway =
            HttpLedgerGateway::new(HttpLedgerGatewayConfig::new("http://gw:9000/"), identity())
                .unwrap();
        assert_eq!(
            gateway.transaction_url(MutationKind::Submit),
            "http://gw:9000/channels/mychannel/contracts/fabcar/submit"
        );
        assert_eq!(
            gateway.transaction_url(MutationKind::Evaluate),
            "http://gw:9000/channels/mychannel/contracts/fabcar/evaluate"
        );
        assert_eq!(gateway.health_url(), "http://gw:9000/health");
    }

    #[test]
    fn test_request_body_shape() {
        let args = vec!["E1".to_string(), "10".to_string()];
        let body = LedgerHttpRequest {
            transaction: "createElection",
            arguments: &args,
            identity: "user1",
            msp_id: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "transaction": "createElection",
                "arguments": ["E1", "10"],
                "identity": "user1",
            })
        );
    }

    #[tokio::test]
    async fn test_unreachable_gateway_is_network_error() {
        let config = HttpLedgerGatewayConfig::new("http://127.0.0.1:1").with_timeout(2);
        let gateway = HttpLedgerGateway::new(config, identity()).unwrap();

        let result = gateway
            .evaluate(&TransactionRequest::new("getElections", Vec::new()))
            .await;
        assert!(matches!(
            result,
            Err(GatewayError::NetworkError(_)) | Err(GatewayError::Timeout)
        ));
        assert!(!gateway.health_check().await);
    }
}
