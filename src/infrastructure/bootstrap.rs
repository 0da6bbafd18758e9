//! Bootstrap - 启动时连接账本
//!
//! 任何一步失败都是致命错误：不绑定端口，进程退出

use std::sync::Arc;
use thiserror::Error;

use crate::application::ports::{
    GatewayError, Identity, IdentityStorePort, TransactionGatewayPort, WalletError,
};
use crate::config::AppConfig;
use crate::domain::{validate_route_table, RouteError, RouteSpec};
use crate::infrastructure::adapters::{
    FileSystemWallet, HttpLedgerGateway, HttpLedgerGatewayConfig,
};

/// 启动错误
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("An identity for the user \"{label}\" does not exist in the wallet at {wallet}")]
    IdentityMissing { label: String, wallet: String },

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Ledger gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Ledger gateway unreachable: {0}")]
    GatewayUnreachable(String),

    #[error("Invalid route table: {0}")]
    Routes(#[from] RouteError),
}

/// 在钱包中查找固定身份
pub fn resolve_identity(
    wallet: &dyn IdentityStorePort,
    label: &str,
    wallet_location: &str,
) -> Result<Identity, StartupError> {
    wallet
        .get(label)?
        .ok_or_else(|| StartupError::IdentityMissing {
            label: label.to_string(),
            wallet: wallet_location.to_string(),
        })
}

/// 确认网关可达
pub async fn ensure_reachable(
    gateway: &dyn TransactionGatewayPort,
    gateway_url: &str,
) -> Result<(), StartupError> {
    if gateway.health_check().await {
        Ok(())
    } else {
        Err(StartupError::GatewayUnreachable(gateway_url.to_string()))
    }
}

/// 校验路由表
pub fn checked_routes(routes: Vec<RouteSpec>) -> Result<Vec<RouteSpec>, StartupError> {
    validate_route_table(&routes)?;
    Ok(routes)
}

/// 打开账本连接（进程生命周期内只调用一次）
pub async fn connect_ledger(
    config: &AppConfig,
) -> Result<Arc<dyn TransactionGatewayPort>, StartupError> {
    let wallet = FileSystemWallet::new(&config.wallet.path);
    tracing::info!("Wallet path: {}", wallet.root().display());

    let identity = resolve_identity(
        &wallet,
        &config.wallet.identity,
        &wallet.root().display().to_string(),
    )?;

    let gateway_config = HttpLedgerGatewayConfig::new(&config.ledger.gateway_url)
        .with_contract(&config.ledger.channel, &config.ledger.contract)
        .with_timeout(config.ledger.timeout_secs);
    let gateway = HttpLedgerGateway::new(gateway_config, identity)?;

    ensure_reachable(&gateway, &config.ledger.gateway_url).await?;

    tracing::info!(
        channel = %config.ledger.channel,
        contract = %config.ledger.contract,
        identity = %config.wallet.identity,
        "Connected to ledger gateway"
    );

    Ok(Arc::new(gateway))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::route_table;
    use crate::infrastructure::adapters::FakeLedgerGateway;
    use tempfile::TempDir;

    #[test]
    fn test_missing_identity_is_fatal() {
        let dir = TempDir::new().unwrap();
        let wallet = FileSystemWallet::new(dir.path());

        let err = resolve_identity(&wallet, "user1", "wallet").unwrap_err();
        assert!(matches!(err, StartupError::IdentityMissing { .. }));
        assert!(err.to_string().contains("user1"));
    }

    #[test]
    fn test_identity_found() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("user1.id"), r#"{"mspId":"Org1MSP"}"#).unwrap();
        let wallet = FileSystemWallet::new(dir.path());

        let identity = resolve_identity(&wallet, "user1", "wallet").unwrap();
        assert_eq!(identity.label, "user1");
    }

    #[tokio::test]
    async fn test_unreachable_gateway_is_fatal() {
        let gateway = FakeLedgerGateway::unhealthy();
        assert!(matches!(
            ensure_reachable(&gateway, "http://gw").await,
            Err(StartupError::GatewayUnreachable(_))
        ));
        assert!(ensure_reachable(&FakeLedgerGateway::new(), "http://gw")
            .await
            .is_ok());
    }

    #[test]
    fn test_route_table_passes_startup_check() {
        assert_eq!(checked_routes(route_table()).unwrap().len(), 20);
    }

    #[tokio::test]
    async fn test_connect_without_wallet_fails() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.wallet.path = dir.path().join("wallet");

        assert!(matches!(
            connect_ledger(&config).await,
            Err(StartupError::IdentityMissing { .. })
        ));
    }
}
