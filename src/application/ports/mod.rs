//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod identity_store;
mod transaction_gateway;

pub use identity_store::{Identity, IdentityStorePort, WalletError};
pub use transaction_gateway::{
    GatewayError, TransactionGatewayPort, TransactionOutcome, TransactionRequest,
};
