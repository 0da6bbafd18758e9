//! 应用层 - 请求到交易的分发
//!
//! 包含：
//! - ports: 六边形架构端口定义（TransactionGateway、IdentityStore）
//! - dispatch: 通用分发器与响应整形
//! - error: 应用层错误定义

pub mod dispatch;
pub mod error;
pub mod ports;

pub use dispatch::{
    generate_key, Attachment, ContentKind, DispatchOutcome, EnvelopeStatus, RequestDispatcher,
    RequestParams, ResponseEnvelope, ResponseShaper, ShapedResponse,
};
pub use error::ApplicationError;
pub use ports::{
    GatewayError, Identity, IdentityStorePort, TransactionGatewayPort, TransactionOutcome,
    TransactionRequest, WalletError,
};
