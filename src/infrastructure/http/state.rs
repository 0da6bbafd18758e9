//! Application State
//!
//! 所有请求共享的只读状态：账本网关与分发器

use std::sync::Arc;

use crate::application::{RequestDispatcher, TransactionGatewayPort};

/// 应用状态
pub struct AppState {
    pub gateway: Arc<dyn TransactionGatewayPort>,
    pub dispatcher: RequestDispatcher,
}

impl AppState {
    /// 创建应用状态
    pub fn new(gateway: Arc<dyn TransactionGatewayPort>) -> Self {
        Self {
            gateway: gateway.clone(),
            dispatcher: RequestDispatcher::new(gateway),
        }
    }
}
