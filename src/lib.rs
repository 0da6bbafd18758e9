//! ledgergate - 账本合约 REST 网关
//!
//! 每个 HTTP 端点把表单/JSON 输入转换为一次账本交易（submit 或 evaluate），
//! 再把账本的返回转换为 JSON/HTML。
//!
//! 领域层 (domain/):
//! - 声明式路由表：交易名、参数顺序、响应策略
//!
//! 应用层 (application/):
//! - Ports: TransactionGateway, IdentityStore
//! - Dispatch: 通用分发器 + 响应整形
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: HTTP 账本网关、文件系统钱包
//! - HTTP: axum 路由、参数提取、静态文件
//! - Bootstrap: 启动时连接账本

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
