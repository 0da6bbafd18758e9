//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现，以及 HTTP 层和启动流程

pub mod adapters;
pub mod bootstrap;
pub mod http;

pub use bootstrap::{connect_ledger, StartupError};
