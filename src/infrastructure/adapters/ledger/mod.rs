//! Ledger Adapter - 账本交易网关实现

mod fake_ledger_gateway;
mod http_ledger_gateway;

pub use fake_ledger_gateway::{FakeLedgerGateway, RecordedCall};
pub use http_ledger_gateway::*;
