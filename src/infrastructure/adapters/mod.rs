//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod ledger;
pub mod wallet;

pub use ledger::*;
pub use wallet::*;
