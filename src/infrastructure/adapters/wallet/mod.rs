//! Wallet Adapter - 本地身份存储

mod file_system_wallet;

pub use file_system_wallet::FileSystemWallet;
