//! File System Wallet - 文件系统钱包
//!
//! 支持两种布局：
//! - `<wallet>/<label>.id`（新格式，JSON，含 `mspId`）
//! - `<wallet>/<label>/<label>`（旧格式，JSON，含 `mspid`）

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::application::ports::{Identity, IdentityStorePort, WalletError};

/// 身份文件中关心的字段
#[derive(Debug, Deserialize)]
struct IdentityFile {
    #[serde(rename = "mspId", alias = "mspid")]
    msp_id: Option<String>,
}

/// 文件系统钱包
pub struct FileSystemWallet {
    root: PathBuf,
}

impl FileSystemWallet {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn candidates(&self, label: &str) -> [PathBuf; 2] {
        [
            self.root.join(format!("{}.id", label)),
            self.root.join(label).join(label),
        ]
    }
}

impl IdentityStorePort for FileSystemWallet {
    fn get(&self, label: &str) -> Result<Option<Identity>, WalletError> {
        let Some(path) = self.candidates(label).into_iter().find(|p| p.is_file()) else {
            return Ok(None);
        };

        let content = std::fs::read(&path).map_err(|e| {
            WalletError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let file: IdentityFile =
            serde_json::from_slice(&content).map_err(|e| WalletError::Malformed {
                label: label.to_string(),
                reason: e.to_string(),
            })?;

        tracing::debug!(
            label = %label,
            path = %path.display(),
            msp_id = ?file.msp_id,
            "Identity found in wallet"
        );

        Ok(Some(Identity {
            label: label.to_string(),
            msp_id: file.msp_id,
        }))
    }
}
