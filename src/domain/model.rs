use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionReport {
    pub destination: PathBuf,
    /// False when the destination already had content and nothing was copied.
    pub copied: bool,
    pub files_copied: usize,
    pub bytes_copied: u64,
}

impl ProvisionReport {
    pub fn skipped(destination: PathBuf) -> Self {
        Self {
            destination,
            copied: false,
            files_copied: 0,
            bytes_copied: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitOutcome {
    pub data_dir: PathBuf,
    pub provision: ProvisionReport,
    pub providers_registered: usize,
}
