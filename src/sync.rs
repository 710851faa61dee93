use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Parameters owned by the chunk sync subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncParams {
    pub request_db_path: PathBuf,
    pub request_batch_size: u32,
    pub key_buffer_size: u32,
    pub sync_batch_size: u32,
    pub sync_buffer_size: u32,
    pub priorities: Vec<u8>, // per delivery class, highest class first
}

impl SyncParams {
    pub fn new_default(path: &Path) -> Self {
        Self {
            request_db_path: path.join("requests"),
            request_batch_size: 512,
            key_buffer_size: 1_024,
            sync_batch_size: 128,
            sync_buffer_size: 4_096,
            priorities: vec![2, 1, 1, 0, 0],
        }
    }
}
