use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Parameters owned by the chunk store subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreParams {
    pub chunk_db_path: PathBuf,
    pub db_capacity: u64,    // chunks kept on disk
    pub cache_capacity: u64, // chunks kept in memory
    pub radius: u32,         // advertised retention neighborhood depth
}

impl StoreParams {
    pub fn new_default(path: &Path) -> Self {
        Self {
            chunk_db_path: path.join("chunks"),
            db_capacity: 5_000_000,
            cache_capacity: 5_000,
            radius: 0,
        }
    }
}

/// Parameters owned by the content chunker. Holds no filesystem state, so its
/// defaults take no path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkerParams {
    pub branches: u32, // branching factor of the chunk tree
    pub hash: String,  // content hash chunks are addressed by
}

impl Default for ChunkerParams {
    fn default() -> Self {
        Self {
            branches: 128,
            hash: "sha256".to_string(),
        }
    }
}
