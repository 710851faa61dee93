use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiveParams {
    pub peer_db_path: PathBuf,
    pub call_interval_ms: u64,
    pub bucket_size: u32,        // peers kept per proximity bucket
    pub proximity_bin_size: u32, // connected peers per bucket before dialing stops
    pub max_proximity: u32,
}

impl HiveParams {
    pub fn new_default(path: &Path) -> Self {
        Self {
            peer_db_path: path.join("peers.json"),
            call_interval_ms: 3_000,
            bucket_size: 4,
            proximity_bin_size: 2,
            max_proximity: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hive_params_rooted_under_node_dir() {
        let params = HiveParams::new_default(Path::new("/data/nodes/store-ab12"));

        assert_eq!(
            params.peer_db_path,
            PathBuf::from("/data/nodes/store-ab12/peers.json")
        );
        assert_eq!(params.call_interval_ms, 3_000);
        assert_eq!(params.bucket_size, 4);
        assert_eq!(params.proximity_bin_size, 2);
        assert_eq!(params.max_proximity, 8);
    }
}
