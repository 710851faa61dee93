use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ed25519_dalek::SigningKey;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::hive::HiveParams;
use crate::identity::{Address, NodeIdentity};
use crate::store::{ChunkerParams, StoreParams};
use crate::swap::SwapParams;
use crate::sync::SyncParams;

/// File name of the persisted document inside the node directory.
pub const CONFIG_FILE: &str = "config.json";

/// Prefix of per-identity node directories under the base path. Several nodes
/// can share one base path as long as their keys differ.
pub const NODE_DIR_PREFIX: &str = "store-";

/// Default listening port of the node.
pub const DEFAULT_PORT: u16 = 8500;

/// Well-known root of the name registry, applied when a document carries a
/// zero or missing value.
pub const DEFAULT_REGISTRY_ROOT: Address = Address::new([
    0x5a, 0xc1, 0xd5, 0xf2, 0xc8, 0xe0, 0x4b, 0x7a, 0x91, 0xd3, 0x6e, 0x20, 0xcc, 0x4a, 0x8b,
    0x1f, 0x09, 0xd3, 0xe7, 0x72,
]);

// Base paths conventionally end in this segment; delivered content lives in
// the sibling directory next to it.
// TODO: take the delivery path as an explicit parameter instead of deriving
// it from the base path spelling.
const DELIVERY_SEGMENT: &str = "storenet/p2p-store";
const DELIVERY_SIBLING: &str = "delivery";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot create node directory {path}: {source}")]
    DirectoryCreation { path: PathBuf, source: io::Error },

    #[error("cannot read config file {path}: {source}")]
    FileRead { path: PathBuf, source: io::Error },

    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{field} does not match the one in the config file: {derived} != {stored}")]
    IdentityMismatch {
        field: &'static str,
        derived: String,
        stored: String,
    },

    #[error("cannot write config file {path}: {source}")]
    Persist { path: PathBuf, source: io::Error },
}

/// The persisted node configuration document.
///
/// Sub-configurations serialize as nested sections under their own keys;
/// field declaration order is the on-disk order. Unknown fields in a loaded
/// document are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub store: StoreParams,
    pub chunker: ChunkerParams,
    pub hive: HiveParams,
    pub swap: SwapParams,
    pub sync: SyncParams,
    /// Node directory, `<base path>/store-<fingerprint>`. Computed once at
    /// creation; a loaded document keeps its persisted value.
    pub path: PathBuf,
    pub port: u16,
    /// Hex encoding of the node's public key. Checked against the presented
    /// key on every load.
    pub public_key: String,
    /// Hex fingerprint of the public key. Checked against the presented key
    /// on every load.
    pub fingerprint: String,
    /// Root of the name registry. Older documents may lack it; a zero value
    /// is replaced with [`DEFAULT_REGISTRY_ROOT`] after load, in memory only.
    #[serde(default)]
    pub registry_root: Address,
    pub network_id: u64,
    /// Port of the external RPC front end, persisted as given.
    pub rpc_port: u16,
    /// Path of the external IPC endpoint, persisted as given.
    pub ipc_path: String,
    /// Directory retrieved content is staged in for delivery; derived from
    /// the base path at creation time.
    pub delivery_path: PathBuf,
}

impl Config {
    /// Loads the configuration for the identity behind `key` from under
    /// `base_path`, creating and persisting a default document on first use.
    ///
    /// The config is agnostic to where the private key comes from; managing
    /// keys is left to the embedder. `rpc_port` and `ipc_path` are persisted
    /// verbatim for the external services that need them.
    pub fn new(
        base_path: &Path,
        contract: Address,
        key: &SigningKey,
        network_id: u64,
        rpc_port: u16,
        ipc_path: &str,
    ) -> Result<Self, ConfigError> {
        debug!("Node config requested under: {}", base_path.display());

        let identity = NodeIdentity::derive(key);
        let dirpath = node_dir(base_path, &identity.fingerprint_hex());
        ensure_dir(&dirpath)?;

        let confpath = dirpath.join(CONFIG_FILE);
        let data = match read_config_bytes(&confpath)? {
            Some(data) => data,
            None => {
                // First run for this identity: persist the defaults.
                let mut config = default_config(
                    base_path, &dirpath, &identity, contract, network_id, rpc_port, ipc_path,
                );
                config.swap.set_key(key);
                config.save()?;
                info!("Created node config at: {}", confpath.display());
                return Ok(config);
            }
        };

        let mut config: Config =
            serde_json::from_slice(&data).map_err(|source| ConfigError::Parse {
                path: confpath.clone(),
                source,
            })?;

        let derived_public_key = identity.public_key_hex();
        if config.public_key != derived_public_key {
            return Err(ConfigError::IdentityMismatch {
                field: "public key",
                derived: derived_public_key,
                stored: config.public_key,
            });
        }
        let derived_fingerprint = identity.fingerprint_hex();
        if config.fingerprint != derived_fingerprint {
            return Err(ConfigError::IdentityMismatch {
                field: "fingerprint",
                derived: derived_fingerprint,
                stored: config.fingerprint,
            });
        }

        if config.registry_root.is_zero() {
            debug!("Registry root missing from config, using default");
            config.registry_root = DEFAULT_REGISTRY_ROOT;
        }

        // The accounting subsystem gets the key freshly on every load; it is
        // never read back from disk.
        config.swap.set_key(key);

        info!("Loaded node config from: {}", confpath.display());
        Ok(config)
    }

    /// Serializes the document into its `config.json`, replacing the previous
    /// content in one rename so a reader never sees a half-written file.
    pub fn save(&self) -> Result<(), ConfigError> {
        ensure_dir(&self.path)?;

        let confpath = self.path.join(CONFIG_FILE);
        let data = serde_json::to_vec_pretty(self).map_err(|e| ConfigError::Persist {
            path: confpath.clone(),
            source: io::Error::from(e),
        })?;

        let tmppath = self.path.join(format!("{}.tmp", CONFIG_FILE));
        fs::write(&tmppath, &data).map_err(|source| ConfigError::Persist {
            path: tmppath.clone(),
            source,
        })?;
        fs::rename(&tmppath, &confpath).map_err(|source| ConfigError::Persist {
            path: confpath,
            source,
        })
    }
}

/// Per-identity node directory under `base_path`.
pub fn node_dir(base_path: &Path, fingerprint_hex: &str) -> PathBuf {
    base_path.join(format!("{}{}", NODE_DIR_PREFIX, fingerprint_hex))
}

/// Conventional base path used when the embedder does not supply one.
pub fn default_base_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("storenet")
        .join("p2p-store")
}

fn default_config(
    base_path: &Path,
    dirpath: &Path,
    identity: &NodeIdentity,
    contract: Address,
    network_id: u64,
    rpc_port: u16,
    ipc_path: &str,
) -> Config {
    Config {
        store: StoreParams::new_default(dirpath),
        chunker: ChunkerParams::default(),
        hive: HiveParams::new_default(dirpath),
        swap: SwapParams::new_default(contract, identity.beneficiary()),
        sync: SyncParams::new_default(dirpath),
        path: dirpath.to_path_buf(),
        port: DEFAULT_PORT,
        public_key: identity.public_key_hex(),
        fingerprint: identity.fingerprint_hex(),
        registry_root: DEFAULT_REGISTRY_ROOT,
        network_id,
        rpc_port,
        ipc_path: ipc_path.to_string(),
        delivery_path: delivery_path(base_path),
    }
}

fn delivery_path(base_path: &Path) -> PathBuf {
    PathBuf::from(
        base_path
            .to_string_lossy()
            .replace(DELIVERY_SEGMENT, DELIVERY_SIBLING),
    )
}

fn ensure_dir(path: &Path) -> Result<(), ConfigError> {
    fs::create_dir_all(path).map_err(|source| ConfigError::DirectoryCreation {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads the raw document. `Ok(None)` is reserved for a missing file so the
/// caller can choose creation over failure; every other I/O problem is an
/// error.
fn read_config_bytes(path: &Path) -> Result<Option<Vec<u8>>, ConfigError> {
    match fs::read(path) {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}
