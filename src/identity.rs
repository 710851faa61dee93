use ed25519_dalek::{SigningKey, VerifyingKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Byte length of a node address.
pub const ADDRESS_LEN: usize = 20;

/// Address derived from a public key, rendered as bare lowercase hex.
///
/// Used as the beneficiary of the accounting subsystem and for well-known
/// network endpoints such as the registry root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(#[serde(with = "hex::serde")] [u8; ADDRESS_LEN]);

impl Address {
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// First `ADDRESS_LEN` bytes of the SHA-256 digest of the public key.
    pub fn from_public_key(public_key: &VerifyingKey) -> Self {
        let digest = Sha256::digest(public_key.as_bytes());
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&digest[..ADDRESS_LEN]);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LEN]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Values a node derives from its private key: the public key encoding, its
/// fingerprint, and the default beneficiary address. All three are pure
/// functions of the key, so the same key always yields the same identity.
#[derive(Debug, Clone)]
pub struct NodeIdentity {
    public_key: VerifyingKey,
    fingerprint: [u8; 32],
    beneficiary: Address,
}

impl NodeIdentity {
    pub fn derive(key: &SigningKey) -> Self {
        let public_key = key.verifying_key();
        let fingerprint: [u8; 32] = Sha256::digest(public_key.as_bytes()).into();
        let beneficiary = Address::from_public_key(&public_key);
        Self {
            public_key,
            fingerprint,
            beneficiary,
        }
    }

    /// Hex encoding of the 32-byte public key.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key.as_bytes())
    }

    /// Hex encoding of the SHA-256 fingerprint of the public key. Names the
    /// node directory and guards against loading another node's config.
    pub fn fingerprint_hex(&self) -> String {
        hex::encode(self.fingerprint)
    }

    pub fn beneficiary(&self) -> Address {
        self.beneficiary
    }
}
