use ed25519_dalek::SigningKey;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::identity::Address;

/// Parameters owned by the incentive/accounting (swap) subsystem.
///
/// The secret key is bound per session through [`SwapParams::set_key`] and is
/// never part of the persisted document.
#[derive(Clone, Serialize, Deserialize)]
pub struct SwapParams {
    pub contract: Address,    // payment contract settled against
    pub beneficiary: Address, // address credited for chunks this node serves
    pub auto_cash_interval_secs: u64,
    pub payment_threshold: u64,    // accumulated debt at which a peer is asked to pay
    pub disconnect_threshold: u64, // accumulated debt at which a peer is dropped
    #[serde(skip)]
    secret_key: Option<SigningKey>,
}

impl SwapParams {
    pub fn new_default(contract: Address, beneficiary: Address) -> Self {
        Self {
            contract,
            beneficiary,
            auto_cash_interval_secs: 300,
            payment_threshold: 4_096,
            disconnect_threshold: 10_000,
            secret_key: None,
        }
    }

    /// Binds the node's secret key for this session; injected freshly on
    /// every config load, never read back from disk.
    pub fn set_key(&mut self, key: &SigningKey) {
        self.secret_key = Some(key.clone());
    }

    pub fn key(&self) -> Option<&SigningKey> {
        self.secret_key.as_ref()
    }
}

impl fmt::Debug for SwapParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwapParams")
            .field("contract", &self.contract)
            .field("beneficiary", &self.beneficiary)
            .field("auto_cash_interval_secs", &self.auto_cash_interval_secs)
            .field("payment_threshold", &self.payment_threshold)
            .field("disconnect_threshold", &self.disconnect_threshold)
            .field(
                "secret_key",
                &self.secret_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
