//! Shared test doubles.

use std::collections::HashMap;

use parking_lot::Mutex;
use pt_02_queue::{LedgerReader, QueueError};
use shared_types::PublicKey;

/// Mutable in-memory ledger of confirmed imbalances.
#[derive(Default)]
pub struct MemoryLedger {
    imbalances: Mutex<HashMap<PublicKey, u64>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_imbalance(&self, pub_key: PublicKey, imbalance: u64) {
        self.imbalances.lock().insert(pub_key, imbalance);
    }
}

impl LedgerReader for MemoryLedger {
    fn imbalance(&self, pub_key: &PublicKey) -> Result<u64, QueueError> {
        Ok(self.imbalances.lock().get(pub_key).copied().unwrap_or(0))
    }
}
