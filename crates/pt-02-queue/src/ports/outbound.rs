//! Outbound dependencies of the interaction queue.

use shared_types::PublicKey;

use crate::domain::QueueError;

/// Confirmed-imbalance lookup from the ledger.
///
/// Implementations must be internally synchronized; the queue calls this
/// while holding its own lock.
pub trait LedgerReader: Send + Sync {
    /// Returns the confirmed imbalance for a public key. Keys never seen on
    /// the thread have an imbalance of zero.
    fn imbalance(&self, pub_key: &PublicKey) -> Result<u64, QueueError>;
}

/// In-memory ledger stub for tests.
#[cfg(test)]
pub struct MockLedger {
    imbalances: std::collections::HashMap<PublicKey, u64>,
    fail: bool,
}

#[cfg(test)]
impl MockLedger {
    pub fn new() -> Self {
        Self {
            imbalances: std::collections::HashMap::new(),
            fail: false,
        }
    }

    pub fn with_imbalance(mut self, pub_key: PublicKey, imbalance: u64) -> Self {
        self.imbalances.insert(pub_key, imbalance);
        self
    }

    pub fn failing() -> Self {
        Self {
            imbalances: std::collections::HashMap::new(),
            fail: true,
        }
    }
}

#[cfg(test)]
impl LedgerReader for MockLedger {
    fn imbalance(&self, pub_key: &PublicKey) -> Result<u64, QueueError> {
        if self.fail {
            return Err(QueueError::Ledger("mock ledger offline".to_string()));
        }
        Ok(self.imbalances.get(pub_key).copied().unwrap_or(0))
    }
}
