//! Copy-on-read overlay over the ledger's confirmed imbalances.

use std::collections::HashMap;
use std::sync::Arc;

use pt_01_chain::Interaction;
use shared_types::PublicKey;

use crate::domain::QueueError;
use crate::ports::outbound::LedgerReader;

/// Tracks the imbalance effect of a tentative interaction sequence without
/// touching persistent state.
///
/// Each interaction moves exactly one unit of representivity from `from` to
/// `to`; plotroots are self-generated, so only their credit side applies.
/// Keys are read through to the ledger on first sight and overlaid after.
pub struct ImbalanceCache<L> {
    ledger: Arc<L>,
    cache: HashMap<PublicKey, u64>,
}

impl<L: LedgerReader> ImbalanceCache<L> {
    pub fn new(ledger: Arc<L>) -> Self {
        Self {
            ledger,
            cache: HashMap::new(),
        }
    }

    /// Applies the interaction to the overlay.
    ///
    /// Returns `Ok(false)` when the sender's imbalance cannot cover it; the
    /// overlay is left untouched in that case. A ledger lookup failure
    /// propagates as an error.
    pub fn apply(&mut self, tx: &Interaction) -> Result<bool, QueueError> {
        if !tx.is_plotroot() {
            let imbalance = self.lookup(&tx.from)?;
            if imbalance < 1 {
                return Ok(false);
            }
            self.cache.insert(tx.from, imbalance - 1);
        }

        let imbalance = self.lookup(&tx.to)?;
        self.cache.insert(tx.to, imbalance.saturating_add(1));
        Ok(true)
    }

    /// Empties the overlay; subsequent lookups read through again.
    pub fn reset(&mut self) {
        self.cache.clear();
    }

    fn lookup(&self, pub_key: &PublicKey) -> Result<u64, QueueError> {
        match self.cache.get(pub_key) {
            Some(imbalance) => Ok(*imbalance),
            None => self.ledger.imbalance(pub_key),
        }
    }
}
