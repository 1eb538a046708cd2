//! The in-memory FIFO queue of unconfirmed interactions.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use parking_lot::RwLock;
use pt_01_chain::Interaction;
use shared_types::{InteractionId, SignatureBytes};
use tracing::debug;

use crate::domain::{ImbalanceCache, QueueError};
use crate::ports::inbound::InteractionQueue;
use crate::ports::outbound::LedgerReader;

/// In-memory FIFO implementation of [`InteractionQueue`].
///
/// A single read-write lock guards all state: arrival order, the O(1)
/// membership index, and the imbalance overlay the queued sequence has been
/// applied to.
pub struct MemoryInteractionQueue<L> {
    inner: RwLock<QueueInner<L>>,
}

struct QueueInner<L> {
    order: VecDeque<InteractionId>,
    by_id: HashMap<InteractionId, Interaction>,
    imbalances: ImbalanceCache<L>,
}

impl<L: LedgerReader> MemoryInteractionQueue<L> {
    pub fn new(ledger: Arc<L>) -> Self {
        Self {
            inner: RwLock::new(QueueInner {
                order: VecDeque::new(),
                by_id: HashMap::new(),
                imbalances: ImbalanceCache::new(ledger),
            }),
        }
    }
}

impl<L: LedgerReader> InteractionQueue for MemoryInteractionQueue<L> {
    fn add(&self, id: InteractionId, tx: Interaction) -> Result<bool, QueueError> {
        let mut inner = self.inner.write();
        if inner.by_id.contains_key(&id) {
            return Ok(false);
        }

        if !inner.imbalances.apply(&tx)? {
            debug!(%id, sender = %tx.from, "rejecting interaction: insufficient imbalance");
            return Err(QueueError::InsufficientImbalance {
                id,
                sender: tx.from.to_base64(),
            });
        }

        inner.order.push_back(id);
        inner.by_id.insert(id, tx);
        Ok(true)
    }

    fn add_batch(
        &self,
        ids: &[InteractionId],
        txs: Vec<Interaction>,
        _height: i64,
    ) -> Result<(), QueueError> {
        let mut guard = self.inner.write();
        let inner = &mut *guard;

        // add to the front in reverse order: formerly confirmed interactions
        // get the highest priority for the next plot
        for (id, tx) in ids.iter().copied().zip(txs).rev() {
            if inner.by_id.contains_key(&id) {
                if let Some(pos) = inner.order.iter().position(|queued| *queued == id) {
                    inner.order.remove(pos);
                }
            }
            inner.order.push_front(id);
            inner.by_id.insert(id, tx);
        }

        // nothing is invalidated here: if we're disconnecting plots we're
        // going to be connecting some shortly
        Ok(())
    }

    fn remove_batch(
        &self,
        ids: &[InteractionId],
        height: i64,
        more: bool,
    ) -> Result<(), QueueError> {
        let mut guard = self.inner.write();
        {
            let QueueInner { order, by_id, .. } = &mut *guard;
            for id in ids {
                by_id.remove(id);
            }
            order.retain(|id| by_id.contains_key(id));
        }

        if more {
            // defer revalidation until the batch's final connect
            return Ok(());
        }
        guard.reprocess(height)
    }

    fn get(&self, limit: usize) -> Vec<Interaction> {
        let inner = self.inner.read();
        let take = if limit == 0 { inner.order.len() } else { limit };
        inner
            .order
            .iter()
            .take(take)
            .filter_map(|id| inner.by_id.get(id).cloned())
            .collect()
    }

    fn exists(&self, id: &InteractionId) -> bool {
        self.inner.read().by_id.contains_key(id)
    }

    fn exists_signed(&self, id: &InteractionId, signature: &SignatureBytes) -> bool {
        self.inner
            .read()
            .by_id
            .get(id)
            .is_some_and(|tx| tx.signature.as_ref() == Some(signature))
    }

    fn len(&self) -> usize {
        self.inner.read().order.len()
    }
}

impl<L: LedgerReader> QueueInner<L> {
    /// Rebuilds the imbalance overlay and drops interactions now in
    /// violation, preserving the order of the survivors. `height` is the
    /// current thread height; entries are checked for inclusion in the
    /// *next* plot.
    fn reprocess(&mut self, height: i64) -> Result<(), QueueError> {
        self.imbalances.reset();
        let next_height = height + 1;

        let order: Vec<InteractionId> = self.order.drain(..).collect();
        for id in order {
            let Some(tx) = self.by_id.get(&id) else {
                continue;
            };

            if !tx.series_valid_at(next_height)
                || !tx.is_mature(next_height)
                || tx.is_expired(next_height)
            {
                debug!(%id, height = next_height, "dropping invalidated interaction");
                self.by_id.remove(&id);
                continue;
            }

            if !self.imbalances.apply(tx)? {
                debug!(%id, "dropping interaction: insufficient imbalance after reorg");
                self.by_id.remove(&id);
                continue;
            }

            self.order.push_back(id);
        }
        Ok(())
    }
}
