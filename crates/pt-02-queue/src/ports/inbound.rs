//! The queue interface consumed by the rest of the node.

use pt_01_chain::Interaction;
use shared_types::{InteractionId, SignatureBytes};

use crate::domain::QueueError;

/// A queue of interactions waiting to be confirmed into a plot.
pub trait InteractionQueue: Send + Sync {
    /// Adds the interaction to the queue. Returns true if the interaction
    /// was added to the queue on this call.
    fn add(&self, id: InteractionId, tx: Interaction) -> Result<bool, QueueError>;

    /// Adds a batch of interactions to the queue (a plot has been
    /// disconnected). `height` is the plot thread height after the
    /// disconnection.
    fn add_batch(
        &self,
        ids: &[InteractionId],
        txs: Vec<Interaction>,
        height: i64,
    ) -> Result<(), QueueError>;

    /// Removes a batch of interactions from the queue (a plot has been
    /// connected). `height` is the plot thread height after the connection;
    /// `more` indicates more connections are coming.
    fn remove_batch(
        &self,
        ids: &[InteractionId],
        height: i64,
        more: bool,
    ) -> Result<(), QueueError>;

    /// Returns up to `limit` interactions in queue order for the scriber;
    /// 0 returns everything.
    fn get(&self, limit: usize) -> Vec<Interaction>;

    /// True if the given interaction is in the queue.
    fn exists(&self, id: &InteractionId) -> bool;

    /// True if the given interaction is in the queue with this exact
    /// signature.
    fn exists_signed(&self, id: &InteractionId, signature: &SignatureBytes) -> bool;

    /// The queue length.
    fn len(&self) -> usize;

    /// True when nothing is queued.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
