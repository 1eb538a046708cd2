//! Interaction queue error types.

use shared_types::InteractionId;
use thiserror::Error;

/// Errors raised by the interaction queue.
#[derive(Debug, Error)]
pub enum QueueError {
    /// The sender cannot fund the interaction on top of everything already
    /// queued ahead of it.
    #[error("interaction {id} sender {sender} has insufficient imbalance")]
    InsufficientImbalance {
        id: InteractionId,
        /// Base64 form of the sender public key.
        sender: String,
    },

    /// The ledger lookup backing the imbalance overlay failed.
    #[error("ledger lookup failed: {0}")]
    Ledger(String),
}
