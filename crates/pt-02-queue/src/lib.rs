//! # Interaction Queue (pt-02)
//!
//! Queues unconfirmed interactions until a scriber confirms them into a plot.
//!
//! ## Invariants
//!
//! - FIFO with O(1) membership: an interaction is queued at most once, and
//!   `get` hands interactions to the scriber in arrival order.
//! - Imbalance-consistent: a queued sequence of interactions always applies
//!   cleanly on top of the ledger's confirmed imbalances, tracked through a
//!   copy-on-read overlay.
//! - Reorg-safe: disconnecting plots re-queues their interactions at the
//!   *front* so formerly confirmed interactions retake priority, and
//!   revalidation is deferred until the final connect of a batch
//!   (`more == false`).
//!
//! ## Module Structure
//!
//! - `domain/` — the in-memory queue and the imbalance overlay
//! - `ports/inbound` — the queue interface the rest of the node consumes
//! - `ports/outbound` — the ledger lookup the queue depends on

pub mod domain;
pub mod ports;

pub use domain::{ImbalanceCache, MemoryInteractionQueue, QueueError};
pub use ports::inbound::InteractionQueue;
pub use ports::outbound::LedgerReader;
