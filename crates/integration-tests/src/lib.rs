//! # Integration Tests
//!
//! Cross-subsystem scenarios that exercise several crates together:
//!
//! - `genesis_identity` — the genesis literal reproduces its known ids end
//!   to end (interaction id, hash-list root, plot id).
//! - `scribing` — pool → candidate plot → differential nonce scan →
//!   frozen solution, including a mid-scribe interaction append.
//! - `queue_reorg` — disconnect/connect batches against the queue with
//!   deferred revalidation.
//! - `ranking` — interaction flow from plots into the graph and the ranking
//!   that comes out of it.

pub mod support;

#[cfg(test)]
mod genesis_identity;
#[cfg(test)]
mod queue_reorg;
#[cfg(test)]
mod ranking;
#[cfg(test)]
mod scribing;
