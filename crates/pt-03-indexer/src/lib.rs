//! # Indexer (pt-03)
//!
//! Maintains a weighted directed multigraph of interaction flow between
//! public keys and periodically computes a PageRank-style representivity
//! ranking over it.
//!
//! ## How it runs
//!
//! A single worker task owns all graph writes:
//!
//! 1. Wait until the initial plot download finishes (polling the ledger).
//! 2. Walk the main branch upward from the configured genesis plot, linking
//!    every interaction `from → to` with weight +1. A missing next height
//!    means we're caught up.
//! 3. Rank the graph.
//! 4. Consume tip-change events: weight +1 on connect, −1 on disconnect,
//!    re-ranking when a batch reports no more changes coming.
//!
//! Rankings and the DOT projection stay readable from other tasks through
//! the shared graph handle; the worker is the only writer.
//!
//! ## Module Structure
//!
//! - `domain/` — the graph and the ranking iteration
//! - `ports/outbound` — plot store, ledger and tip-change traits
//! - `service` — the worker, its configuration and its handle

pub mod domain;
pub mod ports;
pub mod service;

mod errors;

pub use domain::Graph;
pub use errors::IndexerError;
pub use ports::outbound::{BranchType, LedgerIndex, PlotStore, TipChange, TipChangeSource};
pub use service::{Indexer, IndexerConfig, IndexerHandle};
