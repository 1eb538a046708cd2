//! Indexer error types.

use thiserror::Error;

/// Errors surfaced by the indexer's outbound collaborators.
#[derive(Debug, Error)]
pub enum IndexerError {
    /// The plot store failed.
    #[error("plot store error: {0}")]
    Store(String),

    /// The ledger failed.
    #[error("ledger error: {0}")]
    Ledger(String),
}
