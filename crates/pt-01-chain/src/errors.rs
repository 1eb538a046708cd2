//! Chain data model errors.

use shared_types::constants::{MAX_INTERACTIONS_PER_PLOT, MAX_MEMO_LENGTH};
use thiserror::Error;

/// Errors raised by the chain data model.
#[derive(Debug, Error)]
pub enum ChainError {
    /// An interaction list exceeded the per-plot hard cap.
    #[error("interaction list size {0} exceeds the {MAX_INTERACTIONS_PER_PLOT} per-plot limit")]
    TooManyInteractions(usize),

    /// A plot's interaction list is missing the leading plotroot.
    #[error("plot has no plotroot interaction")]
    MissingPlotroot,

    /// A memo exceeded the character limit.
    #[error("memo length {0} exceeds {MAX_MEMO_LENGTH} characters")]
    MemoTooLong(usize),

    /// The sender bytes do not decode to a usable verification key.
    #[error("invalid sender public key")]
    InvalidPublicKey,

    /// Canonical JSON encoding failed. Unreachable for in-memory values.
    #[error("canonical encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}
