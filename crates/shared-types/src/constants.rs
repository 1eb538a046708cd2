//! Protocol-level constants.

/// Name of this version of the plotthread peer protocol.
pub const PROTOCOL: &str = "plotthread.1";

/// The series increments roughly once a week to allow pruning history.
pub const PLOTS_UNTIL_NEW_SERIES: i64 = 1008;

/// Hard cap on the number of interactions in a single plot.
pub const MAX_INTERACTIONS_PER_PLOT: usize = 10_000;

/// Maximum memo length in characters.
pub const MAX_MEMO_LENGTH: usize = 100;

/// Largest safely representable integer for peers: 2^53 - 1.
///
/// Header nonces must stay below this so that every peer implementation,
/// regardless of its native number width, can manipulate them.
pub const MAX_NUMBER: i64 = (1 << 53) - 1;
