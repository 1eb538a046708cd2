//! Queue domain: the in-memory FIFO and the imbalance overlay.

mod errors;
mod imbalance;
mod pool;

pub use errors::QueueError;
pub use imbalance::ImbalanceCache;
pub use pool::MemoryInteractionQueue;
