//! Outbound ports for the indexer.

pub mod outbound;
