//! # Chain Data Model (pt-01)
//!
//! The canonical plotthread data model and everything whose bytes feed a
//! SHA3-256 identity:
//!
//! - [`Interaction`]: the signed value-transfer record, its id derivation,
//!   signing/verification and maturity/expiry/series rules.
//! - [`Plot`] / [`PlotHeader`]: plot identity, the two-level hash-list root
//!   with the distinguished plotroot entry, cumulative thread work and tip
//!   comparison.
//! - [`PlotHeaderHasher`]: a differential JSON buffer that recomputes header
//!   ids under rapid nonce/time mutation without re-serializing.
//! - The genesis plot literal and the `plotthread.1` peer message shapes.
//!
//! ## Identity-bearing JSON
//!
//! Ids are SHA3-256 digests over canonical JSON. Canonical means: struct
//! declaration order, minimal decimal integers, lowercase 64-char hex for
//! ids, padded standard base64 for keys and signatures, and optional fields
//! omitted when zero-valued. Everything in this crate serializes through
//! `serde_json` over structs declared in canonical order; do not reorder
//! fields or ids change.

mod errors;
mod genesis;
mod header_hasher;
mod interaction;
mod plot;

pub mod protocol;

pub use errors::ChainError;
pub use genesis::{genesis_plot, GENESIS_PLOT_JSON};
pub use header_hasher::PlotHeaderHasher;
pub use interaction::{series_for_height, Interaction};
pub use plot::{plot_work, thread_work, Plot, PlotHeader};
