//! # Shared Types
//!
//! Primitive types shared by every plotthread subsystem:
//!
//! - `PlotId` / `InteractionId`: 32-byte SHA3-256 identifiers with a
//!   lowercase-hex JSON form and a 256-bit big-endian integer view used for
//!   proof-of-work target comparisons.
//! - `PublicKey`: raw Ed25519 public key bytes with a standard-base64 JSON
//!   form. The all-zero key is the distinguished plotroot sender.
//! - `SignatureBytes`: a detached 64-byte Ed25519 signature.
//! - Protocol constants.
//!
//! The JSON forms here are identity-bearing: plot and interaction ids are
//! SHA3-256 digests over serialized bytes, so these types control their own
//! `Serialize`/`Deserialize` impls byte for byte rather than deriving them.

pub mod constants;
pub mod encoding;

mod errors;
mod ids;
mod keys;

pub use errors::CodecError;
pub use ids::{InteractionId, PlotId};
pub use keys::{PublicKey, SignatureBytes};

// Re-export the big-integer types used across all subsystems.
pub use primitive_types::{U256, U512};
