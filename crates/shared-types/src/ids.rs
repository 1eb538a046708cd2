//! 32-byte chain identifiers.
//!
//! Both identifier types are SHA3-256 digests. Their JSON form is a quoted
//! lowercase hex string of exactly 64 characters, and target/work arithmetic
//! treats them as big-endian 256-bit unsigned integers.

use std::fmt;
use std::str::FromStr;

use primitive_types::U256;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CodecError;

fn decode_hex32(s: &str) -> Result<[u8; 32], CodecError> {
    if s.len() != 64 {
        return Err(CodecError::InvalidLength {
            expected: 32,
            actual: s.len() / 2,
        });
    }
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(s, &mut bytes).map_err(|err| CodecError::InvalidHex(err.to_string()))?;
    Ok(bytes)
}

macro_rules! hash_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(pub [u8; 32]);

        impl $name {
            /// Raw digest bytes.
            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            /// Big-endian 256-bit unsigned view, used for target comparisons.
            pub fn to_u256(&self) -> U256 {
                U256::from_big_endian(&self.0)
            }

            /// Builds the identifier back from its 256-bit view.
            pub fn from_u256(value: U256) -> Self {
                let mut bytes = [0u8; 32];
                value.to_big_endian(&mut bytes);
                Self(bytes)
            }
        }

        impl From<[u8; 32]> for $name {
            fn from(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(self, f)
            }
        }

        impl FromStr for $name {
            type Err = CodecError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                decode_hex32(s).map(Self)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&hex::encode(self.0))
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                decode_hex32(&s).map(Self).map_err(de::Error::custom)
            }
        }
    };
}

hash_id! {
    /// A plot's unique identifier: the SHA3-256 digest of its header's
    /// canonical JSON. Also the representation of targets and cumulative
    /// thread work.
    PlotId
}

hash_id! {
    /// An interaction's unique identifier: the SHA3-256 digest of its
    /// canonical JSON with the signature cleared.
    InteractionId
}
