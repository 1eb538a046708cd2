//! Public key and signature byte types.
//!
//! Keys and signatures travel as standard base64 with padding. The types here
//! hold raw bytes only; curve-point validation happens at verification time,
//! which keeps the distinguished all-zero plotroot sender representable.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CodecError;

/// A raw 32-byte Ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PublicKey(pub [u8; 32]);

impl PublicKey {
    /// The distinguished sender of plotroot interactions: 32 zero bytes.
    pub const ZERO: PublicKey = PublicKey([0u8; 32]);

    /// Base64 text of the zero key, handy as a map/label key.
    pub const ZERO_BASE64: &'static str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=";

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// True when this key is the plotroot sender sentinel.
    pub fn is_plotroot_sender(&self) -> bool {
        *self == Self::ZERO
    }

    /// Standard base64 text form with padding.
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.0)
    }
}

impl From<[u8; 32]> for PublicKey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for PublicKey {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = BASE64
            .decode(s)
            .map_err(|err| CodecError::InvalidBase64(err.to_string()))?;
        let actual = bytes.len();
        bytes
            .try_into()
            .map(Self)
            .map_err(|_| CodecError::InvalidLength {
                expected: 32,
                actual,
            })
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// A detached 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SignatureBytes(pub [u8; 64]);

impl SignatureBytes {
    /// Raw signature bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Standard base64 text form with padding.
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.0)
    }
}

impl From<[u8; 64]> for SignatureBytes {
    fn from(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for SignatureBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl fmt::Debug for SignatureBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for SignatureBytes {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = BASE64
            .decode(s)
            .map_err(|err| CodecError::InvalidBase64(err.to_string()))?;
        let actual = bytes.len();
        bytes
            .try_into()
            .map(Self)
            .map_err(|_| CodecError::InvalidLength {
                expected: 64,
                actual,
            })
    }
}

impl Serialize for SignatureBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for SignatureBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_key_base64() {
        assert_eq!(PublicKey::ZERO.to_base64(), PublicKey::ZERO_BASE64);
        assert!(PublicKey::ZERO.is_plotroot_sender());
        assert!(!PublicKey([1u8; 32]).is_plotroot_sender());
    }

    #[test]
    fn test_public_key_json_round_trip() {
        let key = PublicKey([0xab; 32]);
        let json = serde_json::to_string(&key).unwrap();
        let back: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn test_public_key_rejects_wrong_length() {
        // 31 bytes of input
        let short = BASE64.encode([0u8; 31]);
        assert_eq!(
            short.parse::<PublicKey>(),
            Err(CodecError::InvalidLength {
                expected: 32,
                actual: 31
            })
        );
    }

    #[test]
    fn test_signature_round_trip() {
        let sig = SignatureBytes([0x5a; 64]);
        let json = serde_json::to_string(&sig).unwrap();
        let back: SignatureBytes = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sig);
    }

    #[test]
    fn test_signature_rejects_garbage() {
        assert!("not base64!!".parse::<SignatureBytes>().is_err());
    }
}
