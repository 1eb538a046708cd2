//! The ledger interaction record.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use shared_types::constants::{MAX_MEMO_LENGTH, PLOTS_UNTIL_NEW_SERIES};
use shared_types::{InteractionId, PublicKey, SignatureBytes};

use crate::errors::ChainError;

fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// An interaction transfers value from one public key to another.
///
/// Field declaration order is canonical: the id is the SHA3-256 digest of the
/// serialized record with the signature cleared, so the signature can never
/// be a source of id malleability.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Creation time, unix seconds.
    pub time: i64,
    /// Collision prevention. Pseudorandom, not used for crypto.
    pub nonce: i32,
    pub from: PublicKey,
    pub to: PublicKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// Plot height before which this interaction cannot be scribed. 0 = unset.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub matures: i64,
    /// Plot height after which this interaction cannot be scribed. 0 = unset.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub expires: i64,
    /// Coarse epoch tag, advancing roughly weekly to allow pruning history.
    pub series: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<SignatureBytes>,
}

impl Interaction {
    /// Returns a new unsigned interaction for the given scribe-time height.
    pub fn new(
        from: PublicKey,
        to: PublicKey,
        matures: i64,
        expires: i64,
        height: i64,
        memo: Option<String>,
    ) -> Self {
        Self {
            time: unix_now(),
            nonce: rand::thread_rng().gen_range(0..i32::MAX),
            memo,
            matures,
            expires,
            series: series_for_height(from.is_plotroot_sender(), height),
            from,
            to,
            signature: None,
        }
    }

    /// Computes the interaction's id: the signature is never part of it.
    pub fn id(&self) -> Result<InteractionId, ChainError> {
        let mut unsigned = self.clone();
        unsigned.signature = None;
        let bytes = serde_json::to_vec(&unsigned)?;
        Ok(InteractionId(Sha3_256::digest(&bytes).into()))
    }

    /// Signs the interaction's id with the given key.
    pub fn sign(&mut self, key: &SigningKey) -> Result<(), ChainError> {
        let id = self.id()?;
        self.signature = Some(SignatureBytes(key.sign(id.as_bytes()).to_bytes()));
        Ok(())
    }

    /// Verifies only that the interaction is properly signed.
    pub fn verify(&self) -> Result<bool, ChainError> {
        let Some(signature) = &self.signature else {
            return Ok(false);
        };
        let id = self.id()?;
        let key = VerifyingKey::from_bytes(self.from.as_bytes())
            .map_err(|_| ChainError::InvalidPublicKey)?;
        let signature = Signature::from_bytes(signature.as_bytes());
        Ok(key.verify(id.as_bytes(), &signature).is_ok())
    }

    /// True for the first, self-generated reward interaction of a plot.
    pub fn is_plotroot(&self) -> bool {
        self.from.is_plotroot_sender()
    }

    /// True if the interaction is relevant to the given public key.
    pub fn contains(&self, pub_key: &PublicKey) -> bool {
        if !self.is_plotroot() && self.from == *pub_key {
            return true;
        }
        self.to == *pub_key
    }

    /// True if the interaction can be scribed at the given height.
    pub fn is_mature(&self, height: i64) -> bool {
        if self.matures == 0 {
            return true;
        }
        self.matures >= height
    }

    /// True if the interaction can no longer be scribed at the given height.
    pub fn is_expired(&self, height: i64) -> bool {
        if self.expires == 0 {
            return false;
        }
        self.expires < height
    }

    /// True if the series matches what a new interaction of this category
    /// would carry at the given height.
    pub fn series_valid_at(&self, height: i64) -> bool {
        self.series == series_for_height(self.is_plotroot(), height)
    }

    /// Checks the structural limits a relayed interaction must satisfy.
    pub fn validate(&self) -> Result<(), ChainError> {
        if let Some(memo) = &self.memo {
            let chars = memo.chars().count();
            if chars > MAX_MEMO_LENGTH {
                return Err(ChainError::MemoTooLong(chars));
            }
        }
        Ok(())
    }
}

/// The series to use for a new interaction at the given height.
///
/// Plotroots start using the new series right on time. Everything else waits
/// 100 plots past the switchover to mitigate reorg churn around the boundary.
pub fn series_for_height(is_plotroot: bool, height: i64) -> i64 {
    if is_plotroot {
        return height / PLOTS_UNTIL_NEW_SERIES + 1;
    }
    (height - 100) / PLOTS_UNTIL_NEW_SERIES + 1
}

pub(crate) fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
