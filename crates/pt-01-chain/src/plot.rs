//! Plots and plot headers.

use rand::Rng;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use shared_types::constants::{MAX_INTERACTIONS_PER_PLOT, MAX_NUMBER};
use shared_types::{InteractionId, PlotId, U256, U512};

use crate::errors::ChainError;
use crate::header_hasher::PlotHeaderHasher;
use crate::interaction::{unix_now, Interaction};

/// Data used to determine plot validity and its place in the plot thread.
///
/// Field declaration order is canonical; the plot id is the SHA3-256 digest
/// of this struct's serialized form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlotHeader {
    pub previous: PlotId,
    pub hash_list_root: InteractionId,
    pub time: i64,
    /// 256-bit threshold the plot id must not exceed.
    pub target: PlotId,
    /// Total cumulative thread work up to and including this plot.
    pub thread_work: PlotId,
    /// Scanning counter. Not used for crypto; kept below `MAX_NUMBER`.
    pub nonce: i64,
    pub height: i64,
    pub interaction_count: i32,
}

/// A plot in the plot thread: a header plus an ordered interaction list.
///
/// `interactions[0]` is the plotroot. As plots are connected their
/// interactions affect the underlying ledger.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Plot {
    pub header: PlotHeader,
    pub interactions: Vec<Interaction>,
    /// Running digest over the non-plotroot ids, kept while scribing so that
    /// appending an interaction updates the root in O(1). Rebuilt on demand
    /// for plots that arrived over the wire.
    #[serde(skip)]
    hasher: Option<Sha3_256>,
}

impl PartialEq for Plot {
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header && self.interactions == other.interactions
    }
}

impl Plot {
    /// Creates a new plot to be scribed on top of `previous`.
    pub fn new(
        previous: PlotId,
        height: i64,
        target: PlotId,
        prev_thread_work: PlotId,
        interactions: Vec<Interaction>,
    ) -> Result<Self, ChainError> {
        if interactions.len() > MAX_INTERACTIONS_PER_PLOT {
            return Err(ChainError::TooManyInteractions(interactions.len()));
        }

        let mut hasher = Sha3_256::new();
        let hash_list_root = compute_hash_list_root(&mut hasher, &interactions)?;

        Ok(Self {
            header: PlotHeader {
                previous,
                hash_list_root,
                time: unix_now(),
                target,
                thread_work: thread_work(&target, &prev_thread_work),
                nonce: rand::thread_rng().gen_range(0..MAX_NUMBER),
                height,
                interaction_count: interactions.len() as i32,
            },
            interactions,
            // saved to extend the root incrementally while scribing
            hasher: Some(hasher),
        })
    }

    /// Computes an id for the plot.
    pub fn id(&self) -> Result<PlotId, ChainError> {
        self.header.id()
    }

    /// Verifies the plot's proof-of-work satisfies the declared target.
    pub fn check_pow(&self, id: &PlotId) -> bool {
        id.to_u256() <= self.header.target.to_u256()
    }

    /// Appends an interaction while scribing.
    ///
    /// The running digest is extended with only the new id and the plotroot
    /// re-mixed on top, so the cost is independent of the list length.
    pub fn add_interaction(&mut self, id: InteractionId, tx: Interaction) -> Result<(), ChainError> {
        if self.interactions.is_empty() {
            return Err(ChainError::MissingPlotroot);
        }
        if self.hasher.is_none() {
            let mut rebuilt = Sha3_256::new();
            for prior in &self.interactions[1..] {
                rebuilt.update(prior.id()?.as_bytes());
            }
            self.hasher = Some(rebuilt);
        }
        if let Some(hasher) = self.hasher.as_mut() {
            hasher.update(id.as_bytes());
            self.header.hash_list_root = mix_in_plotroot(hasher, &self.interactions[0])?;
        }
        self.interactions.push(tx);
        self.header.interaction_count += 1;
        Ok(())
    }
}

/// Hash-list root of all interaction ids: `H(id(tx0) || H(id(tx1)..id(txN-1)))`.
///
/// The plotroot is mixed in last, on top of the running digest of everything
/// else, which is what makes mid-scribe appends cheap.
fn compute_hash_list_root(
    hasher: &mut Sha3_256,
    interactions: &[Interaction],
) -> Result<InteractionId, ChainError> {
    let (plotroot, rest) = interactions
        .split_first()
        .ok_or(ChainError::MissingPlotroot)?;
    for tx in rest {
        hasher.update(tx.id()?.as_bytes());
    }
    mix_in_plotroot(hasher, plotroot)
}

/// Finishes a root off the running non-plotroot digest without consuming it.
fn mix_in_plotroot(
    hasher: &Sha3_256,
    plotroot: &Interaction,
) -> Result<InteractionId, ChainError> {
    let rest_root = hasher.clone().finalize();
    let plotroot_id = plotroot.id()?;

    let mut mix = Sha3_256::new();
    mix.update(plotroot_id.as_bytes());
    mix.update(rest_root);
    Ok(InteractionId(mix.finalize().into()))
}

/// Expected work for a plot with the given target: `2^256 / (target + 1)`,
/// zero for a zero target.
pub fn plot_work(target: &PlotId) -> U256 {
    let target = target.to_u256();
    if target.is_zero() {
        return U256::zero();
    }
    let work = (U512::one() << 256) / (U512::from(target) + U512::one());
    // target >= 1 bounds the quotient to 2^255, so the high half is zero
    let mut bytes = [0u8; 64];
    work.to_big_endian(&mut bytes);
    U256::from_big_endian(&bytes[32..])
}

/// Cumulative thread work given a plot's target and the previous total.
/// Saturates at 256 bits.
pub fn thread_work(target: &PlotId, prev_thread_work: &PlotId) -> PlotId {
    let total = prev_thread_work
        .to_u256()
        .saturating_add(plot_work(target));
    PlotId::from_u256(total)
}

impl PlotHeader {
    /// Computes an id for the header.
    pub fn id(&self) -> Result<PlotId, ChainError> {
        let bytes = serde_json::to_vec(self)?;
        Ok(PlotId(Sha3_256::digest(&bytes).into()))
    }

    /// Computes the id as a 256-bit integer on the differential hot path.
    ///
    /// Returns the id value and the number of hash attempts it accounts for.
    pub fn id_fast(&self, hasher: &mut PlotHeaderHasher) -> (U256, u64) {
        hasher.update(self)
    }

    /// Strict "better thread than" order against another stored header.
    ///
    /// `this_when` / `their_when` are the local timestamps of when each
    /// header was stored. Most work wins; a tie goes to the header stored
    /// first; a remaining tie goes to the smaller id.
    pub fn is_better_than(
        &self,
        their_header: &PlotHeader,
        this_when: i64,
        their_when: i64,
    ) -> Result<bool, ChainError> {
        let this_work = self.thread_work.to_u256();
        let their_work = their_header.thread_work.to_u256();
        if this_work > their_work {
            return Ok(true);
        }
        if this_work < their_work {
            return Ok(false);
        }

        if this_when < their_when {
            return Ok(true);
        }
        if this_when > their_when {
            return Ok(false);
        }

        Ok(self.id()?.to_u256() < their_header.id()?.to_u256())
    }
}
