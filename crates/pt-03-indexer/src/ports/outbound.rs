//! Traits the indexer consumes from the rest of the node.

use async_trait::async_trait;
use pt_01_chain::{Interaction, Plot, PlotHeader};
use shared_types::PlotId;
use tokio::sync::mpsc;

use crate::errors::IndexerError;

/// Where a plot sits relative to the current main branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchType {
    Main,
    Side,
    Orphan,
    Unknown,
}

/// A change to the main branch tip.
///
/// Within one reorg the processor delivers every disconnect before any
/// connect, and marks the final event with `more == false`. Consumers rely
/// on that ordering to defer expensive work to the end of the batch.
#[derive(Clone, Debug)]
pub struct TipChange {
    pub plot_id: PlotId,
    pub plot: Plot,
    /// True when the plot was connected, false when disconnected.
    pub connect: bool,
    /// True when more changes from the same batch are coming.
    pub more: bool,
}

/// Storage for plots and their interactions.
#[async_trait]
pub trait PlotStore: Send + Sync {
    /// Stores all of the plot's information.
    async fn store(&self, id: PlotId, plot: &Plot, now: i64) -> Result<(), IndexerError>;

    /// Returns the referenced plot.
    async fn plot(&self, id: &PlotId) -> Result<Option<Plot>, IndexerError>;

    /// Returns the referenced plot as raw serialized bytes.
    async fn plot_bytes(&self, id: &PlotId) -> Result<Option<Vec<u8>>, IndexerError>;

    /// Returns the referenced plot's header and the timestamp of when it
    /// was stored.
    async fn plot_header(&self, id: &PlotId) -> Result<Option<(PlotHeader, i64)>, IndexerError>;

    /// Returns an interaction within a plot along with the plot's header.
    async fn interaction(
        &self,
        id: &PlotId,
        index: usize,
    ) -> Result<Option<(Interaction, PlotHeader)>, IndexerError>;
}

/// Ledger lookups the indexer needs to walk the main branch.
#[async_trait]
pub trait LedgerIndex: Send + Sync {
    /// Classifies the plot against the current main branch.
    async fn branch_type(&self, id: &PlotId) -> Result<BranchType, IndexerError>;

    /// Returns the id of the main-branch plot at the given height, if any.
    async fn plot_id_for_height(&self, height: i64) -> Result<Option<PlotId>, IndexerError>;

    /// True while the node is still catching up with the network.
    async fn is_initial_plot_download(&self) -> Result<bool, IndexerError>;
}

/// Tip-change notifications from the processor.
///
/// The channel has capacity 1; the producer coalesces or drops on overflow.
pub trait TipChangeSource: Send + Sync {
    fn register_for_tip_change(&self, channel: mpsc::Sender<TipChange>);
    fn unregister_for_tip_change(&self, channel: &mpsc::Sender<TipChange>);
}
