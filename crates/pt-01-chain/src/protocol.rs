//! Message shapes for the `plotthread.1` peer protocol.
//!
//! Every peer message is framed as `{"type": <string>, "body": <object>}`,
//! with the body omitted for the empty request types. Response messages carry
//! failures in an optional `error` string field; a malformed frame is the
//! only thing that should ever drop a connection.

use serde::{Deserialize, Serialize};
use shared_types::{InteractionId, PlotId, PublicKey};

use crate::interaction::Interaction;
use crate::plot::{Plot, PlotHeader};

fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// A message frame for all messages in the `plotthread.1` protocol.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "body", rename_all = "snake_case")]
pub enum Message {
    /// Communicates plots available for download.
    InvPlot(InvPlotMessage),
    /// Requests a plot for download.
    GetPlot(GetPlotMessage),
    /// Requests a plot for download by height.
    GetPlotByHeight(GetPlotByHeightMessage),
    /// Sends a peer a complete plot.
    Plot(PlotMessage),
    /// Requests a plot header.
    GetPlotHeader(GetPlotHeaderMessage),
    /// Requests a plot header by height.
    GetPlotHeaderByHeight(GetPlotHeaderByHeightMessage),
    /// Sends a peer a plot's header.
    PlotHeader(PlotHeaderMessage),
    /// Finds a common ancestor with a peer.
    FindCommonAncestor(FindCommonAncestorMessage),
    /// Requests the interaction graph around a public key.
    GetGraph(GetGraphMessage),
    /// Returns a public key's neighbourhood of the interaction graph.
    Graph(GraphMessage),
    /// Requests a public key's representivity ranking.
    GetRank(GetRankMessage),
    /// Returns a public key's representivity ranking.
    Rank(RankMessage),
    /// Requests a public key's imbalance.
    GetImbalance(GetImbalanceMessage),
    /// Returns a public key's imbalance.
    Imbalance(ImbalanceMessage),
    /// Requests a set of public key imbalances.
    GetImbalances(GetImbalancesMessage),
    /// Returns a set of public key imbalances.
    Imbalances(ImbalancesMessage),
    /// Requests a confirmed interaction.
    GetInteraction(GetInteractionMessage),
    /// Sends a peer a confirmed interaction.
    Interaction(InteractionMessage),
    /// Requests the header of the tip plot.
    GetTipHeader,
    /// Sends a peer the header of the tip plot.
    TipHeader(TipHeaderMessage),
    /// Pushes a newly processed unconfirmed interaction to a peer.
    PushInteraction(PushInteractionMessage),
    /// Response to a pushed interaction.
    PushInteractionResult(PushInteractionResultMessage),
    /// Requests that the peer load an interaction interest filter.
    FilterLoad(FilterLoadMessage),
    /// Requests the addition of public keys to the current filter.
    FilterAdd(FilterAddMessage),
    /// Indicates whether a filter request was successful.
    FilterResult(FilterResultMessage),
    /// A pared-down plot relevant to the peer's filter.
    FilterPlot(FilterPlotMessage),
    /// Requests the unconfirmed interactions relevant to the peer's filter.
    GetFilterInteractionQueue,
    /// A pared-down view of the unconfirmed interaction queue.
    FilterInteractionQueue(FilterInteractionQueueMessage),
    /// Requests interactions for a public key over a height range.
    GetPublicKeyInteractions(GetPublicKeyInteractionsMessage),
    /// Returns interactions relevant to a public key over a height range.
    PublicKeyInteractions(PublicKeyInteractionsMessage),
    /// Requests potential peer addresses.
    GetPeerAddresses,
    /// Communicates a list of potential peer addresses.
    PeerAddresses(PeerAddressesMessage),
    /// Used by a scribing peer to request work.
    GetWork(GetWorkMessage),
    /// Sends work to perform to a scribing peer.
    Work(WorkMessage),
    /// Submits a potential solution.
    SubmitWork(SubmitWorkMessage),
    /// Informs a scribing peer of the result of its work.
    SubmitWorkResult(SubmitWorkResultMessage),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InvPlotMessage {
    pub plot_ids: Vec<PlotId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GetPlotMessage {
    pub plot_id: PlotId,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GetPlotByHeightMessage {
    pub height: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlotMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot_id: Option<PlotId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<Plot>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GetPlotHeaderMessage {
    pub plot_id: PlotId,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GetPlotHeaderByHeightMessage {
    pub height: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlotHeaderMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot_id: Option<PlotId>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "header")]
    pub plot_header: Option<PlotHeader>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FindCommonAncestorMessage {
    pub plot_ids: Vec<PlotId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GetGraphMessage {
    pub public_key: PublicKey,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphMessage {
    pub plot_id: PlotId,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub height: i64,
    pub public_key: PublicKey,
    /// Graphviz DOT rendering of the one-hop neighbourhood.
    pub graph: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GetRankMessage {
    pub public_key: PublicKey,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankMessage {
    pub plot_id: PlotId,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub height: i64,
    pub public_key: PublicKey,
    pub rank: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GetImbalanceMessage {
    pub public_key: PublicKey,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImbalanceMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot_id: Option<PlotId>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub height: i64,
    pub public_key: PublicKey,
    pub imbalance: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GetImbalancesMessage {
    pub public_keys: Vec<PublicKey>,
}

/// An entry in [`ImbalancesMessage`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PublicKeyImbalance {
    pub public_key: PublicKey,
    pub imbalance: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImbalancesMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot_id: Option<PlotId>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub height: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imbalances: Vec<PublicKeyImbalance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GetInteractionMessage {
    pub interaction_id: InteractionId,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InteractionMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot_id: Option<PlotId>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub height: i64,
    pub interaction_id: InteractionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction: Option<Interaction>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TipHeaderMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot_id: Option<PlotId>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "header")]
    pub plot_header: Option<PlotHeader>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub time_seen: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PushInteractionMessage {
    pub interaction: Interaction,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PushInteractionResultMessage {
    pub interaction_id: InteractionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterLoadMessage {
    /// Filter algorithm identifier.
    #[serde(rename = "type")]
    pub filter_type: String,
    #[serde(with = "shared_types::encoding::base64_bytes")]
    pub filter: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterAddMessage {
    pub public_keys: Vec<PublicKey>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterResultMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterPlotMessage {
    pub plot_id: PlotId,
    pub header: PlotHeader,
    pub interactions: Vec<Interaction>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterInteractionQueueMessage {
    pub interactions: Vec<Interaction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GetPublicKeyInteractionsMessage {
    pub public_key: PublicKey,
    pub start_height: i64,
    pub start_index: i32,
    pub end_height: i64,
    pub limit: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PublicKeyInteractionsMessage {
    pub public_key: PublicKey,
    pub start_height: i64,
    pub stop_height: i64,
    pub stop_index: i32,
    pub filter_plots: Vec<FilterPlotMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeerAddressesMessage {
    pub addresses: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GetWorkMessage {
    pub public_keys: Vec<PublicKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// Work to perform for a scribing peer.
///
/// The peer may manipulate the header's timestamp and nonce, but must keep
/// the timestamp at or above `min_time` and the nonce below `MAX_NUMBER`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkMessage {
    pub work_id: i32,
    pub header: Option<PlotHeader>,
    pub min_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmitWorkMessage {
    pub work_id: i32,
    pub header: Option<PlotHeader>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmitWorkResultMessage {
    pub work_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
