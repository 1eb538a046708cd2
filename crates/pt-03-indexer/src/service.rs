//! The indexer worker and its handle.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use pt_01_chain::Plot;
use shared_types::{PlotId, PublicKey};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::domain::Graph;
use crate::ports::outbound::{BranchType, LedgerIndex, PlotStore, TipChange, TipChangeSource};

/// Indexer configuration.
#[derive(Clone, Debug)]
pub struct IndexerConfig {
    /// Where the main-branch walk starts.
    pub genesis_plot_id: PlotId,
    /// How often to re-check whether the initial download has finished.
    pub poll_interval: Duration,
}

impl IndexerConfig {
    pub fn new(genesis_plot_id: PlotId) -> Self {
        Self {
            genesis_plot_id,
            poll_interval: Duration::from_secs(30),
        }
    }
}

/// Builds the interaction graph from the main branch and keeps it current
/// across tip changes.
pub struct Indexer<S, L, P> {
    config: IndexerConfig,
    plot_store: Arc<S>,
    ledger: Arc<L>,
    processor: Arc<P>,
    graph: Arc<RwLock<Graph>>,
    latest: Arc<RwLock<(PlotId, i64)>>,
}

impl<S, L, P> Indexer<S, L, P>
where
    S: PlotStore + 'static,
    L: LedgerIndex + 'static,
    P: TipChangeSource + 'static,
{
    pub fn new(
        config: IndexerConfig,
        plot_store: Arc<S>,
        ledger: Arc<L>,
        processor: Arc<P>,
    ) -> Self {
        let genesis = config.genesis_plot_id;
        Self {
            config,
            plot_store,
            ledger,
            processor,
            graph: Arc::new(RwLock::new(Graph::new())),
            latest: Arc::new(RwLock::new((genesis, 0))),
        }
    }

    /// Spawns the worker task and returns the handle used to query the graph
    /// and to shut the worker down.
    pub fn start(self) -> IndexerHandle {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let graph = Arc::clone(&self.graph);
        let latest = Arc::clone(&self.latest);
        let worker = tokio::spawn(self.run(shutdown_rx));
        IndexerHandle {
            graph,
            latest,
            shutdown: shutdown_tx,
            worker,
        }
    }

    async fn run(self, mut shutdown: oneshot::Receiver<()>) {
        // indexing during the initial download would only slow the sync down
        loop {
            match self.ledger.is_initial_plot_download().await {
                Ok(false) => break,
                Ok(true) => info!("indexer waiting for plot thread sync"),
                Err(err) => {
                    error!(error = %err, "initial download check failed");
                    return;
                }
            }
            tokio::select! {
                _ = &mut shutdown => {
                    info!("indexer shutting down");
                    return;
                }
                _ = tokio::time::sleep(self.config.poll_interval) => {}
            }
        }

        let start_id = self.latest.read().0;
        let start_header = match self.plot_store.plot_header(&start_id).await {
            Ok(Some((header, _stored_at))) => header,
            Ok(None) => {
                warn!(plot_id = %start_id, "starting plot not stored");
                return;
            }
            Err(err) => {
                error!(error = %err, "failed to load the starting header");
                return;
            }
        };
        match self.ledger.branch_type(&start_id).await {
            Ok(BranchType::Main) => {}
            Ok(branch) => {
                warn!(plot_id = %start_id, ?branch, "starting plot is not on the main branch");
                return;
            }
            Err(err) => {
                error!(error = %err, "branch lookup failed");
                return;
            }
        }

        // walk the main branch upward; a missing height means caught up
        let mut height = start_header.height;
        loop {
            let next_id = match self.ledger.plot_id_for_height(height).await {
                Ok(next_id) => next_id,
                Err(err) => {
                    error!(error = %err, height, "height lookup failed");
                    return;
                }
            };
            let Some(next_id) = next_id else {
                break;
            };

            let plot = match self.plot_store.plot(&next_id).await {
                Ok(Some(plot)) => plot,
                Ok(None) => {
                    warn!(plot_id = %next_id, "no plot stored for an indexed height");
                    return;
                }
                Err(err) => {
                    error!(error = %err, plot_id = %next_id, "plot load failed");
                    return;
                }
            };

            self.index_interactions(&plot, next_id, true);
            height += 1;
        }

        {
            let latest = self.latest.read();
            info!(plot_id = %latest.0, height = latest.1, "finished indexing");
        }
        self.rank_graph();

        let (tip_tx, mut tip_rx) = mpsc::channel::<TipChange>(1);
        self.processor.register_for_tip_change(tip_tx.clone());

        loop {
            tokio::select! {
                tip = tip_rx.recv() => {
                    let Some(tip) = tip else { break };
                    info!(
                        plot_id = %tip.plot_id,
                        height = tip.plot.header.height,
                        connect = tip.connect,
                        "indexer received notice of a new tip plot"
                    );
                    self.index_interactions(&tip.plot, tip.plot_id, tip.connect);
                    if !tip.more {
                        self.rank_graph();
                    }
                }
                _ = &mut shutdown => {
                    info!("indexer shutting down");
                    break;
                }
            }
        }

        self.processor.unregister_for_tip_change(&tip_tx);
    }

    fn index_interactions(&self, plot: &Plot, id: PlotId, connect: bool) {
        *self.latest.write() = (id, plot.header.height);

        let weight = if connect { 1.0 } else { -1.0 };
        let mut graph = self.graph.write();
        for tx in &plot.interactions {
            graph.link(&tx.from.to_base64(), &tx.to.to_base64(), weight);
        }
    }

    fn rank_graph(&self) {
        let height = self.latest.read().1;
        info!(height, "indexer commencing ranking");
        // no restart probability; the dangling-mass redistribution keeps the
        // iteration well-defined
        self.graph.write().rank(1.0, 1e-6);
        info!("ranking finished");
    }
}

/// Handle to a running indexer.
pub struct IndexerHandle {
    graph: Arc<RwLock<Graph>>,
    latest: Arc<RwLock<(PlotId, i64)>>,
    shutdown: oneshot::Sender<()>,
    worker: JoinHandle<()>,
}

impl IndexerHandle {
    /// Rankings for the given public keys; all nodes when none are given.
    pub fn rankings(&self, pub_keys: &[PublicKey]) -> HashMap<String, f64> {
        let labels: Vec<String> = pub_keys.iter().map(PublicKey::to_base64).collect();
        self.graph.read().rankings(&labels)
    }

    /// DOT projection of the one-hop neighbourhood around `pub_key`, or
    /// around the zero key when absent.
    pub fn to_dot(&self, pub_key: Option<&PublicKey>) -> String {
        let label = pub_key.map(PublicKey::to_base64);
        self.graph
            .read()
            .to_dot(label.as_deref().unwrap_or(PublicKey::ZERO_BASE64))
    }

    /// The most recently indexed plot.
    pub fn latest_plot_id(&self) -> PlotId {
        self.latest.read().0
    }

    /// The height of the most recently indexed plot.
    pub fn latest_height(&self) -> i64 {
        self.latest.read().1
    }

    /// Stops the worker and waits for it to exit.
    pub async fn shutdown(self) {
        // dropping the sender wakes every pending select on the receiver
        drop(self.shutdown);
        if let Err(err) = self.worker.await {
            error!(error = %err, "indexer worker failed");
        }
        info!("indexer shutdown");
    }
}
