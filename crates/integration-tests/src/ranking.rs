//! Interaction flow from plots into the graph and the ranking it yields.

use pt_01_chain::{genesis_plot, Interaction, Plot};
use pt_03_indexer::Graph;
use shared_types::{PlotId, PublicKey};

fn key(seed: u8) -> PublicKey {
    PublicKey([seed; 32])
}

fn link_plot(graph: &mut Graph, plot: &Plot, connect: bool) {
    let weight = if connect { 1.0 } else { -1.0 };
    for tx in &plot.interactions {
        graph.link(&tx.from.to_base64(), &tx.to.to_base64(), weight);
    }
}

/// Two keys paying each other back and forth settle at half the rank each.
#[test]
fn test_two_key_cycle_ranks_evenly() {
    let alice = key(0xaa);
    let bob = key(0xbb);

    let mut graph = Graph::new();
    graph.link(&alice.to_base64(), &bob.to_base64(), 1.0);
    graph.link(&bob.to_base64(), &alice.to_base64(), 1.0);
    graph.rank(1.0, 1e-6);

    let rankings = graph.rankings(&[]);
    assert!((rankings[&alice.to_base64()] - 0.5).abs() < 1e-4);
    assert!((rankings[&bob.to_base64()] - 0.5).abs() < 1e-4);
}

/// Linking real plots keeps total rank mass at one, and unwinding a plot
/// restores the previous ranking.
#[test]
fn test_plot_flow_conserves_rank_mass() {
    let genesis = genesis_plot().unwrap();
    let target: PlotId = "0fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
        .parse()
        .unwrap();

    let plot = Plot::new(
        genesis.id().unwrap(),
        1,
        target,
        genesis.header.thread_work,
        vec![
            Interaction::new(PublicKey::ZERO, key(0x42), 0, 0, 1, None),
            Interaction::new(key(0xaa), key(0xbb), 0, 0, 1, None),
            Interaction::new(key(0xbb), key(0xcc), 0, 0, 1, None),
        ],
    )
    .unwrap();

    let mut graph = Graph::new();
    link_plot(&mut graph, &genesis, true);
    link_plot(&mut graph, &plot, true);
    graph.rank(1.0, 1e-6);

    let connected: f64 = graph.rankings(&[]).values().sum();
    assert!((connected - 1.0).abs() < 1e-6);
    let cc_with_plot = graph.rankings(&[key(0xcc).to_base64()])[&key(0xcc).to_base64()];

    // the plot is disconnected during a reorg; its links unwind
    link_plot(&mut graph, &plot, false);
    graph.rank(1.0, 1e-6);

    let unwound: f64 = graph.rankings(&[]).values().sum();
    assert!((unwound - 1.0).abs() < 1e-6);
    let cc_without_plot = graph.rankings(&[key(0xcc).to_base64()])[&key(0xcc).to_base64()];
    assert!(cc_without_plot < cc_with_plot);
}
