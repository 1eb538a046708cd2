//! Weighted directed multigraph of interaction flow between public keys.

use std::collections::HashMap;
use std::fmt::Write as _;

use shared_types::PublicKey;

struct Node {
    label: String,
    ranking: f64,
    outbound: f64,
}

/// Interaction-flow graph keyed by base64 public-key labels.
///
/// Nodes get dense `u32` indices assigned on first sight; the indices are
/// stable only within a process lifetime, so anything persisted must re-key
/// by label. Edge weights may go negative while a reorg unwinds plots; they
/// are never clamped.
#[derive(Default)]
pub struct Graph {
    index: HashMap<String, u32>,
    nodes: Vec<Node>,
    edges: HashMap<u32, HashMap<u32, f64>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes seen so far.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Creates a weighted edge between a source-target pair, creating the
    /// nodes as needed. If the edge already exists the weight accumulates.
    pub fn link(&mut self, source: &str, target: &str, weight: f64) {
        let source = self.node_index(source);
        let target = self.node_index(target);

        self.nodes[source as usize].outbound += weight;
        *self
            .edges
            .entry(source)
            .or_default()
            .entry(target)
            .or_insert(0.0) += weight;
    }

    fn node_index(&mut self, label: &str) -> u32 {
        if let Some(index) = self.index.get(label) {
            return *index;
        }
        let index = self.nodes.len() as u32;
        self.index.insert(label.to_string(), index);
        self.nodes.push(Node {
            label: label.to_string(),
            ranking: 0.0,
            outbound: 0.0,
        });
        index
    }

    /// Computes the representivity rank of every node by power iteration.
    ///
    /// `alpha` is the damping factor and `epsilon` the convergence bound.
    /// Mass arriving at nodes with no outbound weight (the `leak`) is
    /// redistributed uniformly each round; with `alpha == 1` that
    /// redistribution is the only thing keeping the iteration well-defined,
    /// so the formula must stay exactly as written.
    pub fn rank(&mut self, alpha: f64, epsilon: f64) {
        if self.nodes.is_empty() {
            return;
        }
        let inverse = 1.0 / self.nodes.len() as f64;

        // normalize outgoing edge weights to sum to 1 per source
        let mut normalized: HashMap<u32, HashMap<u32, f64>> = HashMap::new();
        for (&source, targets) in &self.edges {
            let outbound = self.nodes[source as usize].outbound;
            if outbound > 0.0 {
                normalized.insert(
                    source,
                    targets
                        .iter()
                        .map(|(&target, &weight)| (target, weight / outbound))
                        .collect(),
                );
            }
        }

        for node in &mut self.nodes {
            node.ranking = inverse;
        }

        let mut delta = 1.0;
        while delta > epsilon {
            let snapshot: Vec<f64> = self.nodes.iter().map(|node| node.ranking).collect();

            let mut leak = 0.0;
            for (index, node) in self.nodes.iter_mut().enumerate() {
                if node.outbound == 0.0 {
                    leak += snapshot[index];
                }
                node.ranking = 0.0;
            }
            leak *= alpha;

            for source in 0..self.nodes.len() {
                if let Some(targets) = normalized.get(&(source as u32)) {
                    for (&target, &weight) in targets {
                        self.nodes[target as usize].ranking +=
                            alpha * snapshot[source] * weight;
                    }
                }
                self.nodes[source].ranking += (1.0 - alpha) * inverse + leak * inverse;
            }

            delta = self
                .nodes
                .iter()
                .enumerate()
                .map(|(index, node)| (node.ranking - snapshot[index]).abs())
                .sum();
        }
    }

    /// Rankings for the given labels, or every node when none are given.
    pub fn rankings(&self, labels: &[String]) -> HashMap<String, f64> {
        if labels.is_empty() {
            return self
                .index
                .iter()
                .map(|(label, &index)| (label.clone(), self.nodes[index as usize].ranking))
                .collect();
        }
        labels
            .iter()
            .filter_map(|label| {
                let index = self.index.get(label)?;
                Some((label.clone(), self.nodes[*index as usize].ranking))
            })
            .collect()
    }

    /// Graphviz rendering of the one-hop neighbourhood around `pub_key`,
    /// falling back to the zero key when the key is unknown.
    ///
    /// Cosmetic export only; nothing downstream parses it.
    pub fn to_dot(&self, pub_key: &str) -> String {
        let mut included: Vec<u32> = Vec::new();

        let centre = self
            .index
            .get(pub_key)
            .or_else(|| self.index.get(PublicKey::ZERO_BASE64))
            .copied();
        if let Some(centre) = centre {
            included.push(centre);
        }

        let mut out = String::from("digraph G {\n");
        if let Some(centre) = centre {
            for (&from, targets) in &self.edges {
                for (&to, &weight) in targets {
                    if from == centre || to == centre {
                        let _ = writeln!(
                            out,
                            "  \"{from}\" -> \"{to}\" [weight=\"{weight:.0}\"];"
                        );
                        included.push(if from == centre { to } else { from });
                    }
                }
            }
        }

        for index in &included {
            let node = &self.nodes[*index as usize];
            let _ = writeln!(
                out,
                "  \"{index}\" [label=\"{}\", ranking=\"{:.6}\"];",
                node.label, node.ranking
            );
        }

        out.push_str("}\n");
        out
    }

    /// Clears all graph data.
    pub fn reset(&mut self) {
        self.index.clear();
        self.nodes.clear();
        self.edges.clear();
    }
}
