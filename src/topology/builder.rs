//! Randomized construction of a connected simple graph from a degree sequence.
//!
//! Edge candidates are drawn from their own random source, separate from the one feeding
//! the degree and capacity distributions. In production that source is a `ChaCha20Rng`.

use rand::Rng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use super::{DegreeSequence, Graph, TopologyError};
use crate::types::NodeId;
use crate::utils::logging;

/// Random source used for edge-candidate selection
pub type EdgeRng = ChaCha20Rng;

/// How a candidate's own target degree is treated while wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreeRule {
    /// Candidates that already reached their target are dropped from the pool.
    /// A completed attempt matches the degree sequence exactly, but late nodes can
    /// run out of candidates, so large sampled sequences may need many attempts.
    Exact,
    /// Candidates are accepted regardless of their own target, so nodes may end up
    /// above their target. The pool can never run dry under this rule.
    #[default]
    AtLeast,
}

/// Counters describing how a graph was obtained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
    /// Attempts made, including the successful one
    pub attempts: usize,
    /// Attempts aborted because a candidate pool ran dry
    pub stalled: usize,
    /// Attempts that completed but produced a disconnected graph
    pub disconnected: usize,
}

/// Result of a single construction pass
#[derive(Debug)]
enum Attempt {
    Built(Graph),
    Stalled { node: NodeId, achieved: usize, target: usize },
    Disconnected { reached: usize },
}

pub struct ConnectedGraphBuilder {
    rule: DegreeRule,
    max_attempts: usize,
}

impl ConnectedGraphBuilder {
    pub fn new(rule: DegreeRule, max_attempts: usize) -> Self {
        Self {
            rule,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn rule(&self) -> DegreeRule {
        self.rule
    }

    /// Builds a connected graph for `degrees`, retrying from scratch on stalls and disconnected results.
    pub fn build<R: Rng + ?Sized>(&self, degrees: &DegreeSequence, rng: &mut R) -> Result<Graph, TopologyError> {
        self.build_with_stats(degrees, rng).map(|(graph, _)| graph)
    }

    /// Same as `build`, also reporting how many attempts were needed.
    pub fn build_with_stats<R: Rng + ?Sized>(
        &self,
        degrees: &DegreeSequence,
        rng: &mut R,
    ) -> Result<(Graph, BuildStats), TopologyError> {
        let mut stats = BuildStats::default();

        while stats.attempts < self.max_attempts {
            stats.attempts += 1;
            match self.attempt(degrees, rng) {
                Attempt::Built(graph) => {
                    logging::log("TOPOLOGY", &format!(
                        "Built connected graph with {} nodes and {} edges after {} attempt(s) ({} stalled, {} disconnected)",
                        graph.node_count(), graph.edge_count(), stats.attempts, stats.stalled, stats.disconnected
                    ));
                    return Ok((graph, stats));
                }
                Attempt::Stalled { node, achieved, target } => {
                    stats.stalled += 1;
                    logging::log("TOPOLOGY", &format!(
                        "Attempt {} stalled at node {} ({} of {} neighbors)",
                        stats.attempts, node, achieved, target
                    ));
                }
                Attempt::Disconnected { reached } => {
                    stats.disconnected += 1;
                    logging::log("TOPOLOGY", &format!(
                        "Attempt {} disconnected, {} of {} nodes reachable from node 0",
                        stats.attempts, reached, degrees.len()
                    ));
                }
            }
        }

        if stats.disconnected == 0 {
            Err(TopologyError::ConstructionStalled { attempts: stats.attempts })
        } else {
            Err(TopologyError::Disconnected {
                attempts: stats.attempts,
                stalled: stats.stalled,
                disconnected: stats.disconnected,
            })
        }
    }

    /// One full wiring pass over the nodes in increasing id order.
    fn attempt<R: Rng + ?Sized>(&self, degrees: &DegreeSequence, rng: &mut R) -> Attempt {
        let n = degrees.len();
        let mut graph = Graph::new(n);

        for node in 0..n {
            let target = degrees.get(node);
            // rejected candidates leave the pool for the rest of this node's turn
            let mut pool: Vec<NodeId> = (0..n).collect();

            while graph.degree(node) < target {
                if pool.is_empty() {
                    return Attempt::Stalled { node, achieved: graph.degree(node), target };
                }
                let index = rng.gen_range(0..pool.len());
                let candidate = pool[index];

                let saturated = self.rule == DegreeRule::Exact && graph.degree(candidate) >= degrees.get(candidate);
                if candidate == node || graph.has_edge(node, candidate) || saturated {
                    pool.swap_remove(index);
                    continue;
                }
                graph.add_edge(node, candidate);
            }
        }

        let reached = graph.reachable_from(0);
        if reached == n {
            Attempt::Built(graph)
        } else {
            Attempt::Disconnected { reached }
        }
    }
}
