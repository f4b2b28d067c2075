use std::collections::BTreeSet;

use crate::types::{Edge, NodeId};

/// Simple undirected graph over the nodes `0..n`.
///
/// Adjacency sets are ordered so that edge enumeration, and with it everything drawn
/// per edge, is deterministic. Symmetry and the absence of self-loops are maintained
/// by `add_edge`; duplicate edges are impossible by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<BTreeSet<NodeId>>,
}

impl Graph {
    /// Creates a graph with `node_count` isolated nodes
    pub fn new(node_count: usize) -> Self {
        Self {
            adjacency: vec![BTreeSet::new(); node_count],
        }
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Achieved degree of `node`
    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency[node].len()
    }

    /// Achieved degree of every node, indexed by node id
    pub fn degrees(&self) -> Vec<usize> {
        self.adjacency.iter().map(BTreeSet::len).collect()
    }

    pub fn neighbors(&self, node: NodeId) -> &BTreeSet<NodeId> {
        &self.adjacency[node]
    }

    pub fn has_edge(&self, i: NodeId, j: NodeId) -> bool {
        self.adjacency[i].contains(&j)
    }

    /// Inserts the undirected edge `(i, j)` into both adjacency sets.
    ///
    /// Returns false, leaving the graph untouched, for a self-loop or an existing edge.
    pub fn add_edge(&mut self, i: NodeId, j: NodeId) -> bool {
        if i == j || self.has_edge(i, j) {
            return false;
        }
        self.adjacency[i].insert(j);
        self.adjacency[j].insert(i);
        true
    }

    /// Every edge exactly once, in ascending canonical order
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(i, neighbors)| {
            neighbors
                .range(i + 1..)
                .map(move |&j| Edge { a: i, b: j })
        })
    }

    /// Number of nodes reachable from `start`, found with an explicit-stack depth-first search
    pub fn reachable_from(&self, start: NodeId) -> usize {
        if start >= self.node_count() {
            return 0;
        }
        let mut visited = vec![false; self.node_count()];
        let mut stack = vec![start];
        visited[start] = true;
        let mut reached = 1;

        while let Some(node) = stack.pop() {
            for &neighbor in &self.adjacency[node] {
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    reached += 1;
                    stack.push(neighbor);
                }
            }
        }
        reached
    }

    /// Whether every node is reachable from node 0
    pub fn is_connected(&self) -> bool {
        self.node_count() == 0 || self.reachable_from(0) == self.node_count()
    }
}
