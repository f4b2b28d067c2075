mod builder;

use crate::topology::Graph;

/// Checks symmetry and the absence of self-loops on every adjacency set
pub(crate) fn assert_simple(graph: &Graph) {
    for node in 0..graph.node_count() {
        assert!(!graph.has_edge(node, node), "node {} has a self-loop", node);
        for &neighbor in graph.neighbors(node) {
            assert!(graph.has_edge(neighbor, node), "edge {}-{} is not symmetric", node, neighbor);
        }
    }
}
