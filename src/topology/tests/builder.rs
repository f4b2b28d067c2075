use rand::SeedableRng;

use super::assert_simple;
use crate::topology::{ConnectedGraphBuilder, DegreeRule, DegreeSequence, EdgeRng, Graph, TopologyError};

fn build(degrees: &[usize], rule: DegreeRule, seed: u64) -> Graph {
    let degrees = DegreeSequence::new(degrees.to_vec()).expect("valid degree sequence");
    let mut rng = EdgeRng::seed_from_u64(seed);
    ConnectedGraphBuilder::new(rule, 10_000)
        .build(&degrees, &mut rng)
        .expect("graph should be built")
}

#[test]
fn test_graph_add_edge() {
    let mut graph = Graph::new(3);
    assert!(graph.add_edge(0, 2));
    assert!(!graph.add_edge(2, 0), "duplicate edge must be refused");
    assert!(!graph.add_edge(1, 1), "self-loop must be refused");
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.degrees(), vec![1, 0, 1]);
    assert!(!graph.is_connected());

    assert!(graph.add_edge(1, 2));
    assert!(graph.is_connected());
    let edges: Vec<_> = graph.edges().map(|e| (e.a, e.b)).collect();
    assert_eq!(edges, vec![(0, 2), (1, 2)]);
}

/// A long path is traversed without recursion
#[test]
fn test_reachability_on_long_path() {
    let n = 200_000;
    let mut graph = Graph::new(n);
    for i in 0..n - 1 {
        graph.add_edge(i, i + 1);
    }
    assert_eq!(graph.reachable_from(0), n);
    assert!(graph.is_connected());
}

/// Scenario: n=5 with degrees [2,3,1,2,2] fed directly to the builder
#[test]
fn test_fixed_sequence_exact_degrees() {
    let targets = [2, 3, 1, 2, 2];
    for seed in 0..20 {
        let graph = build(&targets, DegreeRule::Exact, seed);
        assert_simple(&graph);
        assert!(graph.is_connected());
        assert_eq!(graph.degrees(), targets.to_vec(), "seed {}", seed);
        assert_eq!(graph.edge_count(), 5);
    }
}

#[test]
fn test_at_least_rule_never_undershoots() {
    let targets = [2, 3, 1, 2, 2];
    for seed in 0..20 {
        let graph = build(&targets, DegreeRule::AtLeast, seed);
        assert_simple(&graph);
        assert!(graph.is_connected());
        for (node, &target) in targets.iter().enumerate() {
            assert!(graph.degree(node) >= target, "node {} below target with seed {}", node, seed);
        }
    }
}

#[test]
fn test_larger_sequence_exact_degrees() {
    let targets: Vec<usize> = (0..30).map(|i| if i % 3 == 0 { 4 } else { 2 }).collect();
    let graph = build(&targets, DegreeRule::Exact, 7);
    assert_simple(&graph);
    assert!(graph.is_connected());
    assert_eq!(graph.degrees(), targets);
    assert_eq!(graph.edge_count(), targets.iter().sum::<usize>() / 2);
}

#[test]
fn test_same_seed_same_graph() {
    let targets = [3, 2, 2, 3, 1, 2, 1];
    assert_eq!(build(&targets, DegreeRule::Exact, 42), build(&targets, DegreeRule::Exact, 42));
}

/// Nodes 0..2 need every other node, but node 3 can only take one of them:
/// every attempt runs out of candidates
#[test]
fn test_unrealizable_sequence_stalls() {
    let degrees = DegreeSequence::new(vec![3, 3, 3, 1]).unwrap();
    let mut rng = EdgeRng::seed_from_u64(1);
    let result = ConnectedGraphBuilder::new(DegreeRule::Exact, 20).build_with_stats(&degrees, &mut rng);
    match result {
        Err(TopologyError::ConstructionStalled { attempts }) => assert_eq!(attempts, 20),
        other => panic!("expected ConstructionStalled, got {:?}", other),
    }
}

/// A perfect matching on four nodes always splits into two components
#[test]
fn test_disconnected_results_are_retried_then_reported() {
    let degrees = DegreeSequence::new(vec![1, 1, 1, 1]).unwrap();
    let mut rng = EdgeRng::seed_from_u64(3);
    let result = ConnectedGraphBuilder::new(DegreeRule::Exact, 5).build_with_stats(&degrees, &mut rng);
    match result {
        Err(TopologyError::Disconnected { attempts, stalled, disconnected }) => {
            assert_eq!(attempts, 5);
            assert_eq!(stalled, 0);
            assert_eq!(disconnected, 5);
        }
        other => panic!("expected Disconnected, got {:?}", other),
    }
}

#[test]
fn test_build_stats_count_attempts() {
    let degrees = DegreeSequence::new(vec![1, 1]).unwrap();
    let mut rng = EdgeRng::seed_from_u64(0);
    let (graph, stats) = ConnectedGraphBuilder::new(DegreeRule::Exact, 3)
        .build_with_stats(&degrees, &mut rng)
        .unwrap();
    assert!(graph.has_edge(0, 1));
    assert_eq!(stats.attempts, 1);
    assert_eq!(stats.stalled + stats.disconnected, 0);
}
