//! Power-law payment channel topologies.
//!
//! The pipeline runs in three stages, each with its own component:
//! 1. `DegreeSequenceSampler` draws a target degree per node,
//! 2. `ConnectedGraphBuilder` wires a connected simple graph matching those targets,
//! 3. `CapacityAssigner` draws a capacity for every edge.
//!
//! `Topology::generate` runs all three in order.

use rand::Rng;
use thiserror::Error;

pub mod builder;
pub mod capacity;
pub mod degree;
pub mod graph;

pub use builder::{BuildStats, ConnectedGraphBuilder, DegreeRule, EdgeRng};
pub use capacity::{CapacityAssigner, CapacityMap};
pub use degree::{DegreeSequence, DegreeSequenceSampler};
pub use graph::Graph;

use crate::types::constants;

#[cfg(test)]
mod tests;

#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("At least 2 participants are required, got {0}")]
    TooFewParticipants(usize),
    #[error("Power-law exponent must be a finite value greater than 1, got {0}")]
    InvalidAlpha(f64),
    #[error("Capacity scale must be a finite positive value, got {0}")]
    InvalidCapacityScale(f64),
    #[error("Degree {degree} of node {node} is outside [1, {}]", .participants - 1)]
    InvalidDegree { node: usize, degree: usize, participants: usize },
    #[error("No valid degree sequence for {participants} participants (alpha={alpha}) after {attempts} draws")]
    SamplingExhausted { attempts: usize, participants: usize, alpha: f64 },
    #[error("Graph construction stalled on all {attempts} attempts")]
    ConstructionStalled { attempts: usize },
    #[error("No connected graph after {attempts} attempts ({stalled} stalled, {disconnected} disconnected)")]
    Disconnected { attempts: usize, stalled: usize, disconnected: usize },
}

/// Knobs of the topology pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct TopologyParams {
    pub participants: usize,
    pub alpha: f64,
    pub capacity_scale: f64,
    pub degree_rule: DegreeRule,
    pub max_sampling_attempts: usize,
    pub max_construction_attempts: usize,
}

impl Default for TopologyParams {
    fn default() -> Self {
        Self {
            participants: constants::PARTICIPANTS,
            alpha: constants::ALPHA,
            capacity_scale: constants::CAPACITY_SCALE,
            degree_rule: DegreeRule::default(),
            max_sampling_attempts: constants::MAX_SAMPLING_ATTEMPTS,
            max_construction_attempts: constants::MAX_CONSTRUCTION_ATTEMPTS,
        }
    }
}

/// A finished network: target degrees, the connected graph built from them and the
/// capacity of every channel. Immutable once generated.
#[derive(Debug, Clone)]
pub struct Topology {
    pub degrees: DegreeSequence,
    pub graph: Graph,
    pub capacities: CapacityMap,
    pub build_stats: BuildStats,
}

impl Topology {
    /// Samples a degree sequence, builds a connected graph for it and assigns capacities.
    ///
    /// `distribution_rng` feeds the degree and capacity draws, `edge_rng` the candidate
    /// selection during construction.
    pub fn generate<D, E>(
        params: &TopologyParams,
        distribution_rng: &mut D,
        edge_rng: &mut E,
    ) -> Result<Self, TopologyError>
    where
        D: Rng + ?Sized,
        E: Rng + ?Sized,
    {
        // validate every stage before drawing anything
        let sampler = DegreeSequenceSampler::new(params.participants, params.alpha, params.max_sampling_attempts)?
            .require_connected_realization(params.degree_rule == DegreeRule::Exact);
        let builder = ConnectedGraphBuilder::new(params.degree_rule, params.max_construction_attempts);
        let assigner = CapacityAssigner::new(params.capacity_scale)?;

        let degrees = sampler.sample(distribution_rng)?;
        let (graph, build_stats) = builder.build_with_stats(&degrees, edge_rng)?;
        let capacities = assigner.assign(&graph, distribution_rng);

        Ok(Self { degrees, graph, capacities, build_stats })
    }

    /// Builds on a given degree sequence, skipping the sampling stage.
    pub fn from_degrees<D, E>(
        degrees: DegreeSequence,
        degree_rule: DegreeRule,
        max_construction_attempts: usize,
        capacity_scale: f64,
        distribution_rng: &mut D,
        edge_rng: &mut E,
    ) -> Result<Self, TopologyError>
    where
        D: Rng + ?Sized,
        E: Rng + ?Sized,
    {
        let assigner = CapacityAssigner::new(capacity_scale)?;
        let (graph, build_stats) = ConnectedGraphBuilder::new(degree_rule, max_construction_attempts)
            .build_with_stats(&degrees, edge_rng)?;
        let capacities = assigner.assign(&graph, distribution_rng);
        Ok(Self { degrees, graph, capacities, build_stats })
    }

    pub fn participants(&self) -> usize {
        self.graph.node_count()
    }

    pub fn channel_count(&self) -> usize {
        self.capacities.len()
    }
}
