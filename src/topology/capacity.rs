use std::collections::BTreeMap;

use rand::Rng;
use rand_distr::{Distribution, Exp1};

use super::{Graph, TopologyError};
use crate::types::{Capacity, Edge};
use crate::utils::logging;

/// Capacity of every channel in a graph, keyed by canonical edge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapacityMap(BTreeMap<Edge, Capacity>);

impl CapacityMap {
    pub fn get(&self, edge: &Edge) -> Option<Capacity> {
        self.0.get(edge).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Channels in ascending edge order
    pub fn iter(&self) -> impl Iterator<Item = (&Edge, &Capacity)> {
        self.0.iter()
    }

    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Number of channels that rounded down to zero capacity
    pub fn zero_capacity_count(&self) -> usize {
        self.0.values().filter(|&&c| c == 0).count()
    }
}

impl FromIterator<(Edge, Capacity)> for CapacityMap {
    fn from_iter<I: IntoIterator<Item = (Edge, Capacity)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Draws channel capacities from an exponential distribution with the configured mean.
///
/// Capacities are `round(e * scale)` for a unit exponential variate `e`, so zero is a
/// possible (and kept) outcome.
pub struct CapacityAssigner {
    scale: f64,
}

impl CapacityAssigner {
    pub fn new(scale: f64) -> Result<Self, TopologyError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(TopologyError::InvalidCapacityScale(scale));
        }
        Ok(Self { scale })
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Assigns one capacity per edge, visiting edges in ascending canonical order.
    pub fn assign<R: Rng + ?Sized>(&self, graph: &Graph, rng: &mut R) -> CapacityMap {
        let capacities: CapacityMap = graph
            .edges()
            .map(|edge| {
                let draw: f64 = Exp1.sample(rng);
                (edge, (draw * self.scale).round() as Capacity)
            })
            .collect();

        logging::log("TOPOLOGY", &format!(
            "Assigned capacities to {} channels (mean scale {}, total {}, {} at zero)",
            capacities.len(), self.scale, capacities.total(), capacities.zero_capacity_count()
        ));
        capacities
    }
}
