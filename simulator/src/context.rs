//! Explicit simulation context.
//!
//! Holds both random sources and the ledger handle, so no component reaches for
//! process-wide state and tests can inject seeds or scripted sources.

use paynet::ledger::Ledger;
use paynet::topology::{EdgeRng, Topology, TopologyError, TopologyParams};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::config::SeedConfig;

pub struct SimulationContext<L: Ledger> {
    /// Degree draws, capacities and transfer endpoints
    pub distribution_rng: Box<dyn RngCore + Send>,
    /// Neighbor selection during graph construction
    pub edge_rng: Box<dyn RngCore + Send>,
    pub ledger: L,
}

impl<L: Ledger> SimulationContext<L> {
    /// Unseeded context: both sources are initialised from OS entropy
    pub fn new(ledger: L) -> Self {
        Self::from_seeds(ledger, &SeedConfig::default())
    }

    /// Seeds each source that has a seed configured, the others come from OS entropy
    pub fn from_seeds(ledger: L, seeds: &SeedConfig) -> Self {
        let distribution_rng: Box<dyn RngCore + Send> = match seeds.distribution_seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(StdRng::from_entropy()),
        };
        let edge_rng: Box<dyn RngCore + Send> = match seeds.edge_seed {
            Some(seed) => Box::new(EdgeRng::seed_from_u64(seed)),
            None => Box::new(EdgeRng::from_entropy()),
        };
        Self { distribution_rng, edge_rng, ledger }
    }

    /// Uses the given sources as they are
    pub fn with_sources(
        ledger: L,
        distribution_rng: Box<dyn RngCore + Send>,
        edge_rng: Box<dyn RngCore + Send>,
    ) -> Self {
        Self { distribution_rng, edge_rng, ledger }
    }

    /// Runs the topology pipeline with this context's random sources
    pub fn generate_topology(&mut self, params: &TopologyParams) -> Result<Topology, TopologyError> {
        Topology::generate(params, self.distribution_rng.as_mut(), self.edge_rng.as_mut())
    }

    pub fn into_ledger(self) -> L {
        self.ledger
    }
}
