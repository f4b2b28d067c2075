//! Power-law degree sequences.
//!
//! Degrees are drawn from a continuous power law with `xmin = 1`, whose density falls off
//! as `x^-alpha`. That is a Pareto distribution with scale 1 and shape `alpha - 1`.

use rand::Rng;
use rand_distr::{Distribution, Pareto};
use serde::{Deserialize, Serialize};

use super::TopologyError;
use crate::types::NodeId;
use crate::utils::logging;

// ------------------------------------------------------------------------------------------------
// Degree Sequence
// ------------------------------------------------------------------------------------------------

/// Target degree of every participant, indexed by node id.
///
/// Every entry lies in `[1, n-1]` where `n` is the sequence length, and `n >= 2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeSequence(Vec<usize>);

impl DegreeSequence {
    /// Wraps a degree vector after checking the range invariant.
    pub fn new(degrees: Vec<usize>) -> Result<Self, TopologyError> {
        let participants = degrees.len();
        if participants < 2 {
            return Err(TopologyError::TooFewParticipants(participants));
        }
        if let Some((node, &degree)) = degrees
            .iter()
            .enumerate()
            .find(|(_, &d)| d == 0 || d >= participants)
        {
            return Err(TopologyError::InvalidDegree { node, degree, participants });
        }
        Ok(Self(degrees))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Target degree of `node`
    pub fn get(&self, node: NodeId) -> usize {
        self.0[node]
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn sum(&self) -> usize {
        self.0.iter().sum()
    }

    /// Erdős–Gallai test: whether some simple graph has exactly these degrees.
    pub fn is_graphical(&self) -> bool {
        if self.sum() % 2 != 0 {
            return false;
        }
        let mut sorted = self.0.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));

        let mut prefix = 0usize;
        for k in 1..=sorted.len() {
            prefix += sorted[k - 1];
            let tail: usize = sorted[k..].iter().map(|&d| d.min(k)).sum();
            if prefix > k * (k - 1) + tail {
                return false;
            }
        }
        true
    }

    /// Whether a simple connected graph realizes the sequence exactly.
    ///
    /// With every degree at least 1, a graphical sequence has a connected realization
    /// iff it carries at least `n - 1` edges.
    pub fn admits_connected_graph(&self) -> bool {
        self.sum() >= 2 * (self.len() - 1) && self.is_graphical()
    }

    /// Histogram of degrees as `(degree, node count)` pairs in ascending degree order
    pub fn histogram(&self) -> Vec<(usize, usize)> {
        let mut counts = std::collections::BTreeMap::new();
        for &d in &self.0 {
            *counts.entry(d).or_insert(0usize) += 1;
        }
        counts.into_iter().collect()
    }
}

// ------------------------------------------------------------------------------------------------
// Sampler
// ------------------------------------------------------------------------------------------------

/// Draws whole degree sequences from a power law, rejecting draws that fall outside `[1, n-1]`.
pub struct DegreeSequenceSampler {
    pareto: Pareto<f64>,
    participants: usize,
    alpha: f64,
    max_attempts: usize,
    require_connected_realization: bool,
}

impl DegreeSequenceSampler {
    /// Creates a sampler for `participants` nodes and power-law exponent `alpha`.
    ///
    /// `alpha` must be greater than 1 for the density to be normalisable.
    pub fn new(participants: usize, alpha: f64, max_attempts: usize) -> Result<Self, TopologyError> {
        if participants < 2 {
            return Err(TopologyError::TooFewParticipants(participants));
        }
        if !alpha.is_finite() || alpha <= 1.0 {
            return Err(TopologyError::InvalidAlpha(alpha));
        }
        let pareto = Pareto::new(1.0, alpha - 1.0).map_err(|_| TopologyError::InvalidAlpha(alpha))?;
        Ok(Self {
            pareto,
            participants,
            alpha,
            max_attempts: max_attempts.max(1),
            require_connected_realization: false,
        })
    }

    /// Additionally reject draws that no connected simple graph realizes exactly
    /// (odd degree sum, fewer than `n - 1` edges, or failing Erdős–Gallai).
    ///
    /// Needed when the graph has to match the sequence exactly.
    pub fn require_connected_realization(mut self, require: bool) -> Self {
        self.require_connected_realization = require;
        self
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Draws until a whole sequence is valid, at most `max_attempts` times.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<DegreeSequence, TopologyError> {
        for attempt in 1..=self.max_attempts {
            let draw: Vec<usize> = (0..self.participants)
                .map(|_| self.pareto.sample(rng).round())
                .map(|value| if value >= self.participants as f64 { self.participants } else { value as usize })
                .collect();

            // a single out-of-range value invalidates the whole draw
            let Ok(sequence) = DegreeSequence::new(draw) else {
                continue;
            };
            if self.require_connected_realization && !sequence.admits_connected_graph() {
                continue;
            }

            logging::log("TOPOLOGY", &format!(
                "Sampled degree sequence for {} participants (alpha={}) after {} draw(s), degree sum {}",
                self.participants, self.alpha, attempt, sequence.sum()
            ));
            return Ok(sequence);
        }

        Err(TopologyError::SamplingExhausted {
            attempts: self.max_attempts,
            participants: self.participants,
            alpha: self.alpha,
        })
    }
}
