use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a participant in `[0, n)`
pub type NodeId = usize;

/// Capacity of a payment channel, in transfer units
pub type Capacity = u64;

/// An undirected channel between two participants.
///
/// Always stored in canonical order, `a < b`, so that the same channel built from
/// either endpoint compares and hashes equal.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Edge {
    pub a: NodeId,
    pub b: NodeId,
}

impl Edge {
    /// Creates the canonical edge joining `i` and `j`.
    ///
    /// Returns `None` for a self-loop.
    pub fn new(i: NodeId, j: NodeId) -> Option<Self> {
        match i.cmp(&j) {
            std::cmp::Ordering::Less => Some(Self { a: i, b: j }),
            std::cmp::Ordering::Greater => Some(Self { a: j, b: i }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Returns whether `node` is one of the two endpoints
    pub fn touches(&self, node: NodeId) -> bool {
        self.a == node || self.b == node
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.a, self.b)
    }
}
