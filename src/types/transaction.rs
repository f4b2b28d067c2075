use serde::{Deserialize, Serialize};
use std::fmt;
use super::NodeId;

/// A single simulated transfer request handed to the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: NodeId,
    pub receiver: NodeId,
    pub amount: u64,
}

/// Running success ratio observed after `attempt_index` transfers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuccessSample {
    /// Number of transfers issued so far
    pub attempt_index: u64,
    /// Cumulative successful transfers reported by the ledger
    pub successes: u64,
    /// `successes / attempt_index`, rounded to three decimals
    pub ratio: f64,
}

impl SuccessSample {
    pub fn new(attempt_index: u64, successes: u64) -> Self {
        let ratio = if attempt_index == 0 {
            0.0
        } else {
            (successes as f64 / attempt_index as f64 * 1000.0).round() / 1000.0
        };
        Self { attempt_index, successes, ratio }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "send {} {} {}", self.sender, self.receiver, self.amount)
    }
}
