//! Transfer endpoint selection and per-node selection statistics.

use std::collections::BTreeMap;

use paynet::topology::TopologyError;
use paynet::types::{NodeId, Transaction};
use paynet::utils::logging;
use rand::Rng;

// ------------------------------------------------------------------------------------------------
// Selection
// ------------------------------------------------------------------------------------------------

/// Picks transfer endpoints uniformly over the participants
pub struct TransactionSelector {
    participants: usize,
    amount: u64,
}

impl TransactionSelector {
    /// Creates a selector for `participants` nodes; at least two are needed for distinct endpoints
    pub fn new(participants: usize, amount: u64) -> Result<Self, TopologyError> {
        if participants < 2 {
            return Err(TopologyError::TooFewParticipants(participants));
        }
        logging::log("SELECTOR", &format!(
            "Creating transaction selector with {} participants and amount {}",
            participants, amount
        ));
        Ok(Self { participants, amount })
    }

    /// Draws a sender, then redraws the receiver until it differs from the sender
    pub fn next_transaction<R: Rng + ?Sized>(&self, rng: &mut R) -> Transaction {
        let sender = rng.gen_range(0..self.participants);
        let mut receiver = rng.gen_range(0..self.participants);
        while receiver == sender {
            receiver = rng.gen_range(0..self.participants);
        }
        Transaction { sender, receiver, amount: self.amount }
    }
}

// ------------------------------------------------------------------------------------------------
// Statistics
// ------------------------------------------------------------------------------------------------

/// How often each node was picked as sender and as receiver
#[derive(Debug, Default, Clone)]
pub struct SelectionStats {
    sender_counts: BTreeMap<NodeId, u64>,
    receiver_counts: BTreeMap<NodeId, u64>,
}

impl SelectionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_transaction(&mut self, transaction: &Transaction) {
        *self.sender_counts.entry(transaction.sender).or_insert(0) += 1;
        *self.receiver_counts.entry(transaction.receiver).or_insert(0) += 1;
    }

    pub fn total(&self) -> u64 {
        self.sender_counts.values().sum()
    }

    pub fn sender_count(&self, node: NodeId) -> u64 {
        self.sender_counts.get(&node).copied().unwrap_or(0)
    }

    pub fn receiver_count(&self, node: NodeId) -> u64 {
        self.receiver_counts.get(&node).copied().unwrap_or(0)
    }

    pub fn to_json(&self) -> (serde_json::Value, serde_json::Value) {
        let sender_json = serde_json::json!({
            "sender_selection": self.sender_counts.iter().map(|(node, transactions)| {
                serde_json::json!({
                    "node": node,
                    "transactions": transactions
                })
            }).collect::<Vec<_>>()
        });

        let receiver_json = serde_json::json!({
            "receiver_selection": self.receiver_counts.iter().map(|(node, transactions)| {
                serde_json::json!({
                    "node": node,
                    "transactions": transactions
                })
            }).collect::<Vec<_>>()
        });

        (sender_json, receiver_json)
    }
}
