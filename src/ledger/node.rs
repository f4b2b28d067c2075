use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use async_trait::async_trait;

use super::{Ledger, LedgerError};
use crate::types::{Capacity, Edge, NodeId, Transaction};
use crate::utils::logging;

/// In-memory ledger.
///
/// A payment succeeds when sender and receiver are joined by a path of channels whose
/// capacities all cover the amount. Capacities are not consumed by payments.
#[derive(Debug, Default)]
pub struct LedgerNode {
    /// Registered users and their display names
    users: HashMap<NodeId, String>,
    /// Open channels and their capacities
    channels: BTreeMap<Edge, Capacity>,
    /// Channel adjacency, kept alongside `channels` for path searches
    adjacency: HashMap<NodeId, Vec<NodeId>>,
    /// Every payment request received, in order
    payments: Vec<Transaction>,
    /// Payments that found a path
    successful: u64,
}

impl LedgerNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn display_name(&self, id: NodeId) -> Option<&str> {
        self.users.get(&id).map(String::as_str)
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn channel_capacity(&self, a: NodeId, b: NodeId) -> Option<Capacity> {
        Edge::new(a, b).and_then(|edge| self.channels.get(&edge).copied())
    }

    /// Payment requests in the order they were received
    pub fn payments(&self) -> &[Transaction] {
        &self.payments
    }

    fn ensure_registered(&self, id: NodeId) -> Result<(), LedgerError> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(LedgerError::UnknownUser(id))
        }
    }

    /// Breadth-first search over channels able to carry `amount`
    fn has_route(&self, sender: NodeId, receiver: NodeId, amount: u64) -> bool {
        let mut visited = HashSet::from([sender]);
        let mut queue = VecDeque::from([sender]);

        while let Some(node) = queue.pop_front() {
            if node == receiver {
                return true;
            }
            let Some(neighbors) = self.adjacency.get(&node) else {
                continue;
            };
            for &next in neighbors {
                let usable = self.channel_capacity(node, next).map_or(false, |c| c >= amount);
                if usable && visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        false
    }
}

#[async_trait]
impl Ledger for LedgerNode {
    async fn register_user(&mut self, id: NodeId, display_name: &str) -> Result<(), LedgerError> {
        if self.users.contains_key(&id) {
            tracing::warn!("Duplicate registration for user {}", id);
            return Err(LedgerError::UserAlreadyRegistered(id));
        }
        self.users.insert(id, display_name.to_string());
        logging::log("LEDGER", &format!("Registered user {} as {}", id, display_name));
        Ok(())
    }

    async fn create_channel(&mut self, a: NodeId, b: NodeId, capacity: Capacity) -> Result<(), LedgerError> {
        let edge = Edge::new(a, b).ok_or(LedgerError::SelfChannel(a))?;
        self.ensure_registered(a)?;
        self.ensure_registered(b)?;
        if self.channels.contains_key(&edge) {
            tracing::warn!("Duplicate channel {}", edge);
            return Err(LedgerError::ChannelAlreadyExists(edge.a, edge.b));
        }
        self.channels.insert(edge, capacity);
        self.adjacency.entry(a).or_default().push(b);
        self.adjacency.entry(b).or_default().push(a);
        logging::log("LEDGER", &format!("Opened channel {} with capacity {}", edge, capacity));
        Ok(())
    }

    async fn send_payment(&mut self, sender: NodeId, receiver: NodeId, amount: u64) -> Result<(), LedgerError> {
        self.ensure_registered(sender)?;
        self.ensure_registered(receiver)?;
        let transaction = Transaction { sender, receiver, amount };
        self.payments.push(transaction);

        if self.has_route(sender, receiver, amount) {
            self.successful += 1;
            logging::log("LEDGER", &format!("Payment succeeded: {}", transaction));
        } else {
            logging::log("LEDGER", &format!("Payment failed, no route: {}", transaction));
        }
        Ok(())
    }

    async fn successful_count(&self) -> Result<u64, LedgerError> {
        Ok(self.successful)
    }
}
