//! The ledger collaborator.
//!
//! The ledger is the system of record: it executes registrations, channel openings and
//! transfers, and decides whether a transfer succeeded. Callers only issue requests and
//! read back the cumulative success counter.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{Capacity, NodeId};

pub mod node;
pub use node::LedgerNode;


#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("User already registered: {0}")]
    UserAlreadyRegistered(NodeId),
    #[error("User not registered: {0}")]
    UnknownUser(NodeId),
    #[error("Channel already exists between {0} and {1}")]
    ChannelAlreadyExists(NodeId, NodeId),
    #[error("Channel endpoints must differ, got {0} twice")]
    SelfChannel(NodeId),
    #[error("Request rejected: {0}")]
    Rejected(String),
    #[error("Communication error: {0}")]
    Communication(String),
}

/// Requests understood by the ledger.
///
/// `Ok(())` only acknowledges that a request was accepted. Whether a payment actually went
/// through is reflected in `successful_count`.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Register a participant under a display name
    async fn register_user(&mut self, id: NodeId, display_name: &str) -> Result<(), LedgerError>;

    /// Open a channel between two registered participants
    async fn create_channel(&mut self, a: NodeId, b: NodeId, capacity: Capacity) -> Result<(), LedgerError>;

    /// Attempt a transfer of `amount` from `sender` to `receiver`
    async fn send_payment(&mut self, sender: NodeId, receiver: NodeId, amount: u64) -> Result<(), LedgerError>;

    /// Cumulative number of successful payments
    async fn successful_count(&self) -> Result<u64, LedgerError>;
}
