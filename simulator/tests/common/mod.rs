use async_trait::async_trait;
use paynet::ledger::{Ledger, LedgerError, LedgerNode};
use paynet::types::{Capacity, NodeId};
use simulator::config::{Config, SeedConfig};

/// Kind of ledger request a `FailingLedger` can be told to reject
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Register,
    Channel,
    Payment,
}

/// Forwards to an in-memory ledger, but fails the `nth` request of one kind
pub struct FailingLedger {
    pub inner: LedgerNode,
    fail_on: Request,
    nth: usize,
    seen: usize,
}

impl FailingLedger {
    pub fn new(fail_on: Request, nth: usize) -> Self {
        Self { inner: LedgerNode::new(), fail_on, nth, seen: 0 }
    }

    fn check(&mut self, request: Request) -> Result<(), LedgerError> {
        if request != self.fail_on {
            return Ok(());
        }
        self.seen += 1;
        if self.seen == self.nth {
            Err(LedgerError::Communication(format!("{:?} request {} dropped", request, self.nth)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Ledger for FailingLedger {
    async fn register_user(&mut self, id: NodeId, display_name: &str) -> Result<(), LedgerError> {
        self.check(Request::Register)?;
        self.inner.register_user(id, display_name).await
    }

    async fn create_channel(&mut self, a: NodeId, b: NodeId, capacity: Capacity) -> Result<(), LedgerError> {
        self.check(Request::Channel)?;
        self.inner.create_channel(a, b, capacity).await
    }

    async fn send_payment(&mut self, sender: NodeId, receiver: NodeId, amount: u64) -> Result<(), LedgerError> {
        self.check(Request::Payment)?;
        self.inner.send_payment(sender, receiver, amount).await
    }

    async fn successful_count(&self) -> Result<u64, LedgerError> {
        self.inner.successful_count().await
    }
}

/// A small seeded run: 30 participants, 1000 unit transfers sampled every 100
pub fn small_config(seed: u64) -> Config {
    let mut config = Config::default();
    config.topology_config.participants = 30;
    config.topology_config.alpha = 2.5;
    config.seed_config = SeedConfig {
        distribution_seed: Some(seed),
        edge_seed: Some(seed + 1),
    };
    config
}

/// Fresh directory under the system temp dir
pub fn scratch_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("paynet-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}
