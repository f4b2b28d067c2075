pub mod types;
pub mod topology;
pub mod ledger;
pub mod utils;

pub use topology::{Topology, TopologyParams, TopologyError};
pub use ledger::{Ledger, LedgerError, LedgerNode};
