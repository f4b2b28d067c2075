pub mod constants;
pub mod edge;
pub mod transaction;

pub use edge::{Capacity, Edge, NodeId};
pub use transaction::{SuccessSample, Transaction};
