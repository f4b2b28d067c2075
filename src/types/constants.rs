//! Reference values for the simulation knobs.

/// Number of participants in the reference network
pub const PARTICIPANTS: usize = 100;

/// Power-law exponent of the reference degree distribution
pub const ALPHA: f64 = 2.75;

/// Mean of the exponential channel capacity distribution
pub const CAPACITY_SCALE: f64 = 10.0;

/// Transfers replayed per run
pub const TRANSACTION_COUNT: u64 = 1000;

/// Transfers between two success ratio samples
pub const SAMPLE_INTERVAL: u64 = 100;

/// Amount moved by every simulated transfer
pub const TRANSFER_AMOUNT: u64 = 1;

/// Whole-sequence degree draws before sampling gives up
pub const MAX_SAMPLING_ATTEMPTS: usize = 10_000;

/// Graph construction attempts before building gives up
pub const MAX_CONSTRUCTION_ATTEMPTS: usize = 100_000;
