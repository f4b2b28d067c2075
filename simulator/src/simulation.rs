use std::fmt;

use paynet::ledger::{Ledger, LedgerError};
use paynet::topology::{CapacityMap, Topology, TopologyError};
use paynet::types::SuccessSample;
use paynet::utils::logging;
use thiserror::Error;

use crate::config::{ConfigError, TransactionConfig};
use crate::context::SimulationContext;
use crate::names::DisplayNames;
use crate::selection::TransactionSelector;
use crate::SimulationResults;

// ------------------------------------------------------------------------------------------------
// Errors
// ------------------------------------------------------------------------------------------------

/// Stage of a run that issued a ledger request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Registration,
    ChannelCreation,
    Replay,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Registration => write!(f, "user registration"),
            Phase::ChannelCreation => write!(f, "channel creation"),
            Phase::Replay => write!(f, "transaction replay"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Topology generation failed: {0}")]
    Topology(#[from] TopologyError),
    #[error("Ledger call failed during {phase}: {source}")]
    Ledger {
        phase: Phase,
        #[source]
        source: LedgerError,
    },
    #[error("Failed to write results: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize results: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn ledger_error(phase: Phase) -> impl FnOnce(LedgerError) -> SimulationError {
    move |source| {
        logging::log("SIMULATOR", &format!("Ledger call failed during {}: {}", phase, source));
        SimulationError::Ledger { phase, source }
    }
}

// ------------------------------------------------------------------------------------------------
// Main Simulation Function
// ------------------------------------------------------------------------------------------------

/// Ports `topology` onto the ledger and replays randomized transfers over it.
///
/// Users are registered first, then every channel is opened with its capacity, then
/// `transaction_count` transfers are sent. Every `sample_interval` transfers the ledger's
/// success counter is read and a sample is recorded. The first failing ledger call aborts
/// the run.
///
/// # Arguments
///
/// * `ctx` - Random sources and the ledger handle
/// * `topology` - The finished network
/// * `config` - Transfer count, sampling interval and amount
/// * `names` - Display names for the registrations
/// * `results` - Receives request counters, selection statistics and the samples
pub async fn run_simulation<L: Ledger>(
    ctx: &mut SimulationContext<L>,
    topology: &Topology,
    config: &TransactionConfig,
    names: &mut dyn DisplayNames,
    results: &mut SimulationResults,
) -> Result<Vec<SuccessSample>, SimulationError> {
    let participants = topology.participants();

    results.users_registered = register_users(&mut ctx.ledger, participants, names).await?;
    logging::log("SIMULATOR", &format!("{} users registered", results.users_registered));

    results.channels_created = create_channels(&mut ctx.ledger, &topology.capacities).await?;
    logging::log("SIMULATOR", &format!("{} channels created", results.channels_created));

    let samples = replay_transactions(ctx, participants, config, results).await?;
    results.success_samples.extend(samples.iter().copied());
    Ok(samples)
}

/// Registers every participant `0..participants` with the ledger
pub async fn register_users<L: Ledger>(
    ledger: &mut L,
    participants: usize,
    names: &mut dyn DisplayNames,
) -> Result<u64, SimulationError> {
    let mut registered = 0;
    for id in 0..participants {
        let name = names.display_name(id);
        ledger
            .register_user(id, &name)
            .await
            .map_err(ledger_error(Phase::Registration))?;
        registered += 1;
    }
    Ok(registered)
}

/// Opens one channel per edge, in ascending edge order
pub async fn create_channels<L: Ledger>(ledger: &mut L, capacities: &CapacityMap) -> Result<u64, SimulationError> {
    let mut created = 0;
    for (edge, &capacity) in capacities.iter() {
        ledger
            .create_channel(edge.a, edge.b, capacity)
            .await
            .map_err(ledger_error(Phase::ChannelCreation))?;
        created += 1;
    }
    Ok(created)
}

/// Sends `transaction_count` transfers between uniformly chosen distinct participants
pub async fn replay_transactions<L: Ledger>(
    ctx: &mut SimulationContext<L>,
    participants: usize,
    config: &TransactionConfig,
    results: &mut SimulationResults,
) -> Result<Vec<SuccessSample>, SimulationError> {
    logging::log("SIMULATOR", &format!("Simulating {} transactions", config.transaction_count));

    let selector = TransactionSelector::new(participants, config.transfer_amount)?;
    let mut samples = Vec::new();

    for attempt in 1..=config.transaction_count {
        let transaction = selector.next_transaction(ctx.distribution_rng.as_mut());
        results.selection_stats.record_transaction(&transaction);

        ctx.ledger
            .send_payment(transaction.sender, transaction.receiver, transaction.amount)
            .await
            .map_err(ledger_error(Phase::Replay))?;
        results.transactions_sent += 1;

        if attempt % config.sample_interval == 0 {
            let successes = ctx
                .ledger
                .successful_count()
                .await
                .map_err(ledger_error(Phase::Replay))?;
            let sample = SuccessSample::new(attempt, successes);
            logging::log("SIMULATOR", &format!(
                "Completed: {}, Successful: {}, Successful Ratio: {}",
                attempt, successes, sample.ratio
            ));
            samples.push(sample);
        }
    }

    Ok(samples)
}
