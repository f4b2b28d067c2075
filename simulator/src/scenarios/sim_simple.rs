use std::path::Path;

use chrono::Local;
use paynet::ledger::{Ledger, LedgerNode};
use paynet::utils::logging;

use crate::config::Config;
use crate::context::SimulationContext;
use crate::names::{DisplayNames, NumberedNames};
use crate::simulation::{run_simulation, SimulationError};
use crate::SimulationResults;

/// Directory, under the results root, holding the simple simulation's output
pub const RESULTS_SUBDIR: &str = "sim_simple";

/// Generates a topology from `config`, ports it onto `ledger` and replays the transfers.
///
/// Returns the results together with the ledger so callers can inspect its final state.
pub async fn simulate<L: Ledger>(
    config: &Config,
    ledger: L,
    names: &mut dyn DisplayNames,
) -> Result<(SimulationResults, L), SimulationError> {
    let mut results = initialize_simulation_results(config);
    let mut ctx = SimulationContext::from_seeds(ledger, &config.seed_config);

    let topology = ctx.generate_topology(&config.topology_params())?;
    results.record_topology(&topology);
    logging::log("SIMULATOR", &format!(
        "Topology ready: {} participants, {} channels, degree sum {}",
        topology.participants(), topology.channel_count(), topology.degrees.sum()
    ));

    run_simulation(&mut ctx, &topology, &config.transaction_config, names, &mut results).await?;
    Ok((results, ctx.into_ledger()))
}

/// Runs the simple simulation against the in-memory ledger and saves its results
pub async fn run_simple_simulation(config: &Config, results_root: &Path) -> Result<SimulationResults, SimulationError> {
    let (results, _ledger) = simulate(config, LedgerNode::new(), &mut NumberedNames).await?;
    results.save(&results_root.join(RESULTS_SUBDIR).join("data"))?;
    Ok(results)
}

/// Initializes simulation results from configuration and logs the configuration
fn initialize_simulation_results(config: &Config) -> SimulationResults {
    let results = SimulationResults::from_config(config);

    let start_time = Local::now();
    logging::log("SIMULATOR", "=== Simulation Configuration ===");
    logging::log("SIMULATOR", &format!("Start Time: {}", start_time.format("%Y-%m-%d %H:%M:%S")));
    logging::log("SIMULATOR", &format!("Participants: {}", config.topology_config.participants));
    logging::log("SIMULATOR", &format!("Alpha: {}", config.topology_config.alpha));
    logging::log("SIMULATOR", &format!("Degree Rule: {:?}", config.topology_config.degree_rule));
    logging::log("SIMULATOR", &format!("Capacity Scale: {}", config.channel_config.capacity_scale));
    logging::log("SIMULATOR", &format!("Transactions: {}", config.transaction_config.transaction_count));
    logging::log("SIMULATOR", &format!("Sample Interval: {}", config.transaction_config.sample_interval));
    logging::log("SIMULATOR", &format!("Transfer Amount: {}", config.transaction_config.transfer_amount));
    logging::log("SIMULATOR", &format!("Seeds: {:?}", config.seed_config));
    logging::log("SIMULATOR", "=============================");

    results
}
