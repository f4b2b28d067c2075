use std::fs;
use std::path::Path;

use chrono::Local;
use paynet::ledger::LedgerNode;
use paynet::utils::logging;

use crate::config::{Config, ConfigError};
use crate::names::NumberedNames;
use crate::scenarios::sim_simple::simulate;
use crate::simulation::SimulationError;
use crate::SimulationResults;

/// Directory, under the results root, holding the alpha sweep's output
pub const RESULTS_SUBDIR: &str = "sim_sweep_alpha";

/// Exponents visited by the sweep: `alpha + k * alpha_step` for each run `k`
pub fn sweep_alphas(config: &Config) -> Result<Vec<f64>, ConfigError> {
    let sweep = config.sweep_config.as_ref().ok_or_else(|| {
        ConfigError::ValidationError("The alpha sweep requires a [sweep_config] section".into())
    })?;
    Ok((0..sweep.num_simulations)
        .map(|k| config.topology_config.alpha + k as f64 * sweep.alpha_step)
        .collect())
}

/// Runs one simulation per swept exponent, each on a fresh in-memory ledger.
///
/// Every run reuses the configured seeds, so runs differ only in the exponent.
pub async fn run_sweep_alpha_simulation(
    config: &Config,
    results_root: &Path,
) -> Result<Vec<(f64, SimulationResults)>, SimulationError> {
    let alphas = sweep_alphas(config)?;
    let start_time = Local::now();
    logging::log("SIMULATOR", &format!(
        "Starting alpha sweep over {:?} at {}",
        alphas, start_time.format("%Y-%m-%d %H:%M:%S")
    ));

    let mut all_results = Vec::with_capacity(alphas.len());
    for (index, &alpha) in alphas.iter().enumerate() {
        logging::log("SIMULATOR", &format!("Running simulation {} of {} with alpha {}", index + 1, alphas.len(), alpha));

        let mut run_config = config.clone();
        run_config.topology_config.alpha = alpha;
        run_config.validate()?;

        let (results, _ledger) = simulate(&run_config, LedgerNode::new(), &mut NumberedNames).await?;
        all_results.push((alpha, results));
    }

    save_sweep_results(&results_root.join(RESULTS_SUBDIR).join("data"), &all_results)?;
    Ok(all_results)
}

/// Writes one combined JSON document with the outcome of every run
fn save_sweep_results(data_dir: &Path, all_results: &[(f64, SimulationResults)]) -> Result<(), SimulationError> {
    fs::create_dir_all(data_dir)?;

    let combined_results = serde_json::json!({
        "num_simulations": all_results.len(),
        "simulation_results": all_results.iter().map(|(alpha, results)| {
            serde_json::json!({
                "alpha": alpha,
                "degree_sum": results.degree_sum,
                "channels": results.channels,
                "total_capacity": results.total_capacity,
                "construction_attempts": results.build_stats.attempts,
                "total_transactions": results.transactions_sent,
                "final_success_ratio": results.final_ratio(),
                "success_samples": results.success_samples
            })
        }).collect::<Vec<_>>()
    });

    let path = data_dir.join("sweep_results.json");
    fs::write(&path, serde_json::to_string_pretty(&combined_results)?)?;
    logging::log("SIMULATOR", &format!("Saved sweep results to {}", path.display()));
    Ok(())
}
