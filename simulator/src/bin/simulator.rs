use std::env;
use std::fs;

use anyhow::Context;
use paynet::utils::logging;
use simulator::config::DEFAULT_CONFIG_PATH;
use simulator::interface::{SimulationType, SimulatorInterface, RESULTS_ROOT};
use tracing_subscriber::EnvFilter;

// ------------------------------------------------------------------------------------------------
// Main
// ------------------------------------------------------------------------------------------------

/// Usage: `simulator [simple|sweep-alpha] [config.toml]`
///
/// Without a scenario argument the interactive menu is shown.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fs::create_dir_all(RESULTS_ROOT).context("Failed to create results directory")?;

    setup_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    let config_path = args.get(1).map(String::as_str).unwrap_or(DEFAULT_CONFIG_PATH);
    let interface = SimulatorInterface::new(config_path);

    match args.first() {
        Some(choice) => {
            let simulation_type = SimulationType::from_input(choice)
                .with_context(|| format!("Unknown simulation type: {}", choice))?;
            interface.run(simulation_type).await?;
        }
        None => interface.run_interactive().await?,
    }

    Ok(())
}

/// Installs the tracing subscriber, and enables the file logger when ENABLE_LOGS is set
fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,paynet=info,simulator=info")),
        )
        .init();

    if env::var("ENABLE_LOGS").is_ok() {
        // Start every run with a fresh log file
        let log_path = "simulator/results/simulation.log";
        if let Err(e) = fs::remove_file(log_path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                eprintln!("Error deleting log file: {}", e);
            }
        }

        env::set_var("PAYNET_LOGGING", "true");
        env::set_var("PAYNET_LOG_TO_FILE", "true");
        env::set_var("PAYNET_LOG_FILE", log_path);
        logging::init_logging();
    }
}
