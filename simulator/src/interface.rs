use std::io::{self, Write};
use std::path::PathBuf;

use paynet::utils::logging;

use crate::config::Config;
use crate::scenarios::sim_simple::run_simple_simulation;
use crate::scenarios::sim_sweep_alpha::run_sweep_alpha_simulation;
use crate::simulation::SimulationError;

/// Directory all scenario results are written under
pub const RESULTS_ROOT: &str = "simulator/results";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationType {
    Simple,
    SweepAlpha,
    Exit,
}

impl SimulationType {
    /// Accepts either the menu number or the scenario name
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim() {
            "1" | "simple" => Some(SimulationType::Simple),
            "2" | "sweep-alpha" | "sweep_alpha" => Some(SimulationType::SweepAlpha),
            "0" | "exit" => Some(SimulationType::Exit),
            _ => None,
        }
    }
}

pub struct SimulatorInterface {
    config_path: PathBuf,
    results_root: PathBuf,
}

impl SimulatorInterface {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            results_root: PathBuf::from(RESULTS_ROOT),
        }
    }

    /// Writes results below `results_root` instead of `RESULTS_ROOT`
    pub fn with_results_root(mut self, results_root: impl Into<PathBuf>) -> Self {
        self.results_root = results_root.into();
        self
    }

    pub fn get_menu_text(&self) -> &'static str {
        "Available simulation types:\n  1. Simple simulation\n  2. Sweep power-law exponent (alpha)\n  0. Exit"
    }

    pub fn show_menu(&self) {
        println!("=== Paynet Simulator ===");
        println!("{}", self.get_menu_text());
    }

    pub fn get_user_choice(&self) -> io::Result<Option<SimulationType>> {
        print!("\nSelect simulation type (0-2): ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        Ok(SimulationType::from_input(&input))
    }

    /// Loads the configuration and runs one scenario
    pub async fn run(&self, simulation_type: SimulationType) -> Result<(), SimulationError> {
        match simulation_type {
            SimulationType::Simple => {
                let config = Config::load_from(&self.config_path)?;
                let results = run_simple_simulation(&config, &self.results_root).await?;
                println!(
                    "Simple simulation completed: {} transactions, final success ratio {:?}",
                    results.transactions_sent,
                    results.final_ratio()
                );
            }
            SimulationType::SweepAlpha => {
                let config = Config::load_from(&self.config_path)?;
                let runs = run_sweep_alpha_simulation(&config, &self.results_root).await?;
                for (alpha, results) in &runs {
                    println!("alpha {:.3}: final success ratio {:?}", alpha, results.final_ratio());
                }
                println!("Alpha sweep completed: {} simulations", runs.len());
            }
            SimulationType::Exit => {
                println!("Exiting...");
            }
        }
        Ok(())
    }

    /// Shows the menu until a valid choice is made, then runs it
    pub async fn run_interactive(&self) -> Result<(), SimulationError> {
        loop {
            self.show_menu();

            match self.get_user_choice()? {
                Some(simulation_type) => {
                    logging::log("SIMULATOR", &format!("Selected {:?}", simulation_type));
                    return self.run(simulation_type).await;
                }
                None => {
                    println!("Invalid choice. Please enter 1, 2, or 0 to exit.");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input() {
        assert_eq!(SimulationType::from_input("1\n"), Some(SimulationType::Simple));
        assert_eq!(SimulationType::from_input("simple"), Some(SimulationType::Simple));
        assert_eq!(SimulationType::from_input(" sweep-alpha "), Some(SimulationType::SweepAlpha));
        assert_eq!(SimulationType::from_input("2"), Some(SimulationType::SweepAlpha));
        assert_eq!(SimulationType::from_input("0"), Some(SimulationType::Exit));
        assert_eq!(SimulationType::from_input("3"), None);
        assert_eq!(SimulationType::from_input(""), None);
    }
}
