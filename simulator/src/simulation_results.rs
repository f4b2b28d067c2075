use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use paynet::topology::{BuildStats, DegreeRule, Topology};
use paynet::types::SuccessSample;
use paynet::utils::logging;

use crate::config::{Config, SeedConfig};
use crate::selection::SelectionStats;
use crate::simulation::SimulationError;

#[derive(Debug)]
pub struct SimulationResults {
    // Simulation parameters
    pub participants: usize,
    pub alpha: f64,
    pub degree_rule: DegreeRule,
    pub capacity_scale: f64,
    pub transaction_count: u64,
    pub sample_interval: u64,
    pub transfer_amount: u64,
    pub seeds: SeedConfig,

    // Topology summary
    pub degree_sum: usize,
    pub degree_histogram: Vec<(usize, usize)>,
    pub channels: usize,
    pub total_capacity: u64,
    pub zero_capacity_channels: usize,
    pub build_stats: BuildStats,

    // Ledger requests
    pub users_registered: u64,
    pub channels_created: u64,
    pub transactions_sent: u64,

    // Samples and statistics
    pub success_samples: Vec<SuccessSample>,
    pub selection_stats: SelectionStats,
    pub start_time: Instant,
}

// Empty constructor
impl Default for SimulationResults {
    fn default() -> Self {
        Self {
            participants: 0,
            alpha: 0.0,
            degree_rule: DegreeRule::default(),
            capacity_scale: 0.0,
            transaction_count: 0,
            sample_interval: 0,
            transfer_amount: 0,
            seeds: SeedConfig::default(),
            degree_sum: 0,
            degree_histogram: Vec::new(),
            channels: 0,
            total_capacity: 0,
            zero_capacity_channels: 0,
            build_stats: BuildStats::default(),
            users_registered: 0,
            channels_created: 0,
            transactions_sent: 0,
            success_samples: Vec::new(),
            selection_stats: SelectionStats::new(),
            start_time: Instant::now(),
        }
    }
}

impl SimulationResults {
    /// Results carrying the run parameters of `config`
    pub fn from_config(config: &Config) -> Self {
        Self {
            participants: config.topology_config.participants,
            alpha: config.topology_config.alpha,
            degree_rule: config.topology_config.degree_rule,
            capacity_scale: config.channel_config.capacity_scale,
            transaction_count: config.transaction_config.transaction_count,
            sample_interval: config.transaction_config.sample_interval,
            transfer_amount: config.transaction_config.transfer_amount,
            seeds: config.seed_config,
            ..Self::default()
        }
    }

    /// Copies the summary of a generated topology
    pub fn record_topology(&mut self, topology: &Topology) {
        self.degree_sum = topology.degrees.sum();
        self.degree_histogram = topology.degrees.histogram();
        self.channels = topology.channel_count();
        self.total_capacity = topology.capacities.total();
        self.zero_capacity_channels = topology.capacities.zero_capacity_count();
        self.build_stats = topology.build_stats;
    }

    /// Ratio of the last sample, if any sample was taken
    pub fn final_ratio(&self) -> Option<f64> {
        self.success_samples.last().map(|sample| sample.ratio)
    }

    /// Parameters and headline results as one JSON document
    pub fn stats_json(&self) -> serde_json::Value {
        serde_json::json!({
            "parameters": {
                "participants": self.participants,
                "alpha": self.alpha,
                "degree_rule": self.degree_rule,
                "capacity_scale": self.capacity_scale,
                "transaction_count": self.transaction_count,
                "sample_interval": self.sample_interval,
                "transfer_amount": self.transfer_amount,
                "distribution_seed": self.seeds.distribution_seed,
                "edge_seed": self.seeds.edge_seed
            },
            "topology": {
                "degree_sum": self.degree_sum,
                "channels": self.channels,
                "total_capacity": self.total_capacity,
                "zero_capacity_channels": self.zero_capacity_channels,
                "construction_attempts": self.build_stats.attempts,
                "stalled_attempts": self.build_stats.stalled,
                "disconnected_attempts": self.build_stats.disconnected
            },
            "results": {
                "users_registered": self.users_registered,
                "channels_created": self.channels_created,
                "total_transactions": self.transactions_sent,
                "final_success_ratio": self.final_ratio()
            }
        })
    }

    /// Saves the simulation results as JSON files under `data_dir`
    pub fn save(&self, data_dir: &Path) -> Result<(), SimulationError> {
        logging::log("SIMULATOR", "=== Simulation Statistics ===");
        logging::log("SIMULATOR", &format!("Channels: {}", self.channels));
        logging::log("SIMULATOR", &format!("Total Transactions: {}", self.transactions_sent));
        if let Some(ratio) = self.final_ratio() {
            logging::log("SIMULATOR", &format!("Final Successful Ratio: {}", ratio));
        }
        logging::log("SIMULATOR", &format!("Elapsed: {:.2}s", self.start_time.elapsed().as_secs_f64()));
        logging::log("SIMULATOR", "===========================");

        fs::create_dir_all(data_dir)?;

        write_json(data_dir.join("simulation_stats.json"), &self.stats_json())?;

        let samples = serde_json::json!({ "success_samples": self.success_samples });
        write_json(data_dir.join("success_samples.json"), &samples)?;

        let degrees = serde_json::json!({
            "degree_distribution": self.degree_histogram.iter().map(|(degree, nodes)| {
                serde_json::json!({
                    "degree": degree,
                    "nodes": nodes
                })
            }).collect::<Vec<_>>()
        });
        write_json(data_dir.join("degree_distribution.json"), &degrees)?;

        let (sender_json, receiver_json) = self.selection_stats.to_json();
        write_json(data_dir.join("sender_selection.json"), &sender_json)?;
        write_json(data_dir.join("receiver_selection.json"), &receiver_json)?;

        Ok(())
    }
}

fn write_json(path: PathBuf, value: &serde_json::Value) -> Result<(), SimulationError> {
    fs::write(&path, serde_json::to_string_pretty(value)?)?;
    logging::log("SIMULATOR", &format!("Saved {}", path.display()));
    Ok(())
}
