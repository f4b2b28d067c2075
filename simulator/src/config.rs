//! Configuration loader and validator for the paynet simulator.
//! Handles parsing, validation, and access to simulation configuration files.

use paynet::topology::{DegreeRule, TopologyParams};
use paynet::types::constants;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Location of the configuration used when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "simulator/config.toml";

// ------------------------------------------------------------------------------------------------
// Main Configuration Structs
// ------------------------------------------------------------------------------------------------

/// Main configuration struct for simulation parameters.
///
/// Covers the network topology, channel capacities, the transfer replay and the
/// optional seeds for both random sources.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Participant count, power-law exponent and construction limits
    pub topology_config: TopologyConfig,
    /// Channel capacity distribution
    pub channel_config: ChannelConfig,
    /// Transfer replay parameters
    pub transaction_config: TransactionConfig,
    /// Seeds for the random sources, unseeded when absent
    #[serde(default)]
    pub seed_config: SeedConfig,
    /// Parameters of the alpha sweep scenario
    #[serde(default)]
    pub sweep_config: Option<SweepConfig>,
}

/// Configuration of the generated network.
#[derive(Debug, Deserialize, Clone)]
pub struct TopologyConfig {
    /// Number of participants (nodes) in the network
    pub participants: usize,
    /// Exponent of the power-law degree distribution (density falls off as x^-alpha)
    pub alpha: f64,
    /// Whether node degrees must match their targets exactly or may exceed them
    #[serde(default)]
    pub degree_rule: DegreeRule,
    /// Whole-sequence degree draws before giving up
    #[serde(default = "default_max_sampling_attempts")]
    pub max_sampling_attempts: usize,
    /// Graph construction attempts before giving up
    #[serde(default = "default_max_construction_attempts")]
    pub max_construction_attempts: usize,
}

/// Configuration of channel capacities.
#[derive(Debug, Deserialize, Clone)]
pub struct ChannelConfig {
    /// Mean of the exponential capacity distribution
    pub capacity_scale: f64,
}

/// Configuration of the transfer replay.
#[derive(Debug, Deserialize, Clone)]
pub struct TransactionConfig {
    /// Total number of simulated transfers
    pub transaction_count: u64,
    /// Number of transfers between two success ratio samples
    pub sample_interval: u64,
    /// Amount moved by every transfer
    pub transfer_amount: u64,
}

/// Seeds for the two random sources.
///
/// The distribution source drives degree draws, capacities and transfer endpoints;
/// the edge source drives neighbor selection during graph construction.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedConfig {
    #[serde(default)]
    pub distribution_seed: Option<u64>,
    #[serde(default)]
    pub edge_seed: Option<u64>,
}

/// Configuration for the alpha sweep.
///
/// Run `k` uses `alpha + k * alpha_step` for `k` in `0..num_simulations`.
#[derive(Debug, Deserialize, Clone)]
pub struct SweepConfig {
    /// Total number of simulation runs in the sweep
    pub num_simulations: usize,
    /// Increment of the power-law exponent between runs
    pub alpha_step: f64,
}

fn default_max_sampling_attempts() -> usize {
    constants::MAX_SAMPLING_ATTEMPTS
}

fn default_max_construction_attempts() -> usize {
    constants::MAX_CONSTRUCTION_ATTEMPTS
}

// ------------------------------------------------------------------------------------------------
// Error Types and Validation
// ------------------------------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::ValidationError(message.into())
}

impl TopologyConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.participants < 2 {
            return Err(invalid("Number of participants must be at least 2"));
        }
        if !self.alpha.is_finite() || self.alpha <= 1.0 {
            return Err(invalid("Alpha must be greater than 1"));
        }
        if self.max_sampling_attempts == 0 {
            return Err(invalid("Max sampling attempts must be positive"));
        }
        if self.max_construction_attempts == 0 {
            return Err(invalid("Max construction attempts must be positive"));
        }
        Ok(())
    }
}

impl ChannelConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.capacity_scale.is_finite() || self.capacity_scale <= 0.0 {
            return Err(invalid("Capacity scale must be positive"));
        }
        Ok(())
    }
}

impl TransactionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.transaction_count == 0 {
            return Err(invalid("Transaction count must be positive"));
        }
        if self.sample_interval == 0 {
            return Err(invalid("Sample interval must be positive"));
        }
        if self.transfer_amount == 0 {
            return Err(invalid("Transfer amount must be positive"));
        }
        Ok(())
    }
}

impl SweepConfig {
    fn validate(&self, base_alpha: f64) -> Result<(), ConfigError> {
        if self.num_simulations == 0 {
            return Err(invalid("Number of sweep simulations must be positive"));
        }
        if !self.alpha_step.is_finite() {
            return Err(invalid("Alpha step must be finite"));
        }
        let last_alpha = base_alpha + self.alpha_step * (self.num_simulations - 1) as f64;
        if last_alpha <= 1.0 {
            return Err(invalid("Every swept alpha must be greater than 1"));
        }
        Ok(())
    }
}

// ------------------------------------------------------------------------------------------------
// Configuration Implementation Methods
// ------------------------------------------------------------------------------------------------

impl Default for Config {
    /// The reference run: 100 participants, alpha 2.75, mean capacity 10,
    /// 1000 unit transfers sampled every 100.
    fn default() -> Self {
        Self {
            topology_config: TopologyConfig {
                participants: constants::PARTICIPANTS,
                alpha: constants::ALPHA,
                degree_rule: DegreeRule::default(),
                max_sampling_attempts: constants::MAX_SAMPLING_ATTEMPTS,
                max_construction_attempts: constants::MAX_CONSTRUCTION_ATTEMPTS,
            },
            channel_config: ChannelConfig {
                capacity_scale: constants::CAPACITY_SCALE,
            },
            transaction_config: TransactionConfig {
                transaction_count: constants::TRANSACTION_COUNT,
                sample_interval: constants::SAMPLE_INTERVAL,
                transfer_amount: constants::TRANSFER_AMOUNT,
            },
            seed_config: SeedConfig::default(),
            sweep_config: None,
        }
    }
}

impl Config {
    /// Loads the configuration from `DEFAULT_CONFIG_PATH`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config_str = fs::read_to_string(path)?;
        Self::from_toml_str(&config_str)
    }

    pub fn from_toml_str(config_str: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.topology_config.validate()?;
        self.channel_config.validate()?;
        self.transaction_config.validate()?;
        if let Some(sweep) = &self.sweep_config {
            sweep.validate(self.topology_config.alpha)?;
        }
        Ok(())
    }

    /// Parameters handed to the topology pipeline
    pub fn topology_params(&self) -> TopologyParams {
        TopologyParams {
            participants: self.topology_config.participants,
            alpha: self.topology_config.alpha,
            capacity_scale: self.channel_config.capacity_scale,
            degree_rule: self.topology_config.degree_rule,
            max_sampling_attempts: self.topology_config.max_sampling_attempts,
            max_construction_attempts: self.topology_config.max_construction_attempts,
        }
    }

    /// Number of success ratio samples a full run records
    pub fn expected_samples(&self) -> u64 {
        self.transaction_config.transaction_count / self.transaction_config.sample_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
        [topology_config]
        participants = 20
        alpha = 2.5

        [channel_config]
        capacity_scale = 10.0

        [transaction_config]
        transaction_count = 1000
        sample_interval = 100
        transfer_amount = 1
    "#;

    #[test]
    fn test_parse_minimal_config() {
        let config = Config::from_toml_str(VALID).expect("valid config");
        assert_eq!(config.topology_config.participants, 20);
        assert_eq!(config.topology_config.degree_rule, DegreeRule::AtLeast);
        assert_eq!(config.topology_config.max_sampling_attempts, constants::MAX_SAMPLING_ATTEMPTS);
        assert_eq!(config.seed_config, SeedConfig::default());
        assert!(config.sweep_config.is_none());
        assert_eq!(config.expected_samples(), 10);
    }

    #[test]
    fn test_parse_optional_sections() {
        let text = format!(
            "{}\n[seed_config]\ndistribution_seed = 7\n\n[sweep_config]\nnum_simulations = 3\nalpha_step = 0.25\n",
            VALID.replace("alpha = 2.5", "alpha = 2.5\ndegree_rule = \"exact\"")
        );
        let config = Config::from_toml_str(&text).expect("valid config");
        assert_eq!(config.topology_config.degree_rule, DegreeRule::Exact);
        assert_eq!(config.seed_config.distribution_seed, Some(7));
        assert_eq!(config.seed_config.edge_seed, None);
        assert_eq!(config.sweep_config.map(|s| s.num_simulations), Some(3));
    }

    #[test]
    fn test_rejects_invalid_values() {
        let cases = [
            ("participants = 20", "participants = 1"),
            ("alpha = 2.5", "alpha = 1.0"),
            ("capacity_scale = 10.0", "capacity_scale = 0.0"),
            ("transaction_count = 1000", "transaction_count = 0"),
            ("sample_interval = 100", "sample_interval = 0"),
            ("transfer_amount = 1", "transfer_amount = 0"),
        ];
        for (from, to) in cases {
            let result = Config::from_toml_str(&VALID.replace(from, to));
            assert!(matches!(result, Err(ConfigError::ValidationError(_))), "{} should be rejected", to);
        }
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(matches!(Config::from_toml_str("[topology_config"), Err(ConfigError::ParseError(_))));
        assert!(matches!(Config::load_from("does/not/exist.toml"), Err(ConfigError::FileReadError(_))));
    }

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        config.validate().expect("reference configuration is valid");
        assert_eq!(config.topology_params(), TopologyParams::default());
    }

    #[test]
    fn test_shipped_config_is_unseeded() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.toml");
        let config = Config::load_from(path).expect("shipped config is valid");
        assert_eq!(config.seed_config, SeedConfig::default());
        assert_eq!(config.topology_config.degree_rule, DegreeRule::AtLeast);
        assert_eq!(config.topology_params(), TopologyParams::default());
    }
}
