pub mod config;
pub mod context;
pub mod interface;
pub mod names;
pub mod scenarios;
pub mod selection;
pub mod simulation;
pub mod simulation_results;

pub use config::{Config, ConfigError};
pub use context::SimulationContext;
pub use names::{DisplayNames, NameList, NumberedNames};
pub use scenarios::sim_simple::{run_simple_simulation, simulate};
pub use scenarios::sim_sweep_alpha::run_sweep_alpha_simulation;
pub use selection::{SelectionStats, TransactionSelector};
pub use simulation::{run_simulation, Phase, SimulationError};
pub use simulation_results::SimulationResults;
