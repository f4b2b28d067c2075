pub mod sim_simple;
pub mod sim_sweep_alpha;
