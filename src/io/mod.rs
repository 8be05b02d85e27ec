//! IO module - configuration loading and result output.

mod config;
mod report;

pub use config::{read_config, SimulationConfig, SimulationParams};
pub use report::{format_g, ResultSink, SAMPLE_FORMAT, SUMMARY_FORMAT};
