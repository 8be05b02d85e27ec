//! Simulation configuration, read from YAML.
//!
//! Every field is optional; missing fields take the reference-run defaults.
//!
//! ```yaml
//! physics:
//!   temperature: 2000.0
//!   barrier_height: 6.809265e-20
//! simulation:
//!   n_beads: 64
//!   n_samples: 500
//!   seed: 42
//! ```

use serde::{Deserialize, Serialize};
use crate::constants::{PathIntegralConstants, PhysicalConstants};
use crate::dynamics::PropagatorSettings;
use crate::error::{Result, RpmdError};

/// Discretization, ensemble size and integration control.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Number of ring-polymer beads N
    pub n_beads: usize,
    /// Total number of trajectories, must be even
    pub n_samples: usize,
    /// Steps between heaviside evaluations
    pub check_interval: usize,
    /// Commit band ε
    pub commit_tolerance: f64,
    /// Per-trajectory step cap
    pub max_steps: usize,
    /// RNG seed; entropy-seeded when absent
    pub seed: Option<u64>,
    /// Flush the result sink every this many records
    pub flush_interval: usize,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            n_beads: 64,
            n_samples: 500,
            check_interval: 10,
            commit_tolerance: 1e-12,
            max_steps: 5_000_000,
            seed: None,
            flush_interval: 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: PhysicalConstants,
    pub simulation: SimulationParams,
}

fn require_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RpmdError::InvalidConfig(format!("{} must be positive and finite, got {}", name, value)))
    }
}

impl SimulationConfig {
    /// Reject configurations that cannot produce a meaningful run.
    pub fn validate(&self) -> Result<()> {
        let phys = &self.physics;
        require_positive("temperature", phys.temperature)?;
        require_positive("boltzmann", phys.boltzmann)?;
        require_positive("mass", phys.mass)?;
        require_positive("barrier_width", phys.barrier_width)?;
        require_positive("time_step", phys.time_step)?;
        require_positive("hbar", phys.hbar)?;
        if !phys.barrier_height.is_finite() || phys.barrier_height < 0.0 {
            return Err(RpmdError::InvalidConfig(format!(
                "barrier_height must be non-negative and finite, got {}",
                phys.barrier_height
            )));
        }

        let sim = &self.simulation;
        if sim.n_beads < 2 {
            return Err(RpmdError::InvalidConfig(format!(
                "n_beads must be at least 2, got {}",
                sim.n_beads
            )));
        }
        if sim.n_samples == 0 || sim.n_samples % 2 != 0 {
            return Err(RpmdError::InvalidConfig(format!(
                "n_samples must be a positive even number, got {}",
                sim.n_samples
            )));
        }
        if sim.check_interval == 0 {
            return Err(RpmdError::InvalidConfig("check_interval must be at least 1".into()));
        }
        if sim.max_steps == 0 {
            return Err(RpmdError::InvalidConfig("max_steps must be at least 1".into()));
        }
        if sim.flush_interval == 0 {
            return Err(RpmdError::InvalidConfig("flush_interval must be at least 1".into()));
        }
        if !(sim.commit_tolerance > 0.0 && sim.commit_tolerance < 0.5) {
            return Err(RpmdError::InvalidConfig(format!(
                "commit_tolerance must lie in (0, 0.5), got {}",
                sim.commit_tolerance
            )));
        }
        Ok(())
    }

    pub fn path_integral_constants(&self) -> PathIntegralConstants {
        PathIntegralConstants::derive(&self.physics, self.simulation.n_beads)
    }

    pub fn propagator_settings(&self) -> PropagatorSettings {
        PropagatorSettings {
            time_step: self.physics.time_step,
            check_interval: self.simulation.check_interval,
            commit_tolerance: self.simulation.commit_tolerance,
            max_steps: self.simulation.max_steps,
        }
    }
}

/// Read a YAML configuration file. The result is not validated.
pub fn read_config(filename: &str) -> Result<SimulationConfig> {
    let file = std::fs::File::open(filename)?;
    let reader = std::io::BufReader::new(file);
    let config: SimulationConfig = serde_yaml::from_reader(reader)?;
    Ok(config)
}
