//! Physical constants of the Eckart barrier model and the path-integral
//! constants derived from them.
//!
//! All quantities are in SI units by default. The reference run is a
//! particle of 1061 electron masses crossing a 0.425 eV barrier of width
//! 0.734 bohr at 2000 K.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const ELECTRON_VOLT: f64 = 1.60218e-19;
const ELECTRON_MASS: f64 = 9.10938356e-31;
const BOHR: f64 = 5.2918e-11;
const ATTOSECOND: f64 = 1e-18;

/// Physical parameters of the barrier crossing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalConstants {
    /// Temperature T (K)
    pub temperature: f64,
    /// Boltzmann constant k_B (J/K)
    pub boltzmann: f64,
    /// Barrier height V0 (J)
    pub barrier_height: f64,
    /// Particle mass m (kg)
    pub mass: f64,
    /// Barrier width a (m)
    pub barrier_width: f64,
    /// Integration time step dt (s)
    pub time_step: f64,
    /// Reduced Planck constant ħ (J s)
    pub hbar: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            temperature: 2000.0,
            boltzmann: 1.3806488e-23,
            barrier_height: 0.425 * ELECTRON_VOLT,
            mass: 1061.0 * ELECTRON_MASS,
            barrier_width: 0.734 * BOHR,
            time_step: 20.0 * ATTOSECOND,
            hbar: 1.0545718e-34,
        }
    }
}

/// Constants of the ring-polymer discretization, fixed once per run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathIntegralConstants {
    pub n_beads: usize,
    /// β = 1/(k_B T)
    pub beta: f64,
    /// βₙ = β/N
    pub beta_n: f64,
    /// ωₙ = 1/(βₙ ħ)
    pub omega_n: f64,
    /// Standard deviation of every bead momentum, sqrt(m/βₙ)
    pub sigma_p: f64,
    /// Free-particle thermal length factor sqrt(2π β ħ² / m)
    pub thermal_length: f64,
    /// Reactant partition function Q = 1/S_T
    pub partition_function: f64,
    /// Flux normalization N_p = 1/S_T
    pub flux_normalization: f64,
}

impl PathIntegralConstants {
    pub fn derive(physics: &PhysicalConstants, n_beads: usize) -> Self {
        let beta = 1.0 / (physics.boltzmann * physics.temperature);
        let beta_n = beta / n_beads as f64;
        let omega_n = 1.0 / (beta_n * physics.hbar);
        let sigma_p = (physics.mass / beta_n).sqrt();
        let thermal_length = (2.0 * PI * beta * physics.hbar.powi(2) / physics.mass).sqrt();

        Self {
            n_beads,
            beta,
            beta_n,
            omega_n,
            sigma_p,
            thermal_length,
            partition_function: 1.0 / thermal_length,
            flux_normalization: 1.0 / thermal_length,
        }
    }

    /// Spring constant m ωₙ² coupling neighbouring beads.
    pub fn spring_constant(&self, mass: f64) -> f64 {
        mass * self.omega_n * self.omega_n
    }
}
