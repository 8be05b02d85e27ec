//! RPMD Eckart - ring-polymer molecular dynamics rates for an Eckart barrier
//!
//! This crate estimates the quantum rate constant of a particle crossing the
//! one-dimensional barrier V(q) = V0/cosh²(q/a). Initial ring-polymer
//! configurations are drawn from the free ring-polymer distribution,
//! propagated with velocity Verlet until they commit to one side, and their
//! weighted flux is averaged into a rate constant.

pub mod constants;
pub mod error;
pub mod potential;
pub mod sampling;
pub mod dynamics;
pub mod flux;
pub mod io;

// Re-export commonly used types at crate root
pub use constants::{PhysicalConstants, PathIntegralConstants};
pub use error::{Result, RpmdError};
pub use potential::{Potential, EckartBarrier, RingPolymer, cyclic_neighbors};
pub use sampling::{coupling_matrix, SamplingTransform, EnsembleSampler, AntitheticPair, BeadConfiguration, Sample, SampleRecord};
pub use dynamics::{Outcome, PropagatorSettings, Trajectory, TrajectoryState, VelocityVerlet};
pub use flux::{weighted_contribution, run_simulation, seeded_rng, FluxAccumulator, RateEstimate, RunSummary};
pub use io::{read_config, format_g, ResultSink, SimulationConfig, SimulationParams};
