//! Dynamics module - real-time ring-polymer trajectories.

mod verlet;

pub use verlet::{Outcome, PropagatorSettings, Trajectory, TrajectoryState, VelocityVerlet};
