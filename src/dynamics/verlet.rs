//! Velocity-Verlet propagation of a ring polymer until it commits to one
//! side of the barrier.
//!
//! Every `check_interval` steps the fraction h of beads with q ≥ 0 is
//! evaluated. The trajectory commits to the product side once h > 1 - ε and
//! to the reactant side once h < ε. A step cap bounds the run.

use nalgebra::DVector;
use crate::potential::{Potential, RingPolymer};
use crate::sampling::BeadConfiguration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrajectoryState {
    Running,
    CommittedProduct,
    CommittedReactant,
}

/// How a trajectory ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    CommittedProduct,
    CommittedReactant,
    /// Step cap reached while still running
    Timeout,
    /// Coordinates became non-finite
    Diverged,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trajectory {
    pub outcome: Outcome,
    pub steps: usize,
    /// Last evaluated heaviside fraction
    pub indicator: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropagatorSettings {
    pub time_step: f64,
    pub check_interval: usize,
    pub commit_tolerance: f64,
    pub max_steps: usize,
}

impl PropagatorSettings {
    /// Commit decision for a heaviside fraction h.
    pub fn classify(&self, h: f64) -> TrajectoryState {
        if h > 1.0 - self.commit_tolerance {
            TrajectoryState::CommittedProduct
        } else if h < self.commit_tolerance {
            TrajectoryState::CommittedReactant
        } else {
            TrajectoryState::Running
        }
    }
}

/// Symplectic integrator for the ring-polymer Hamiltonian.
pub struct VelocityVerlet<'a, V: Potential> {
    ring: &'a RingPolymer<V>,
    settings: PropagatorSettings,
}

impl<'a, V: Potential> VelocityVerlet<'a, V> {
    pub fn new(ring: &'a RingPolymer<V>, settings: PropagatorSettings) -> Self {
        Self { ring, settings }
    }

    /// Advance one time step. `force` must hold the force at `q` on entry
    /// and holds the force at the new `q` on exit.
    pub fn step(&self, q: &mut DVector<f64>, p: &mut DVector<f64>, force: &mut DVector<f64>) {
        let half_dt = 0.5 * self.settings.time_step;
        p.axpy(half_dt, &*force, 1.0);
        q.axpy(self.settings.time_step / self.ring.mass, &*p, 1.0);
        *force = self.ring.force(q);
        p.axpy(half_dt, &*force, 1.0);
    }

    /// Integrate `config` until it commits, diverges or hits the step cap.
    pub fn propagate(&self, config: BeadConfiguration) -> Trajectory {
        let BeadConfiguration { mut q, mut p } = config;
        let mut force = self.ring.force(&q);
        let mut indicator = 0.5;
        let mut state = TrajectoryState::Running;
        let mut steps = 0;

        while state == TrajectoryState::Running {
            if steps >= self.settings.max_steps {
                return Trajectory { outcome: Outcome::Timeout, steps, indicator };
            }

            self.step(&mut q, &mut p, &mut force);
            steps += 1;

            if steps % self.settings.check_interval == 0 {
                if !q.iter().chain(p.iter()).all(|x| x.is_finite()) {
                    return Trajectory { outcome: Outcome::Diverged, steps, indicator };
                }
                indicator = self.ring.heaviside_fraction(&q);
                state = self.settings.classify(indicator);
            }
        }

        let outcome = match state {
            TrajectoryState::CommittedProduct => Outcome::CommittedProduct,
            _ => Outcome::CommittedReactant,
        };
        Trajectory { outcome, steps, indicator }
    }
}
