//! Reactive-flux accumulation and the end-to-end rate calculation.
//!
//! Each trajectory contributes weight × initial velocity × final heaviside
//! fraction. The rate constant is k = N_p ⟨contribution⟩ / Q.

use std::io::Write;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::constants::PathIntegralConstants;
use crate::dynamics::{Outcome, Trajectory, VelocityVerlet};
use crate::error::Result;
use crate::io::{ResultSink, SimulationConfig};
use crate::potential::{EckartBarrier, RingPolymer};
use crate::sampling::{EnsembleSampler, SampleRecord, SamplingTransform};

/// Contribution of one trajectory to the flux-side correlation function.
///
/// Diverged trajectories contribute zero. Timed-out trajectories keep their
/// last (intermediate) heaviside fraction.
pub fn weighted_contribution(record: &SampleRecord, trajectory: &Trajectory) -> f64 {
    match trajectory.outcome {
        Outcome::Diverged => 0.0,
        _ => record.weight * record.velocity * trajectory.indicator,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateEstimate {
    /// C(t) = N_p ⟨contribution⟩
    pub correlation: f64,
    /// k = C(t) / Q
    pub rate_constant: f64,
    pub log10_rate: f64,
}

/// Running sum of contributions with per-outcome counts.
#[derive(Clone, Debug, Default)]
pub struct FluxAccumulator {
    sum: f64,
    samples: usize,
    product: usize,
    reactant: usize,
    timeout: usize,
    diverged: usize,
}

impl FluxAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, contribution: f64, outcome: Outcome) {
        self.sum += contribution;
        self.samples += 1;
        match outcome {
            Outcome::CommittedProduct => self.product += 1,
            Outcome::CommittedReactant => self.reactant += 1,
            Outcome::Timeout => self.timeout += 1,
            Outcome::Diverged => self.diverged += 1,
        }
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn mean(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.sum / self.samples as f64
        }
    }

    pub fn rate(&self, constants: &PathIntegralConstants) -> RateEstimate {
        let correlation = constants.flux_normalization * self.mean();
        let rate_constant = correlation / constants.partition_function;
        RateEstimate {
            correlation,
            rate_constant,
            log10_rate: rate_constant.log10(),
        }
    }

    pub fn summary(&self, constants: &PathIntegralConstants) -> RunSummary {
        RunSummary {
            samples: self.samples,
            product: self.product,
            reactant: self.reactant,
            timeout: self.timeout,
            diverged: self.diverged,
            mean_contribution: self.mean(),
            rate: self.rate(constants),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunSummary {
    pub samples: usize,
    pub product: usize,
    pub reactant: usize,
    pub timeout: usize,
    pub diverged: usize,
    pub mean_contribution: f64,
    pub rate: RateEstimate,
}

/// RNG for a run: seeded when a seed is given, otherwise from OS entropy.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Sample the initial ensemble, propagate every configuration, stream each
/// contribution to `sink`, and finish with the rate-constant summary line.
pub fn run_simulation<W: Write, R: Rng>(
    config: &SimulationConfig,
    rng: R,
    sink: &mut ResultSink<W>,
) -> Result<RunSummary> {
    config.validate()?;
    let physics = &config.physics;
    let params = &config.simulation;
    let constants = config.path_integral_constants();

    log::info!(
        "RPMD Eckart run: T = {} K, N = {} beads, {} samples, dt = {:e} s",
        physics.temperature, params.n_beads, params.n_samples, physics.time_step
    );
    log::info!(
        "beta_n = {:e}, omega_n = {:e}, sigma_p = {:e}, Q = {:e}",
        constants.beta_n, constants.omega_n, constants.sigma_p, constants.partition_function
    );

    let transform = SamplingTransform::build(&constants, physics.mass)?;
    let ring = RingPolymer::new(
        params.n_beads,
        physics.mass,
        constants.omega_n,
        EckartBarrier::from_physics(physics),
    );
    let mut sampler = EnsembleSampler::new(&transform, &ring, constants.beta_n, constants.sigma_p, rng)?;
    let pairs = sampler.sample(params.n_samples)?;
    log::info!("sampled {} antithetic pairs", pairs.len());

    let verlet = VelocityVerlet::new(&ring, config.propagator_settings());
    let mut accumulator = FluxAccumulator::new();

    for (index, sample) in pairs.into_iter().flat_map(|pair| pair.into_samples()).enumerate() {
        let record = sample.record;
        let trajectory = verlet.propagate(sample.config);
        match trajectory.outcome {
            Outcome::Timeout => log::warn!(
                "sample {}: no commitment after {} steps, h = {}",
                index, trajectory.steps, trajectory.indicator
            ),
            Outcome::Diverged => log::warn!(
                "sample {}: non-finite coordinates after {} steps, contribution set to 0",
                index, trajectory.steps
            ),
            outcome => log::debug!("sample {}: {:?} after {} steps", index, outcome, trajectory.steps),
        }

        let contribution = weighted_contribution(&record, &trajectory);
        sink.write_contribution(contribution)?;
        accumulator.add(contribution, trajectory.outcome);
    }

    let summary = accumulator.summary(&constants);
    sink.write_summary(physics.temperature, summary.rate.rate_constant)?;

    log::info!(
        "outcomes: {} product, {} reactant, {} timeout, {} diverged",
        summary.product, summary.reactant, summary.timeout, summary.diverged
    );
    log::info!(
        "k = {:e}, log10 k = {:.6}",
        summary.rate.rate_constant, summary.rate.log10_rate
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn trajectory(outcome: Outcome, indicator: f64) -> Trajectory {
        Trajectory { outcome, steps: 10, indicator }
    }

    #[test]
    fn test_contribution_by_outcome() {
        let record = SampleRecord { velocity: -2.0, weight: 0.5 };
        assert_relative_eq!(
            weighted_contribution(&record, &trajectory(Outcome::CommittedProduct, 1.0)),
            -1.0
        );
        assert_relative_eq!(
            weighted_contribution(&record, &trajectory(Outcome::CommittedReactant, 0.0)),
            0.0
        );
        assert_relative_eq!(
            weighted_contribution(&record, &trajectory(Outcome::Timeout, 0.25)),
            -0.25
        );
        assert_relative_eq!(
            weighted_contribution(&record, &trajectory(Outcome::Diverged, 0.75)),
            0.0
        );
    }

    #[test]
    fn test_accumulator_rate() {
        let physics = crate::constants::PhysicalConstants {
            temperature: 1.0,
            boltzmann: 1.0,
            barrier_height: 1.0,
            mass: 1.0,
            barrier_width: 1.0,
            time_step: 1e-3,
            hbar: 1.0,
        };
        let constants = PathIntegralConstants::derive(&physics, 4);
        let mut acc = FluxAccumulator::new();
        acc.add(3.0, Outcome::CommittedProduct);
        acc.add(0.0, Outcome::CommittedReactant);
        acc.add(1.0, Outcome::Timeout);
        acc.add(0.0, Outcome::Diverged);

        let summary = acc.summary(&constants);
        assert_eq!(summary.samples, 4);
        assert_eq!((summary.product, summary.reactant, summary.timeout, summary.diverged), (1, 1, 1, 1));
        assert_relative_eq!(summary.mean_contribution, 1.0);
        // N_p = Q, so k is the mean contribution
        assert_relative_eq!(summary.rate.rate_constant, 1.0, epsilon = 1e-12);
        assert_relative_eq!(summary.rate.log10_rate, 0.0, epsilon = 1e-12);
        assert_relative_eq!(
            summary.rate.correlation,
            constants.flux_normalization,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_empty_accumulator_mean_is_zero() {
        assert_eq!(FluxAccumulator::new().mean(), 0.0);
    }
}
