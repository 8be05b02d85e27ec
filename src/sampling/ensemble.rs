//! Initial ensemble of ring-polymer configurations.
//!
//! Each random draw yields an antithetic pair: the primary configuration and
//! its mirror with identical positions and negated momenta. Both members are
//! propagated and counted as separate samples.

use nalgebra::DVector;
use rand::Rng;
use rand_distr::Normal;
use crate::error::{Result, RpmdError};
use crate::potential::{Potential, RingPolymer};
use super::covariance::SamplingTransform;

/// Positions and momenta of every bead.
#[derive(Clone, Debug, PartialEq)]
pub struct BeadConfiguration {
    pub q: DVector<f64>,
    pub p: DVector<f64>,
}

impl BeadConfiguration {
    pub fn new(q: DVector<f64>, p: DVector<f64>) -> Self {
        Self { q, p }
    }

    pub fn n_beads(&self) -> usize {
        self.q.len()
    }

    /// Same positions, momenta reversed.
    pub fn mirrored(&self) -> Self {
        Self {
            q: self.q.clone(),
            p: -&self.p,
        }
    }
}

/// Per-sample quantities fixed at sampling time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleRecord {
    /// Initial velocity of bead 0, p[0]/m
    pub velocity: f64,
    /// Boltzmann weight exp(-βₙ Σⱼ V(q[j]))
    pub weight: f64,
}

#[derive(Clone, Debug)]
pub struct Sample {
    pub config: BeadConfiguration,
    pub record: SampleRecord,
}

#[derive(Clone, Debug)]
pub struct AntitheticPair {
    pub primary: Sample,
    pub mirror: Sample,
}

impl AntitheticPair {
    /// Primary first, then mirror.
    pub fn into_samples(self) -> [Sample; 2] {
        [self.primary, self.mirror]
    }
}

/// Draws centroid-frame configurations from the free ring-polymer
/// distribution with Maxwell-Boltzmann momenta at βₙ.
pub struct EnsembleSampler<'a, V: Potential, R: Rng> {
    transform: &'a SamplingTransform,
    ring: &'a RingPolymer<V>,
    beta_n: f64,
    unit: Normal<f64>,
    momentum: Normal<f64>,
    rng: R,
}

impl<'a, V: Potential, R: Rng> EnsembleSampler<'a, V, R> {
    pub fn new(
        transform: &'a SamplingTransform,
        ring: &'a RingPolymer<V>,
        beta_n: f64,
        sigma_p: f64,
        rng: R,
    ) -> Result<Self> {
        if transform.dim() + 1 != ring.n_beads {
            return Err(RpmdError::InvalidConfig(format!(
                "sampling transform of dimension {} does not match {} beads",
                transform.dim(),
                ring.n_beads
            )));
        }
        let unit = Normal::new(0.0, 1.0)
            .map_err(|e| RpmdError::InvalidConfig(format!("unit normal: {}", e)))?;
        let momentum = Normal::new(0.0, sigma_p)
            .map_err(|e| RpmdError::InvalidConfig(format!("momentum width {}: {}", sigma_p, e)))?;

        Ok(Self { transform, ring, beta_n, unit, momentum, rng })
    }

    fn record(&self, config: &BeadConfiguration) -> SampleRecord {
        SampleRecord {
            velocity: config.p[0] / self.ring.mass,
            weight: (-self.beta_n * self.ring.external_energy(&config.q)).exp(),
        }
    }

    /// Draw one configuration and its mirror.
    pub fn sample_pair(&mut self) -> AntitheticPair {
        let n_beads = self.ring.n_beads;
        let r = DVector::<f64>::from_distribution(self.transform.dim(), &self.unit, &mut self.rng);
        let displacements = self.transform.apply(&r);

        let mut q = DVector::zeros(n_beads);
        q.rows_mut(1, n_beads - 1).copy_from(&displacements);
        let p = DVector::<f64>::from_distribution(n_beads, &self.momentum, &mut self.rng);

        let primary = BeadConfiguration::new(q, p);
        let mirror = primary.mirrored();
        let primary_record = self.record(&primary);
        let mirror_record = self.record(&mirror);

        AntitheticPair {
            primary: Sample { config: primary, record: primary_record },
            mirror: Sample { config: mirror, record: mirror_record },
        }
    }

    /// Draw `n_samples / 2` antithetic pairs. `n_samples` must be even.
    pub fn sample(&mut self, n_samples: usize) -> Result<Vec<AntitheticPair>> {
        if n_samples % 2 != 0 {
            return Err(RpmdError::InvalidConfig(format!(
                "antithetic sampling needs an even sample count, got {}",
                n_samples
            )));
        }
        Ok((0..n_samples / 2).map(|_| self.sample_pair()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{PathIntegralConstants, PhysicalConstants};
    use crate::potential::EckartBarrier;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup(n_beads: usize) -> (PathIntegralConstants, SamplingTransform, RingPolymer<EckartBarrier>) {
        let physics = PhysicalConstants {
            temperature: 1.0,
            boltzmann: 1.0,
            barrier_height: 1.0,
            mass: 1.0,
            barrier_width: 1.0,
            time_step: 1e-3,
            hbar: 1.0,
        };
        let constants = PathIntegralConstants::derive(&physics, n_beads);
        let transform = SamplingTransform::build(&constants, physics.mass).unwrap();
        let ring = RingPolymer::new(
            n_beads,
            physics.mass,
            constants.omega_n,
            EckartBarrier::from_physics(&physics),
        );
        (constants, transform, ring)
    }

    #[test]
    fn test_antithetic_pair_mirrors_momenta() {
        let (constants, transform, ring) = setup(8);
        let rng = StdRng::seed_from_u64(17);
        let mut sampler =
            EnsembleSampler::new(&transform, &ring, constants.beta_n, constants.sigma_p, rng).unwrap();

        for pair in sampler.sample(20).unwrap() {
            assert_eq!(pair.primary.config.q, pair.mirror.config.q);
            for j in 0..8 {
                assert_eq!(pair.mirror.config.p[j], -pair.primary.config.p[j]);
            }
            assert_eq!(pair.mirror.record.velocity, -pair.primary.record.velocity);
            assert_eq!(pair.mirror.record.weight, pair.primary.record.weight);
        }
    }

    #[test]
    fn test_same_seed_same_ensemble() {
        let (constants, transform, ring) = setup(4);
        let mut a = EnsembleSampler::new(
            &transform, &ring, constants.beta_n, constants.sigma_p, StdRng::seed_from_u64(3),
        ).unwrap();
        let mut b = EnsembleSampler::new(
            &transform, &ring, constants.beta_n, constants.sigma_p, StdRng::seed_from_u64(3),
        ).unwrap();
        let pa = a.sample_pair();
        let pb = b.sample_pair();
        assert_eq!(pa.primary.config, pb.primary.config);
    }

    #[test]
    fn test_bead_zero_is_pinned_and_record_consistent() {
        let (constants, transform, ring) = setup(6);
        let mut sampler = EnsembleSampler::new(
            &transform, &ring, constants.beta_n, constants.sigma_p, StdRng::seed_from_u64(5),
        ).unwrap();
        let [primary, mirror] = sampler.sample_pair().into_samples();

        assert_eq!(primary.config.q[0], 0.0);
        assert_eq!(primary.config.n_beads(), 6);
        assert_relative_eq!(primary.record.velocity, primary.config.p[0] / ring.mass, epsilon = 1e-15);
        let expected_weight = (-constants.beta_n * ring.external_energy(&mirror.config.q)).exp();
        assert_relative_eq!(mirror.record.weight, expected_weight, epsilon = 1e-15);
        assert!(primary.record.weight > 0.0 && primary.record.weight <= 1.0);
    }

    #[test]
    fn test_sampled_moments_match_free_ring_polymer() {
        let (constants, transform, ring) = setup(4);
        let mut sampler = EnsembleSampler::new(
            &transform, &ring, constants.beta_n, constants.sigma_p, StdRng::seed_from_u64(11),
        ).unwrap();
        let n_pairs = 20_000;
        let mut p_var = 0.0;
        let mut q1_var = 0.0;
        for _ in 0..n_pairs {
            let pair = sampler.sample_pair();
            p_var += pair.primary.config.p[2].powi(2);
            q1_var += pair.primary.config.q[1].powi(2);
        }
        p_var /= n_pairs as f64;
        q1_var /= n_pairs as f64;

        assert_relative_eq!(p_var, constants.sigma_p.powi(2), max_relative = 0.05);
        assert_relative_eq!(q1_var, transform.covariance()[(0, 0)], max_relative = 0.05);
    }

    #[test]
    fn test_odd_sample_count_rejected() {
        let (constants, transform, ring) = setup(4);
        let mut sampler = EnsembleSampler::new(
            &transform, &ring, constants.beta_n, constants.sigma_p, StdRng::seed_from_u64(1),
        ).unwrap();
        assert!(sampler.sample(3).is_err());
    }
}
