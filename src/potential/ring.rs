//! Ring-polymer spring coupling between neighbouring beads.
//!
//! Beads form a closed ring in imaginary time: bead 0 neighbours beads N-1
//! and 1, bead N-1 neighbours beads N-2 and 0.

use nalgebra::DVector;
use super::traits::Potential;

/// Indices of the previous and next bead of bead `j` on a ring of `n` beads.
#[inline]
pub fn cyclic_neighbors(j: usize, n: usize) -> (usize, usize) {
    ((j + n - 1) % n, (j + 1) % n)
}

/// A ring of N beads of mass m joined by springs of constant m ωₙ²,
/// each bead feeling the external potential `V`.
#[derive(Clone, Debug)]
pub struct RingPolymer<V: Potential> {
    pub n_beads: usize,
    pub mass: f64,
    pub omega_n: f64,
    pub external: V,
}

impl<V: Potential> RingPolymer<V> {
    pub fn new(n_beads: usize, mass: f64, omega_n: f64, external: V) -> Self {
        Self { n_beads, mass, omega_n, external }
    }

    #[inline]
    fn spring_constant(&self) -> f64 {
        self.mass * self.omega_n * self.omega_n
    }

    /// Spring force on every bead, -m ωₙ² (2 q[j] - q[j-1] - q[j+1]).
    pub fn spring_force(&self, q: &DVector<f64>) -> DVector<f64> {
        let k = self.spring_constant();
        DVector::from_fn(self.n_beads, |j, _| {
            let (prev, next) = cyclic_neighbors(j, self.n_beads);
            -k * (2.0 * q[j] - q[prev] - q[next])
        })
    }

    /// Total force on every bead: external force plus spring coupling.
    pub fn force(&self, q: &DVector<f64>) -> DVector<f64> {
        let mut f = self.spring_force(q);
        for (fj, &qj) in f.iter_mut().zip(q.iter()) {
            *fj += self.external.force(qj);
        }
        f
    }

    /// Sum of the external potential over beads. Spring energy is excluded;
    /// it is sampled exactly by the free ring-polymer covariance.
    pub fn external_energy(&self, q: &DVector<f64>) -> f64 {
        self.external.total_energy(q.as_slice())
    }

    /// ½ m ωₙ² Σⱼ (q[j+1] - q[j])²
    pub fn spring_energy(&self, q: &DVector<f64>) -> f64 {
        let k = self.spring_constant();
        (0..self.n_beads)
            .map(|j| {
                let (_, next) = cyclic_neighbors(j, self.n_beads);
                let dq = q[next] - q[j];
                0.5 * k * dq * dq
            })
            .sum()
    }

    pub fn kinetic_energy(&self, p: &DVector<f64>) -> f64 {
        p.norm_squared() / (2.0 * self.mass)
    }

    /// Ring-polymer Hamiltonian: kinetic + external + spring.
    pub fn total_energy(&self, q: &DVector<f64>, p: &DVector<f64>) -> f64 {
        self.kinetic_energy(p) + self.external_energy(q) + self.spring_energy(q)
    }

    /// Fraction of beads at or past the barrier top, mean of Θ(q[j]) with Θ(0) = 1.
    pub fn heaviside_fraction(&self, q: &DVector<f64>) -> f64 {
        let past = q.iter().filter(|&&x| x >= 0.0).count();
        past as f64 / self.n_beads as f64
    }
}
