//! Trait for one-dimensional external potentials acting on every bead.

/// External potential V(q) felt independently by each bead.
pub trait Potential {
    /// Evaluate V(q).
    fn energy(&self, q: f64) -> f64;

    /// Compute the force F(q) = -dV/dq.
    fn force(&self, q: f64) -> f64;

    /// Numerical force using central difference.
    fn numerical_force(&self, q: f64, h: f64) -> f64 {
        -(self.energy(q + h) - self.energy(q - h)) / (2.0 * h)
    }

    /// Sum of V over all beads of a configuration.
    fn total_energy(&self, q: &[f64]) -> f64 {
        q.iter().map(|&x| self.energy(x)).sum()
    }
}
