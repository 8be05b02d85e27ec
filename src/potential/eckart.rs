//! Symmetric Eckart barrier V(q) = V0 / cosh²(q/a).

use serde::{Deserialize, Serialize};
use super::traits::Potential;
use crate::constants::PhysicalConstants;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EckartBarrier {
    /// Barrier height V0
    pub height: f64,
    /// Barrier width a
    pub width: f64,
}

impl EckartBarrier {
    pub fn new(height: f64, width: f64) -> Self {
        Self { height, width }
    }

    pub fn from_physics(physics: &PhysicalConstants) -> Self {
        Self::new(physics.barrier_height, physics.barrier_width)
    }

    /// Returns (sech²(x), tanh(x)) without forming cosh(x), so large |x|
    /// underflows to zero instead of overflowing.
    #[inline]
    fn sech2_tanh(x: f64) -> (f64, f64) {
        let e = (-2.0 * x.abs()).exp();
        let denom = 1.0 + e;
        let sech2 = 4.0 * e / (denom * denom);
        let tanh = ((1.0 - e) / denom).copysign(x);
        (sech2, tanh)
    }
}

impl Potential for EckartBarrier {
    fn energy(&self, q: f64) -> f64 {
        let (sech2, _) = Self::sech2_tanh(q / self.width);
        self.height * sech2
    }

    /// F(q) = 2 V0 tanh(q/a) / (a cosh²(q/a))
    fn force(&self, q: f64) -> f64 {
        let (sech2, tanh) = Self::sech2_tanh(q / self.width);
        2.0 * self.height * tanh * sech2 / self.width
    }
}
