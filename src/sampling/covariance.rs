//! Free ring-polymer covariance for the non-centroid bead positions.
//!
//! With bead 0 pinned as the reference, the spring action of the remaining
//! N-1 beads is a quadratic form in the tridiagonal matrix A with 2 on the
//! diagonal and -1 on the first off-diagonals. Its inverse, factorized as
//! L Lᵗ, maps independent unit Gaussians onto correlated bead displacements.

use nalgebra::{DMatrix, DVector};
use crate::constants::PathIntegralConstants;
use crate::error::{Result, RpmdError};

/// The (N-1)×(N-1) bead coupling matrix.
pub fn coupling_matrix(n_beads: usize) -> DMatrix<f64> {
    let dim = n_beads.saturating_sub(1);
    DMatrix::from_fn(dim, dim, |i, j| {
        if i == j {
            2.0
        } else if i.abs_diff(j) == 1 {
            -1.0
        } else {
            0.0
        }
    })
}

/// Lower-triangular sampling transform L in physical length units.
#[derive(Clone, Debug)]
pub struct SamplingTransform {
    pub l: DMatrix<f64>,
}

impl SamplingTransform {
    /// Invert the coupling matrix, Cholesky-factorize the inverse, normalize
    /// so L[0,0] = 1, then divide by sqrt(βₙ m ωₙ²).
    pub fn build(constants: &PathIntegralConstants, mass: f64) -> Result<Self> {
        let n_beads = constants.n_beads;
        if n_beads < 2 {
            return Err(RpmdError::InvalidConfig(format!(
                "ring polymer needs at least 2 beads, got {}",
                n_beads
            )));
        }

        let inverse = coupling_matrix(n_beads)
            .try_inverse()
            .ok_or(RpmdError::SingularCoupling { n_beads })?;
        let mut l = inverse
            .cholesky()
            .ok_or(RpmdError::Factorization { n_beads })?
            .unpack();

        let l00 = l[(0, 0)];
        l /= l00;
        l /= (constants.beta_n * constants.spring_constant(mass)).sqrt();

        Ok(Self { l })
    }

    pub fn dim(&self) -> usize {
        self.l.nrows()
    }

    /// Positions of beads 1..N relative to bead 0 for unit draws `r`.
    pub fn apply(&self, r: &DVector<f64>) -> DVector<f64> {
        &self.l * r
    }

    /// Covariance of the sampled displacements, L Lᵗ.
    pub fn covariance(&self) -> DMatrix<f64> {
        &self.l * self.l.transpose()
    }
}
