//! Error type shared by the configuration, covariance and output layers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpmdError {
    /// Rejected before any sampling begins.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("bead coupling matrix for {n_beads} beads is singular")]
    SingularCoupling { n_beads: usize },

    #[error("Cholesky factorization failed for {n_beads} beads (inverse coupling matrix not positive definite)")]
    Factorization { n_beads: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, RpmdError>;
