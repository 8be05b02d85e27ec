//! Sampling module - free ring-polymer covariance and initial ensemble.

mod covariance;
mod ensemble;

pub use covariance::{coupling_matrix, SamplingTransform};
pub use ensemble::{AntitheticPair, BeadConfiguration, EnsembleSampler, Sample, SampleRecord};
