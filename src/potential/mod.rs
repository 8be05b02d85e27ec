//! Potential module - external barrier potentials and ring-polymer spring coupling.

mod traits;
mod eckart;
pub mod ring;

pub use traits::Potential;
pub use eckart::EckartBarrier;
pub use ring::{RingPolymer, cyclic_neighbors};
