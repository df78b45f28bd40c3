// src/propagation/mod.rs

//! Propagation of a flavour eigenstate over a baseline.
//!
//! Three algorithms share the mixing matrix and Hamiltonian built by the
//! oscillator:
//! - [`VacuumPropagator`]: exact, a single diagonal exponential in the mass basis.
//! - [`MatterPropagator`]: Lie–Trotter product of the vacuum and matter
//!   exponentials, raised to an integer power.
//! - [`NumericIntegrator`]: explicit Euler steps, recording every step.

mod matter;
mod numeric;
mod vacuum;

pub use matter::MatterPropagator;
pub use numeric::NumericIntegrator;
pub use vacuum::VacuumPropagator;

use crate::core::{Flavour, Probabilities};

/// A propagation algorithm mapping an initial flavour to final probabilities.
pub trait Propagator {
    /// Probabilities of detecting each flavour after `length` km at `energy` GeV.
    fn propagate(&self, initial: Flavour, energy: f64, length: f64) -> Probabilities;
}
