// src/propagation/vacuum.rs

use super::Propagator;
use crate::core::constants::neutosc_constants::{CONV, I};
use crate::core::matrix::{self, Matrix3};
use crate::core::{Basis, Flavour, FlavourState, Probabilities};
use crate::hamiltonian::Hamiltonian;
use crate::mixing::MixingMatrix;

/// Closed-form vacuum propagation.
///
/// The vacuum Hamiltonian is diagonal in the mass basis, so its exponential
/// is the element-wise exponential of the diagonal and the result is exact.
#[derive(Debug, Clone, Copy)]
pub struct VacuumPropagator<'a> {
    mixing: &'a MixingMatrix,
    hamiltonian: &'a Hamiltonian,
}

impl<'a> VacuumPropagator<'a> {
    /// Borrows the engine state of an oscillator.
    pub fn new(mixing: &'a MixingMatrix, hamiltonian: &'a Hamiltonian) -> Self {
        Self { mixing, hamiltonian }
    }

    /// `U · exp(-i·H·c·L/E) · U†`, the flavour-basis evolution operator.
    pub fn evolution_operator(&self, energy: f64, length: f64) -> Matrix3 {
        let phase = -I * (CONV * length / energy);
        let hexp = matrix::exp_diagonal(&matrix::scale(self.hamiltonian.mass(), phase));
        matrix::mul(&matrix::mul(self.mixing.u(), &hexp), self.mixing.u_dagger())
    }
}

impl Propagator for VacuumPropagator<'_> {
    fn propagate(&self, initial: Flavour, energy: f64, length: f64) -> Probabilities {
        let evolution = self.evolution_operator(energy, length);
        FlavourState::pure(initial)
            .transformed(&evolution, Basis::Flavour)
            .probabilities()
    }
}
