// src/core/state.rs

use num_complex::Complex;
use num_traits::{One, Zero};
use std::fmt;

use super::error::Flavour;
use super::matrix::{self, Matrix3, Vector3};

/// Oscillation probabilities indexed by flavour: `[P_e, P_mu, P_tau]`.
pub type Probabilities = [f64; 3];

/// The basis a [`FlavourState`] is currently expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Basis {
    /// Weak-interaction eigenstates (e, μ, τ).
    Flavour,
    /// Mass eigenstates (ν₁, ν₂, ν₃).
    Mass,
}

/// Amplitude vector of a propagating neutrino.
///
/// Transient: propagators create one per call and reduce it to
/// [`Probabilities`] at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct FlavourState {
    amplitudes: Vector3,
    basis: Basis,
}

impl FlavourState {
    /// A pure flavour eigenstate: unit amplitude at `flavour`, zero elsewhere.
    pub fn pure(flavour: Flavour) -> Self {
        let mut amplitudes = [Complex::zero(); 3];
        amplitudes[flavour.index()] = Complex::one();
        Self { amplitudes, basis: Basis::Flavour }
    }

    /// Read-only access to the amplitudes.
    pub fn amplitudes(&self) -> &Vector3 {
        &self.amplitudes
    }

    pub(crate) fn amplitudes_mut(&mut self) -> &mut Vector3 {
        &mut self.amplitudes
    }

    /// The basis the amplitudes refer to.
    pub fn basis(&self) -> Basis {
        self.basis
    }

    /// Applies `m` and relabels the result as being in `basis`.
    pub fn transformed(&self, m: &Matrix3, basis: Basis) -> Self {
        Self { amplitudes: matrix::mul_vec(m, &self.amplitudes), basis }
    }

    /// Component-wise squared modulus.
    pub fn probabilities(&self) -> Probabilities {
        matrix::abs2(&self.amplitudes)
    }

    /// Sum of squared moduli.
    pub fn norm_sqr(&self) -> f64 {
        self.probabilities().iter().sum()
    }
}

impl fmt::Display for FlavourState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}[", self.basis)?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pure_state_is_normalized() {
        for flavour in Flavour::ALL {
            let state = FlavourState::pure(flavour);
            let p = state.probabilities();
            assert_eq!(p[flavour.index()], 1.0);
            assert_eq!(state.norm_sqr(), 1.0);
            assert_eq!(state.basis(), Basis::Flavour);
        }
    }

    #[test]
    fn test_transform_by_identity_keeps_amplitudes() {
        let state = FlavourState::pure(Flavour::Muon);
        let moved = state.transformed(&matrix::identity(), Basis::Mass);
        assert_eq!(moved.amplitudes(), state.amplitudes());
        assert_eq!(moved.basis(), Basis::Mass);
    }
}
