// src/mixing/mod.rs

//! Construction of the PMNS flavour-mixing matrix.
//!
//! Columns of `U` are mass eigenstates written in the flavour basis, so
//! `U · ψ_mass = ψ_flavour` and `U† · ψ_flavour = ψ_mass`.

use num_complex::Complex;
use num_traits::{One, Zero};

use crate::core::constants::neutosc_constants::I;
use crate::core::matrix::{self, Matrix3};
use crate::core::OscillationParameters;

/// The unitary mixing matrix `U` together with its cached adjoint `U†`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixingMatrix {
    u: Matrix3,
    u_dagger: Matrix3,
}

impl MixingMatrix {
    /// Builds `U = R23 · Rcp · R12`.
    ///
    /// The CP phase enters the middle rotation as `e^{∓iδ}`; antineutrinos
    /// use `-δ`. Angles are used as given: any real input yields a unitary matrix.
    pub fn build(theta12: f64, theta23: f64, theta13: f64, delta_cp: f64, antineutrino: bool) -> Self {
        let (s12, c12) = theta12.sin_cos();
        let (s23, c23) = theta23.sin_cos();
        let (s13, c13) = theta13.sin_cos();
        let ch = if antineutrino { -1.0 } else { 1.0 };

        let one = Complex::one();
        let zero = Complex::zero();
        let re = |x: f64| Complex::new(x, 0.0);

        // Atmospheric rotation.
        let r23: Matrix3 = [
            [one, zero, zero],
            [zero, re(c23), re(s23)],
            [zero, re(-s23), re(c23)],
        ];
        // Reactor rotation carrying the CP phase.
        let phase = (-I * ch * delta_cp).exp();
        let rcp: Matrix3 = [
            [re(c13), zero, phase * s13],
            [zero, one, zero],
            [-phase.conj() * s13, zero, re(c13)],
        ];
        // Solar rotation.
        let r12: Matrix3 = [
            [re(c12), re(s12), zero],
            [re(-s12), re(c12), zero],
            [zero, zero, one],
        ];

        let u = matrix::mul(&matrix::mul(&r23, &rcp), &r12);
        Self { u, u_dagger: matrix::adjoint(&u) }
    }

    /// Builds the matrix for a parameter record.
    pub fn from_parameters(params: &OscillationParameters) -> Self {
        Self::build(params.theta12, params.theta23, params.theta13, params.delta_cp, params.antineutrino)
    }

    /// `U`: mass basis to flavour basis.
    pub fn u(&self) -> &Matrix3 {
        &self.u
    }

    /// `U†`: flavour basis to mass basis.
    pub fn u_dagger(&self) -> &Matrix3 {
        &self.u_dagger
    }
}
