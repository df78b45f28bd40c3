// src/hamiltonian/mod.rs

//! Vacuum and matter terms of the effective Hamiltonian.

use num_complex::Complex;
use num_traits::Zero;

use crate::core::constants::neutosc_constants::{ELECTRON_FRACTION, FERMI, M_PER_KM, NUCLEON_MASS};
use crate::core::matrix::{self, Matrix3};
use crate::core::OscillationParameters;

/// The two diagonal pieces of the Hamiltonian.
///
/// `mass` lives in the mass basis and holds `diag(0, Δm²₂₁, Δm²₃₁)` in eV².
/// `matter` lives in the flavour basis and holds the charged-current potential
/// `V₀₀` in km⁻¹; every other entry is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hamiltonian {
    mass: Matrix3,
    matter: Matrix3,
}

impl Hamiltonian {
    /// Builds both terms. `chirality` is `+1` for neutrinos, `-1` for antineutrinos.
    pub fn build(dm21_sq: f64, dm31_sq: f64, density: f64, chirality: f64) -> Self {
        let mass = matrix::diag(&[
            Complex::zero(),
            Complex::new(dm21_sq, 0.0),
            Complex::new(dm31_sq, 0.0),
        ]);
        let mut matter = matrix::zeros();
        matter[0][0] = Complex::new(matter_potential(density, chirality), 0.0);
        Self { mass, matter }
    }

    /// Builds the terms for a parameter record.
    pub fn from_parameters(params: &OscillationParameters) -> Self {
        Self::build(params.dm21_sq, params.dm31_sq, params.density, params.chirality())
    }

    /// Mass-squared splittings, mass basis.
    pub fn mass(&self) -> &Matrix3 {
        &self.mass
    }

    /// Matter potential, flavour basis.
    pub fn matter(&self) -> &Matrix3 {
        &self.matter
    }

    /// `true` when the matter potential vanishes.
    pub fn is_vacuum(&self) -> bool {
        self.matter[0][0].is_zero()
    }
}

/// `±√2 · G_F · N_e` in km⁻¹ for a density in kg/m³.
pub fn matter_potential(density: f64, chirality: f64) -> f64 {
    let electron_density = density / NUCLEON_MASS * ELECTRON_FRACTION;
    chirality * std::f64::consts::SQRT_2 * FERMI * electron_density * M_PER_KM
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vacuum_has_no_potential() {
        let h = Hamiltonian::build(7.5e-5, 2.457e-3, 0.0, 1.0);
        assert!(h.is_vacuum());
        assert_eq!(h.matter(), &matrix::zeros());
        assert_eq!(h.mass()[1][1].re, 7.5e-5);
        assert_eq!(h.mass()[2][2].re, 2.457e-3);
        assert!(h.mass()[0][0].is_zero());
    }

    #[test]
    fn test_crust_potential_magnitude() {
        // About 5.8e-4 km^-1 for 3 g/cm^3 with Ye = 0.5.
        let v = matter_potential(3000.0, 1.0);
        assert!((v - 5.76e-4).abs() < 1e-5, "unexpected potential {}", v);
    }

    #[test]
    fn test_antineutrino_flips_potential_sign() {
        let nu = Hamiltonian::build(7.5e-5, 2.457e-3, 2800.0, 1.0);
        let anti = Hamiltonian::build(7.5e-5, 2.457e-3, 2800.0, -1.0);
        assert_eq!(nu.matter()[0][0], -anti.matter()[0][0]);
        assert!(!nu.is_vacuum());
        assert_eq!(nu.matter()[1][1], Complex::zero());
    }
}
