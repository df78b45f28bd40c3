// src/core/params.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use super::constants::neutosc_constants::{PI, SOLAR_PERIOD_KM_PER_GEV};
use super::error::{Flavour, Result};
use crate::validation::validate_parameters;

/// Inputs of a single oscillation computation.
///
/// A plain record owned by the caller. The engine copies it on construction
/// and never hands out a mutable reference; see [`crate::Oscillator::update`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OscillationParameters {
    /// Flavour the neutrino is produced as.
    pub initial_flavour: Flavour,
    /// `true` for antineutrinos. Flips the sign of δCP and of the matter potential.
    pub antineutrino: bool,
    /// Energy in GeV.
    pub energy: f64,
    /// Baseline in km.
    pub length: f64,
    /// Solar mixing angle θ₁₂ in radians.
    pub theta12: f64,
    /// Atmospheric mixing angle θ₂₃ in radians.
    pub theta23: f64,
    /// Reactor mixing angle θ₁₃ in radians.
    pub theta13: f64,
    /// Δm²₂₁ in eV².
    pub dm21_sq: f64,
    /// Δm²₃₁ in eV².
    pub dm31_sq: f64,
    /// CP-violating phase δ in radians.
    pub delta_cp: f64,
    /// Matter density in kg/m³. Zero selects vacuum propagation.
    pub density: f64,
}

impl Default for OscillationParameters {
    /// An electron neutrino at 0.7 GeV over one full Δm²₂₁ period in vacuum.
    fn default() -> Self {
        let energy = 0.7;
        Self {
            initial_flavour: Flavour::Electron,
            antineutrino: false,
            energy,
            length: SOLAR_PERIOD_KM_PER_GEV * energy,
            theta12: 0.5843,
            theta23: 0.738,
            theta13: 0.148,
            dm21_sq: 7.5e-5,
            dm31_sq: 2.457e-3,
            delta_cp: 1.38 * PI,
            density: 0.0,
        }
    }
}

impl OscillationParameters {
    /// `+1.0` for neutrinos, `-1.0` for antineutrinos.
    pub fn chirality(&self) -> f64 {
        if self.antineutrino { -1.0 } else { 1.0 }
    }

    /// `true` when the mixing angles, mass splittings and δCP all agree.
    /// Flavour, chirality, energy, baseline and density are not compared.
    pub fn same_mixing(&self, other: &OscillationParameters) -> bool {
        self.theta12 == other.theta12
            && self.theta23 == other.theta23
            && self.theta13 == other.theta13
            && self.dm21_sq == other.dm21_sq
            && self.dm31_sq == other.dm31_sq
            && self.delta_cp == other.delta_cp
    }

    /// `true` when the density is exactly zero.
    pub fn is_vacuum(&self) -> bool {
        self.density == 0.0
    }
}

impl fmt::Display for OscillationParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}nu_{} E={} GeV L={} km rho={} kg/m^3",
            if self.antineutrino { "anti-" } else { "" },
            self.initial_flavour,
            self.energy,
            self.length,
            self.density
        )?;
        write!(
            f,
            "  th12={} th23={} th13={} dm21^2={} dm31^2={} dCP={}",
            self.theta12, self.theta23, self.theta13, self.dm21_sq, self.dm31_sq, self.delta_cp
        )
    }
}

//-------------------------------------------------------------------------
// Parameters Builder
//-------------------------------------------------------------------------

/// Method-chaining construction of [`OscillationParameters`], starting from the defaults.
#[derive(Debug, Clone, Default)]
pub struct ParametersBuilder {
    params: OscillationParameters,
}

impl ParametersBuilder {
    /// Starts from [`OscillationParameters::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing record.
    pub fn from_parameters(params: OscillationParameters) -> Self {
        Self { params }
    }

    /// Sets the initial flavour.
    pub fn flavour(mut self, flavour: Flavour) -> Self {
        self.params.initial_flavour = flavour;
        self
    }

    /// Selects neutrino (`false`) or antineutrino (`true`).
    pub fn antineutrino(mut self, anti: bool) -> Self {
        self.params.antineutrino = anti;
        self
    }

    /// Sets the energy in GeV.
    pub fn energy(mut self, energy: f64) -> Self {
        self.params.energy = energy;
        self
    }

    /// Sets the baseline in km.
    pub fn length(mut self, length: f64) -> Self {
        self.params.length = length;
        self
    }

    /// Sets the three mixing angles in radians.
    pub fn angles(mut self, theta12: f64, theta23: f64, theta13: f64) -> Self {
        self.params.theta12 = theta12;
        self.params.theta23 = theta23;
        self.params.theta13 = theta13;
        self
    }

    /// Sets Δm²₂₁ and Δm²₃₁ in eV².
    pub fn mass_splittings(mut self, dm21_sq: f64, dm31_sq: f64) -> Self {
        self.params.dm21_sq = dm21_sq;
        self.params.dm31_sq = dm31_sq;
        self
    }

    /// Sets δCP in radians.
    pub fn delta_cp(mut self, delta_cp: f64) -> Self {
        self.params.delta_cp = delta_cp;
        self
    }

    /// Sets the matter density in kg/m³.
    pub fn density(mut self, density: f64) -> Self {
        self.params.density = density;
        self
    }

    /// Validates and returns the record.
    pub fn build(self) -> Result<OscillationParameters> {
        validate_parameters(&self.params)?;
        Ok(self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NeutoscError;

    #[test]
    fn test_defaults_cover_one_solar_period() {
        let p = OscillationParameters::default();
        assert_eq!(p.initial_flavour, Flavour::Electron);
        assert!(!p.antineutrino);
        assert!((p.length - 33060.7 * 0.7).abs() < 1e-9);
        assert!(p.is_vacuum());
        assert_eq!(p.chirality(), 1.0);
    }

    #[test]
    fn test_same_mixing_ignores_kinematics() {
        let a = OscillationParameters::default();
        let b = ParametersBuilder::from_parameters(a)
            .energy(3.0)
            .length(1300.0)
            .density(2800.0)
            .flavour(Flavour::Muon)
            .antineutrino(true)
            .build()
            .unwrap();
        assert!(a.same_mixing(&b));
        let c = ParametersBuilder::from_parameters(a).delta_cp(0.0).build().unwrap();
        assert!(!a.same_mixing(&c));
    }

    #[test]
    fn test_builder_rejects_negative_density() {
        let result = ParametersBuilder::new().density(-1.0).build();
        assert!(matches!(result, Err(NeutoscError::InvalidParameter { name: "density", .. })));
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let p: OscillationParameters =
            serde_json::from_str(r#"{ "initial_flavour": "muon", "energy": 2.5 }"#).unwrap();
        assert_eq!(p.initial_flavour, Flavour::Muon);
        assert_eq!(p.energy, 2.5);
        assert_eq!(p.theta13, 0.148);
    }
}
