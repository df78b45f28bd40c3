// src/simulation/mod.rs

//! The oscillation facade.
//!
//! [`Oscillator`] owns a parameter record and the matrix state built from it,
//! and dispatches between vacuum and matter propagation. Parameters are only
//! changed through [`Oscillator::update`] or [`Oscillator::with_parameters`],
//! both of which rebuild, so the matrices can never lag behind the record.

mod results;
pub(crate) mod engine;

pub use results::ProbabilityCurve;

use tracing::{debug, trace};

use crate::core::constants::neutosc_constants::DEFAULT_SUBDIVISIONS;
use crate::core::{Flavour, OscillationParameters, Probabilities, Result};
use crate::hamiltonian::Hamiltonian;
use crate::mixing::MixingMatrix;
use crate::propagation::{MatterPropagator, NumericIntegrator, Propagator, VacuumPropagator};
use crate::validation::{validate_parameters, validate_subdivisions, validate_trajectory};
use engine::OscillationEngine;

/// Computes oscillation probabilities for one parameter record.
///
/// Each oscillator owns its state outright, so independent oscillators can be
/// evaluated on different threads without coordination.
#[derive(Debug, Clone, PartialEq)]
pub struct Oscillator {
    params: OscillationParameters,
    engine: OscillationEngine,
    subdivisions: u32,
}

impl Default for Oscillator {
    /// Built from [`OscillationParameters::default`] with 128 matter subdivisions.
    fn default() -> Self {
        let params = OscillationParameters::default();
        Self {
            engine: OscillationEngine::build(&params),
            params,
            subdivisions: DEFAULT_SUBDIVISIONS,
        }
    }
}

impl Oscillator {
    /// Validates `params` and builds the matrix state.
    ///
    /// # Errors
    /// `NeutoscError::InvalidParameter` if the record fails
    /// [`validate_parameters`].
    pub fn new(params: OscillationParameters) -> Result<Self> {
        validate_parameters(&params)?;
        Ok(Self {
            engine: OscillationEngine::build(&params),
            params,
            subdivisions: DEFAULT_SUBDIVISIONS,
        })
    }

    /// Sets the number of Lie–Trotter slices used for matter propagation.
    ///
    /// # Errors
    /// `NeutoscError::InvalidParameter` if `subdivisions` is zero.
    pub fn with_subdivisions(mut self, subdivisions: u32) -> Result<Self> {
        validate_subdivisions(subdivisions)?;
        self.subdivisions = subdivisions;
        Ok(self)
    }

    /// Number of Lie–Trotter slices used for matter propagation.
    pub fn subdivisions(&self) -> u32 {
        self.subdivisions
    }

    /// The current parameter record.
    pub fn parameters(&self) -> &OscillationParameters {
        &self.params
    }

    /// The current mixing matrix and its adjoint.
    pub fn mixing(&self) -> &MixingMatrix {
        self.engine.mixing()
    }

    /// The current mass and matter terms.
    pub fn hamiltonian(&self) -> &Hamiltonian {
        self.engine.hamiltonian()
    }

    /// Recomputes `U`, `U†`, `H` and `V` from the current parameters.
    pub fn rebuild(&mut self) {
        self.engine = OscillationEngine::build(&self.params);
    }

    /// Replaces the parameter record and rebuilds.
    ///
    /// On error the oscillator is left untouched.
    pub fn update(&mut self, params: OscillationParameters) -> Result<()> {
        validate_parameters(&params)?;
        debug!(mixing_changed = !self.params.same_mixing(&params), "updating oscillation parameters");
        self.params = params;
        self.rebuild();
        Ok(())
    }

    /// A new oscillator with `params` and the same subdivision count.
    pub fn with_parameters(&self, params: OscillationParameters) -> Result<Self> {
        let mut next = self.clone();
        next.update(params)?;
        Ok(next)
    }

    /// Final flavour probabilities for the current parameters.
    ///
    /// Uses the closed-form vacuum solution when the density is exactly zero
    /// and the Lie–Trotter matter propagator otherwise.
    pub fn evaluate(&self) -> Probabilities {
        if self.params.is_vacuum() {
            self.evaluate_vacuum()
        } else {
            self.evaluate_matter()
        }
    }

    /// Closed-form vacuum propagation, ignoring the matter potential.
    pub fn evaluate_vacuum(&self) -> Probabilities {
        trace!("vacuum propagation");
        VacuumPropagator::new(self.mixing(), self.hamiltonian()).propagate(
            self.params.initial_flavour,
            self.params.energy,
            self.params.length,
        )
    }

    /// Lie–Trotter matter propagation, whatever the density.
    pub fn evaluate_matter(&self) -> Probabilities {
        self.matter_propagator().propagate(self.params.initial_flavour, self.params.energy, self.params.length)
    }

    /// A-priori bound on the matter propagator error for the current parameters.
    pub fn matter_error_bound(&self) -> f64 {
        self.matter_propagator().error_bound(self.params.energy, self.params.length)
    }

    /// Probabilities after every step of an Euler integration over `length` km.
    ///
    /// Uses the current mixing matrix and mass splittings; energy, baseline
    /// and initial flavour come from the arguments. The curve holds
    /// `⌈length / step⌉ + 1` samples and runs up to `length`.
    ///
    /// # Errors
    /// `NeutoscError::InvalidParameter` for a non-positive `step` or `energy`,
    /// a negative `length`, or a step so small that the trajectory would
    /// exceed `MAX_TRAJECTORY_STEPS`.
    pub fn integrate(&self, initial: Flavour, energy: f64, length: f64, step: f64) -> Result<ProbabilityCurve> {
        validate_parameters(&OscillationParameters { energy, length, ..self.params })?;
        validate_trajectory(length, step)?;
        let points = NumericIntegrator::new(self.mixing(), self.hamiltonian()).trajectory(initial, energy, length, step);
        Ok(ProbabilityCurve::new(length, points))
    }

    /// Builds a throwaway engine for `params` and evaluates it with this
    /// oscillator's subdivision count. Skips validation; sweep samples may
    /// legitimately sit at zero energy.
    pub(crate) fn evaluate_sample(&self, params: &OscillationParameters) -> Probabilities {
        let sample = Self {
            params: *params,
            engine: OscillationEngine::build(params),
            subdivisions: self.subdivisions,
        };
        sample.evaluate()
    }

    fn matter_propagator(&self) -> MatterPropagator<'_> {
        MatterPropagator::new(self.mixing(), self.hamiltonian()).with_subdivisions(self.subdivisions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NeutoscError, ParametersBuilder};
    use crate::validation::check_normalization;

    const TEST_TOLERANCE: f64 = 1e-9;

    fn dune(density: f64) -> Result<Oscillator> {
        let params = ParametersBuilder::new()
            .flavour(Flavour::Muon)
            .energy(2.5)
            .length(1300.0)
            .density(density)
            .build()?;
        Oscillator::new(params)
    }

    #[test]
    fn test_default_evaluates_vacuum() -> Result<()> {
        let osc = Oscillator::default();
        let p = osc.evaluate();
        check_normalization(&p, Some(TEST_TOLERANCE))?;
        assert_eq!(p, osc.evaluate_vacuum());
        Ok(())
    }

    #[test]
    fn test_density_selects_matter() -> Result<()> {
        let osc = dune(3000.0)?;
        assert_eq!(osc.evaluate(), osc.evaluate_matter());
        assert_ne!(osc.evaluate(), osc.evaluate_vacuum());
        Ok(())
    }

    #[test]
    fn test_update_rebuilds_matrices() -> Result<()> {
        let mut osc = dune(0.0)?;
        let before = *osc.hamiltonian();
        let params = OscillationParameters { density: 2800.0, ..*osc.parameters() };
        osc.update(params)?;
        assert_ne!(*osc.hamiltonian(), before);
        assert!(!osc.hamiltonian().is_vacuum());
        assert_eq!(osc.parameters().density, 2800.0);
        Ok(())
    }

    #[test]
    fn test_failed_update_keeps_state() -> Result<()> {
        let mut osc = dune(0.0)?;
        let snapshot = osc.clone();
        let bad = OscillationParameters { energy: -1.0, ..*osc.parameters() };
        assert!(matches!(osc.update(bad), Err(NeutoscError::InvalidParameter { .. })));
        assert_eq!(osc, snapshot);
        Ok(())
    }

    #[test]
    fn test_with_parameters_leaves_original() -> Result<()> {
        let osc = dune(0.0)?;
        let other = osc.with_parameters(OscillationParameters { energy: 5.0, ..*osc.parameters() })?;
        assert_eq!(osc.parameters().energy, 2.5);
        assert_eq!(other.parameters().energy, 5.0);
        Ok(())
    }

    #[test]
    fn test_zero_subdivisions_rejected() {
        assert!(Oscillator::default().with_subdivisions(0).is_err());
    }

    #[test]
    fn test_integrate_rejects_bad_step() {
        let osc = Oscillator::default();
        assert!(osc.integrate(Flavour::Electron, 1.0, 10.0, 0.0).is_err());
        assert!(osc.integrate(Flavour::Electron, 0.0, 10.0, 0.1).is_err());
    }

    #[test]
    fn test_integrate_rejects_vanishing_step() {
        let osc = Oscillator::default();
        let result = osc.integrate(Flavour::Electron, 1.0, 1.0, 1e-300);
        assert!(matches!(result, Err(NeutoscError::InvalidParameter { name: "step", .. })));
        let result = osc.integrate(Flavour::Electron, 1.0, 1e6, 1e-9);
        assert!(matches!(result, Err(NeutoscError::InvalidParameter { name: "step", .. })));
    }

    #[test]
    fn test_integrate_counts_steps_on_exact_multiples() -> Result<()> {
        let curve = Oscillator::default().integrate(Flavour::Muon, 1.0, 1.1, 0.1)?;
        assert_eq!(curve.len(), 12);
        Ok(())
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let mut osc = Oscillator::default();
        let before = osc.clone();
        osc.rebuild();
        assert_eq!(osc, before);
    }
}
