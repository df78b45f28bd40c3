// src/propagation/numeric.rs

use crate::core::constants::neutosc_constants::{CONV, I, MAX_TRAJECTORY_STEPS, STEP_COUNT_TOLERANCE};
use crate::core::matrix;
use crate::core::{Basis, Flavour, FlavourState, Probabilities};
use crate::hamiltonian::Hamiltonian;
use crate::mixing::MixingMatrix;

/// Step-by-step integration of the evolution equation in the mass basis.
///
/// Each step applies the explicit Euler update
/// `ψ ← ψ − i·H·c·(step/E)·ψ` and records the flavour probabilities, so the
/// output is a full trajectory rather than a single end point. Euler steps are
/// not unitary: the norm grows by roughly `(H·c·step/E)²/2` per step, which
/// makes the method useful for validation and short baselines only.
#[derive(Debug, Clone, Copy)]
pub struct NumericIntegrator<'a> {
    mixing: &'a MixingMatrix,
    hamiltonian: &'a Hamiltonian,
}

impl<'a> NumericIntegrator<'a> {
    /// Borrows the engine state of an oscillator.
    pub fn new(mixing: &'a MixingMatrix, hamiltonian: &'a Hamiltonian) -> Self {
        Self { mixing, hamiltonian }
    }

    /// Number of Euler steps taken for a baseline: `⌈length / step⌉`.
    ///
    /// A ratio within a relative `1e-9` of an integer counts as that integer,
    /// so `1.1 / 0.1` gives 11 steps rather than 12.
    pub fn step_count(length: f64, step: f64) -> usize {
        let ratio = length / step;
        let nearest = ratio.round();
        if (ratio - nearest).abs() <= STEP_COUNT_TOLERANCE * nearest.max(1.0) {
            nearest as usize
        } else {
            ratio.ceil() as usize
        }
    }

    /// Probabilities after every step, starting with the untouched initial state.
    ///
    /// The returned sequence has `⌈length / step⌉ + 1` entries. The state is
    /// brought back to the flavour basis on every step rather than once at the
    /// end. `step` is expected to be positive and the step count bounded;
    /// [`crate::validation::validate_trajectory`] checks both.
    pub fn trajectory(&self, initial: Flavour, energy: f64, length: f64, step: f64) -> Vec<Probabilities> {
        let steps = Self::step_count(length, step);
        let mut result = Vec::with_capacity(steps.min(MAX_TRAJECTORY_STEPS) + 1);

        let mut state = FlavourState::pure(initial).transformed(self.mixing.u_dagger(), Basis::Mass);
        result.push(state.transformed(self.mixing.u(), Basis::Flavour).probabilities());

        let rates = matrix::diagonal(self.hamiltonian.mass());
        let factor = -I * (CONV * step / energy);
        for _ in 0..steps {
            for (amplitude, rate) in state.amplitudes_mut().iter_mut().zip(rates.iter()) {
                let delta = factor * rate * *amplitude;
                *amplitude += delta;
            }
            result.push(state.transformed(self.mixing.u(), Basis::Flavour).probabilities());
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OscillationParameters;

    #[test]
    fn test_step_count_rounds_up() {
        assert_eq!(NumericIntegrator::step_count(1.0, 0.1), 10);
        assert_eq!(NumericIntegrator::step_count(1.05, 0.1), 11);
        assert_eq!(NumericIntegrator::step_count(0.0, 0.1), 0);
        assert_eq!(NumericIntegrator::step_count(1.1, 0.1), 11);
        assert_eq!(NumericIntegrator::step_count(0.3, 0.1), 3);
        assert_eq!(NumericIntegrator::step_count(1.1000001, 0.1), 12);
    }

    #[test]
    fn test_trajectory_starts_at_initial_flavour() {
        let p = OscillationParameters::default();
        let (mix, ham) = (MixingMatrix::from_parameters(&p), Hamiltonian::from_parameters(&p));
        let traj = NumericIntegrator::new(&mix, &ham).trajectory(Flavour::Muon, 1.0, 1.0, 0.1);
        assert_eq!(traj.len(), 11);
        assert!((traj[0][1] - 1.0).abs() < 1e-12);
        assert!(traj[0][0] < 1e-12 && traj[0][2] < 1e-12);
    }

    #[test]
    fn test_zero_length_yields_single_point() {
        let p = OscillationParameters::default();
        let (mix, ham) = (MixingMatrix::from_parameters(&p), Hamiltonian::from_parameters(&p));
        let traj = NumericIntegrator::new(&mix, &ham).trajectory(Flavour::Electron, 1.0, 0.0, 0.1);
        assert_eq!(traj.len(), 1);
    }
}
