// src/validation/mod.rs

//! Boundary validation of parameters and consistency checks on engine output.
//!
//! The numeric routines accept any input and propagate NaN/Inf silently.
//! These functions are the place where non-physical inputs get rejected and
//! where results can be checked against unitarity.

use crate::core::constants::neutosc_constants::MAX_TRAJECTORY_STEPS;
use crate::core::matrix::{self, Matrix3};
use crate::core::{NeutoscError, OscillationParameters, Probabilities, Result};

// Default tolerance values (can be overridden by caller)
const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;
const DEFAULT_UNITARITY_TOLERANCE: f64 = 1e-12;

fn finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(NeutoscError::InvalidParameter { name, value, reason: "must be finite" })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<()> {
    finite(name, value)?;
    if value < 0.0 {
        return Err(NeutoscError::InvalidParameter { name, value, reason: "must not be negative" });
    }
    Ok(())
}

/// Rejects parameter records that cannot describe a physical propagation.
///
/// Checks that every field is finite, that the energy is strictly positive
/// and that baseline and density are not negative. Angles and mass
/// splittings are not range-checked: any real value yields a valid unitary
/// evolution, and negative Δm²₃₁ describes the inverted ordering.
pub fn validate_parameters(params: &OscillationParameters) -> Result<()> {
    finite("energy", params.energy)?;
    if params.energy <= 0.0 {
        return Err(NeutoscError::InvalidParameter {
            name: "energy",
            value: params.energy,
            reason: "must be positive",
        });
    }
    non_negative("length", params.length)?;
    non_negative("density", params.density)?;
    finite("theta12", params.theta12)?;
    finite("theta23", params.theta23)?;
    finite("theta13", params.theta13)?;
    finite("dm21_sq", params.dm21_sq)?;
    finite("dm31_sq", params.dm31_sq)?;
    finite("delta_cp", params.delta_cp)?;
    Ok(())
}

/// Rejects integrator step sizes that are zero, negative or non-finite.
pub fn validate_step(step: f64) -> Result<()> {
    finite("step", step)?;
    if step <= 0.0 {
        return Err(NeutoscError::InvalidParameter { name: "step", value: step, reason: "must be positive" });
    }
    Ok(())
}

/// Rejects an integration whose step count `length / step` exceeds
/// `MAX_TRAJECTORY_STEPS`, along with any step `validate_step` rejects.
pub fn validate_trajectory(length: f64, step: f64) -> Result<()> {
    validate_step(step)?;
    non_negative("length", length)?;
    if length / step > MAX_TRAJECTORY_STEPS as f64 {
        return Err(NeutoscError::InvalidParameter {
            name: "step",
            value: step,
            reason: "too small for the baseline, trajectory would exceed the step limit",
        });
    }
    Ok(())
}

/// Rejects a zero Lie–Trotter subdivision count.
pub fn validate_subdivisions(subdivisions: u32) -> Result<()> {
    if subdivisions == 0 {
        return Err(NeutoscError::InvalidParameter {
            name: "subdivisions",
            value: 0.0,
            reason: "must be at least 1",
        });
    }
    Ok(())
}

/// Checks that the probabilities sum to 1.
///
/// # Arguments
/// * `probabilities` - Output of a propagator.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to 1e-9.
///
/// # Returns
/// * `Err(NeutoscError::Incoherence)` if the sum deviates or is not finite.
pub fn check_normalization(probabilities: &Probabilities, tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let total: f64 = probabilities.iter().sum();
    if !total.is_finite() || (total - 1.0).abs() > effective_tolerance {
        Err(NeutoscError::Incoherence {
            message: format!(
                "Probability normalization failed. Sum(P) = {} (Deviation > {})",
                total, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}

/// Checks that `m · m†` is the identity.
///
/// # Arguments
/// * `m` - Matrix to test, e.g. the mixing matrix or an evolution operator.
/// * `tolerance` - Largest allowed entry-wise deviation. Defaults to 1e-12.
pub fn check_unitarity(m: &Matrix3, tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_UNITARITY_TOLERANCE);
    let deviation = matrix::max_abs_diff(&matrix::mul(m, &matrix::adjoint(m)), &matrix::identity());
    if deviation.is_finite() && deviation <= effective_tolerance {
        Ok(())
    } else {
        Err(NeutoscError::Incoherence {
            message: format!("Matrix is not unitary: max |M M^dagger - I| = {:.3e}", deviation),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_parameters(&OscillationParameters::default()).is_ok());
    }

    #[test]
    fn test_rejects_non_physical_inputs() {
        let base = OscillationParameters::default();
        let cases = [
            ("energy", OscillationParameters { energy: -1.0, ..base }),
            ("energy", OscillationParameters { energy: 0.0, ..base }),
            ("length", OscillationParameters { length: -5.0, ..base }),
            ("density", OscillationParameters { density: -0.1, ..base }),
            ("theta13", OscillationParameters { theta13: f64::NAN, ..base }),
            ("dm31_sq", OscillationParameters { dm31_sq: f64::INFINITY, ..base }),
        ];
        for (expected, params) in cases {
            match validate_parameters(&params) {
                Err(NeutoscError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
                other => panic!("expected rejection of {}, got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_inverted_ordering_is_allowed() {
        let params = OscillationParameters { dm31_sq: -2.498e-3, ..OscillationParameters::default() };
        assert!(validate_parameters(&params).is_ok());
    }

    #[test]
    fn test_step_and_subdivisions() {
        assert!(validate_step(0.1).is_ok());
        assert!(validate_step(0.0).is_err());
        assert!(validate_step(f64::NAN).is_err());
        assert!(validate_subdivisions(1).is_ok());
        assert!(validate_subdivisions(0).is_err());
    }

    #[test]
    fn test_trajectory_step_limit() {
        assert!(validate_trajectory(50.0, 0.1).is_ok());
        assert!(validate_trajectory(0.0, 1e-300).is_ok());
        assert!(validate_trajectory(-1.0, 0.1).is_err());
        for (length, step) in [(1.0, 1e-300), (1e6, 1e-9), (1e300, 1e-300)] {
            assert!(
                matches!(validate_trajectory(length, step), Err(NeutoscError::InvalidParameter { name: "step", .. })),
                "length {} step {} accepted",
                length,
                step
            );
        }
    }

    #[test]
    fn test_check_normalization() {
        assert!(check_normalization(&[0.2, 0.3, 0.5], None).is_ok());
        assert!(check_normalization(&[0.2, 0.3, 0.6], None).is_err());
        assert!(check_normalization(&[0.2, 0.3, 0.6], Some(0.2)).is_ok());
        assert!(check_normalization(&[f64::NAN, 0.0, 0.0], Some(10.0)).is_err());
    }

    #[test]
    fn test_check_unitarity() {
        assert!(check_unitarity(&matrix::identity(), None).is_ok());
        let doubled = matrix::scale(&matrix::identity(), Complex::new(2.0, 0.0));
        assert!(matches!(check_unitarity(&doubled, None), Err(NeutoscError::Incoherence { .. })));
    }
}
