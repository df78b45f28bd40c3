// src/sweep/mod.rs

//! Parameter sweeps.
//!
//! A sweep walks one numeric parameter linearly from zero up to (but not
//! including) its current value, evaluates an independently built engine at
//! every sample, and returns the resulting [`ProbabilityCurve`]. The source
//! oscillator is never mutated, so its parameter keeps its original value.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::core::{NeutoscError, OscillationParameters, Probabilities, Result};
use crate::simulation::{Oscillator, ProbabilityCurve};

/// Default number of samples per sweep.
pub const DEFAULT_SWEEP_STEPS: usize = 1000;

/// The numeric field of [`OscillationParameters`] a sweep varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SweepParameter {
    /// Energy in GeV.
    #[default]
    Energy,
    /// Baseline in km.
    Length,
    /// Matter density in kg/m³.
    Density,
    /// θ₁₂ in radians.
    Theta12,
    /// θ₂₃ in radians.
    Theta23,
    /// θ₁₃ in radians.
    Theta13,
    /// Δm²₂₁ in eV².
    Dm21Sq,
    /// Δm²₃₁ in eV².
    Dm31Sq,
    /// δCP in radians.
    DeltaCp,
}

impl SweepParameter {
    /// Every sweepable parameter.
    pub const ALL: [SweepParameter; 9] = [
        SweepParameter::Energy,
        SweepParameter::Length,
        SweepParameter::Density,
        SweepParameter::Theta12,
        SweepParameter::Theta23,
        SweepParameter::Theta13,
        SweepParameter::Dm21Sq,
        SweepParameter::Dm31Sq,
        SweepParameter::DeltaCp,
    ];

    /// Field name, as used in config files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            SweepParameter::Energy => "energy",
            SweepParameter::Length => "length",
            SweepParameter::Density => "density",
            SweepParameter::Theta12 => "theta12",
            SweepParameter::Theta23 => "theta23",
            SweepParameter::Theta13 => "theta13",
            SweepParameter::Dm21Sq => "dm21_sq",
            SweepParameter::Dm31Sq => "dm31_sq",
            SweepParameter::DeltaCp => "delta_cp",
        }
    }

    /// Reads the field from a record.
    pub fn get(self, params: &OscillationParameters) -> f64 {
        let mut copy = *params;
        *self.field(&mut copy)
    }

    /// Writes the field of a record.
    pub fn set(self, params: &mut OscillationParameters, value: f64) {
        *self.field(params) = value;
    }

    fn field(self, params: &mut OscillationParameters) -> &mut f64 {
        match self {
            SweepParameter::Energy => &mut params.energy,
            SweepParameter::Length => &mut params.length,
            SweepParameter::Density => &mut params.density,
            SweepParameter::Theta12 => &mut params.theta12,
            SweepParameter::Theta23 => &mut params.theta23,
            SweepParameter::Theta13 => &mut params.theta13,
            SweepParameter::Dm21Sq => &mut params.dm21_sq,
            SweepParameter::Dm31Sq => &mut params.dm31_sq,
            SweepParameter::DeltaCp => &mut params.delta_cp,
        }
    }
}

impl fmt::Display for SweepParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SweepParameter {
    type Err = NeutoscError;

    fn from_str(s: &str) -> Result<Self> {
        SweepParameter::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| NeutoscError::Config(format!("Unknown sweep parameter '{}'", s)))
    }
}

/// Parameter records of every sample, in order: sample `i` sets the swept
/// field to `i · (original / steps)`.
fn samples(oscillator: &Oscillator, parameter: SweepParameter, steps: usize) -> Result<(f64, Vec<OscillationParameters>)> {
    if steps == 0 {
        return Err(NeutoscError::InvalidParameter {
            name: "steps",
            value: 0.0,
            reason: "a sweep needs at least one sample",
        });
    }
    let base = *oscillator.parameters();
    let original = parameter.get(&base);
    let spacing = original / steps as f64;
    let records = (0..steps)
        .map(|i| {
            let mut p = base;
            parameter.set(&mut p, i as f64 * spacing);
            p
        })
        .collect();
    Ok((original, records))
}

fn finish(parameter: SweepParameter, original: f64, points: Vec<Probabilities>) -> ProbabilityCurve {
    let curve = ProbabilityCurve::new(original, points);
    let bad = curve.non_finite_indices();
    if !bad.is_empty() {
        warn!(
            parameter = parameter.name(),
            count = bad.len(),
            first = bad[0],
            "sweep produced non-finite probabilities"
        );
    }
    curve
}

/// Sweeps `parameter` over `steps` samples, one after another.
///
/// # Errors
/// `NeutoscError::InvalidParameter` if `steps` is zero. Individual samples are
/// not validated: a zero-energy sample yields NaN probabilities and a warning.
pub fn sweep(oscillator: &Oscillator, parameter: SweepParameter, steps: usize) -> Result<ProbabilityCurve> {
    let (original, records) = samples(oscillator, parameter, steps)?;
    debug!(parameter = parameter.name(), steps, original, "serial sweep");
    let points = records.iter().map(|p| oscillator.evaluate_sample(p)).collect();
    Ok(finish(parameter, original, points))
}

/// Same as [`sweep`], with samples evaluated in parallel on the rayon pool.
/// The output is identical to the serial sweep.
pub fn par_sweep(oscillator: &Oscillator, parameter: SweepParameter, steps: usize) -> Result<ProbabilityCurve> {
    let (original, records) = samples(oscillator, parameter, steps)?;
    debug!(parameter = parameter.name(), steps, original, "parallel sweep");
    let points = records.par_iter().map(|p| oscillator.evaluate_sample(p)).collect();
    Ok(finish(parameter, original, points))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_roundtrip_every_field() {
        let mut params = OscillationParameters::default();
        for (i, parameter) in SweepParameter::ALL.into_iter().enumerate() {
            parameter.set(&mut params, i as f64 + 0.5);
            assert_eq!(parameter.get(&params), i as f64 + 0.5, "field {}", parameter);
        }
    }

    #[test]
    fn test_parse_names() -> Result<()> {
        assert_eq!("energy".parse::<SweepParameter>()?, SweepParameter::Energy);
        assert_eq!("DM31_SQ".parse::<SweepParameter>()?, SweepParameter::Dm31Sq);
        assert!("mass".parse::<SweepParameter>().is_err());
        Ok(())
    }

    #[test]
    fn test_zero_steps_rejected() {
        assert!(sweep(&Oscillator::default(), SweepParameter::Length, 0).is_err());
    }

    #[test]
    fn test_length_sweep_starts_at_source() -> Result<()> {
        let osc = Oscillator::default();
        let curve = sweep(&osc, SweepParameter::Length, 10)?;
        assert_eq!(curve.len(), 10);
        assert_eq!(curve.x_final(), osc.parameters().length);
        assert!((curve.points()[0][0] - 1.0).abs() < 1e-12);
        Ok(())
    }
}
