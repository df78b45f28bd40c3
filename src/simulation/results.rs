// src/simulation/results.rs
use crate::core::Probabilities;
use std::fmt;

/// An ordered sequence of probability vectors sampled along one variable.
///
/// Sample `i` sits at `x = i · (x_final / len)`, the convention used by the
/// CSV export: `x_final` is the value the sequence runs up to (energy or
/// baseline), and the last sample lies one spacing short of it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityCurve {
    x_final: f64,
    points: Vec<Probabilities>,
}

impl ProbabilityCurve {
    /// Wraps samples together with the final value of the swept variable.
    pub fn new(x_final: f64, points: Vec<Probabilities>) -> Self {
        Self { x_final, points }
    }

    /// Final value of the swept variable.
    pub fn x_final(&self) -> f64 {
        self.x_final
    }

    /// All samples in order.
    pub fn points(&self) -> &[Probabilities] {
        &self.points
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Abscissa of sample `index`.
    pub fn x_at(&self, index: usize) -> f64 {
        index as f64 * (self.x_final / self.points.len() as f64)
    }

    /// Indices of samples containing NaN or infinite probabilities.
    pub fn non_finite_indices(&self) -> Vec<usize> {
        self.points
            .iter()
            .enumerate()
            .filter(|(_, p)| p.iter().any(|v| !v.is_finite()))
            .map(|(i, _)| i)
            .collect()
    }
}

impl fmt::Display for ProbabilityCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Probability curve ({} samples up to {}):", self.len(), self.x_final)?;
        if self.points.is_empty() {
            writeln!(f, "  No samples.")?;
        }
        for (i, p) in self.points.iter().enumerate() {
            writeln!(f, "  {:>12.4}  e={:.6} mu={:.6} tau={:.6}", self.x_at(i), p[0], p[1], p[2])?;
        }
        Ok(())
    }
}
