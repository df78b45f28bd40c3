//! Error handling logic

use std::fmt;
use thiserror::Error;

/// Neutrino flavour, doubling as the index into flavour-basis vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavour {
    /// νe, index 0.
    #[default]
    Electron,
    /// νμ, index 1.
    Muon,
    /// ντ, index 2.
    Tau,
}

impl Flavour {
    /// All flavours in index order.
    pub const ALL: [Flavour; 3] = [Flavour::Electron, Flavour::Muon, Flavour::Tau];

    /// Index of this flavour in a flavour-basis vector.
    pub fn index(self) -> usize {
        match self {
            Flavour::Electron => 0,
            Flavour::Muon => 1,
            Flavour::Tau => 2,
        }
    }
}

impl TryFrom<usize> for Flavour {
    type Error = NeutoscError;

    fn try_from(index: usize) -> Result<Self> {
        Flavour::ALL
            .get(index)
            .copied()
            .ok_or(NeutoscError::InvalidFlavour { index })
    }
}

impl fmt::Display for Flavour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Flavour::Electron => "e",
            Flavour::Muon => "mu",
            Flavour::Tau => "tau",
        };
        write!(f, "{}", name)
    }
}

/// Errors raised at the boundary of the engine.
/// The numeric routines themselves never fail; these variants come from
/// validation, post-hoc consistency checks, configuration and export.
#[derive(Debug, Error)]
pub enum NeutoscError {
    /// A flavour index outside {0, 1, 2}.
    #[error("Invalid flavour index {index}: expected 0 (e), 1 (mu) or 2 (tau)")]
    InvalidFlavour {
        /// The rejected index
        index: usize,
    },

    /// A parameter value that is non-finite or outside its physical range.
    #[error("Invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Loss of unitarity or normalization beyond tolerance.
    #[error("Incoherence: {message}")]
    Incoherence {
        /// Incoherence failure message
        message: String,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem failure, e.g. the export file could not be created.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON configuration.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, NeutoscError>;
