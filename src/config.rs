// src/config.rs

//! Configuration of the `neutosc` driver.
//!
//! Sources, later ones overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. A JSON file (`--config`, or `neutosc.json` in the working directory)
//! 3. Environment variables (`NEUTOSC_*`)
//! 4. CLI arguments

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants::neutosc_constants::{DEFAULT_STEP_KM, DEFAULT_SUBDIVISIONS};
use crate::core::{NeutoscError, OscillationParameters, Result};
use crate::export::DEFAULT_FILENAME;
use crate::sweep::{SweepParameter, DEFAULT_SWEEP_STEPS};
use crate::validation::{validate_parameters, validate_step, validate_subdivisions};

/// File looked up when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "neutosc.json";

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Oscillation parameters
    #[serde(default)]
    pub parameters: OscillationParameters,

    /// Numerical settings
    #[serde(default)]
    pub engine: EngineConfig,

    /// Sweep settings
    #[serde(default)]
    pub sweep: SweepConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// An explicit `config_path` must exist; the default file is optional.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() { Self::from_file(path)? } else { Config::default() }
            }
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parses a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading configuration");
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = env::var("NEUTOSC_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = env::var("NEUTOSC_OUTPUT") {
            self.output.path = PathBuf::from(val);
        }
        if let Ok(val) = env::var("NEUTOSC_SUBDIVISIONS") {
            self.engine.subdivisions = val
                .parse()
                .map_err(|_| NeutoscError::Config(format!("NEUTOSC_SUBDIVISIONS is not an integer: '{}'", val)))?;
        }
        Ok(())
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        validate_parameters(&self.parameters)?;
        validate_subdivisions(self.engine.subdivisions)?;
        validate_step(self.engine.step)?;
        if self.sweep.steps == 0 {
            return Err(NeutoscError::Config("sweep.steps cannot be 0".into()));
        }
        Ok(())
    }
}

/// Numerical settings of the propagators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Lie–Trotter slices for matter propagation
    pub subdivisions: u32,
    /// Numeric integrator step in km
    pub step: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { subdivisions: DEFAULT_SUBDIVISIONS, step: DEFAULT_STEP_KM }
    }
}

/// Sweep settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Parameter to sweep
    pub parameter: SweepParameter,
    /// Number of samples
    pub steps: usize,
    /// Evaluate samples on the rayon pool
    pub parallel: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self { parameter: SweepParameter::Energy, steps: DEFAULT_SWEEP_STEPS, parallel: false }
    }
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// CSV file written by sweeps and trajectories
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { path: PathBuf::from(DEFAULT_FILENAME) }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}
