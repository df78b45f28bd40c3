// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod matrix;
pub mod params;
pub mod state;

pub use error::{Flavour, NeutoscError, Result};
pub use params::{OscillationParameters, ParametersBuilder};
pub use state::{Basis, FlavourState, Probabilities};

pub mod constants;
pub use constants::neutosc_constants::{CONV, DEFAULT_STEP_KM, DEFAULT_SUBDIVISIONS, I};
