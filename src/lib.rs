// src/lib.rs

//! `neutosc` - Three-flavour neutrino oscillation probabilities
//!
//! Builds the PMNS mixing matrix and the vacuum and matter Hamiltonian terms
//! from a parameter record, then propagates a flavour eigenstate with one of
//! three algorithms: the closed-form vacuum solution, a Lie–Trotter product
//! for constant-density matter, or an explicit Euler integration.
//!
//! ```
//! use neutosc::{Flavour, Oscillator, ParametersBuilder};
//!
//! let params = ParametersBuilder::new()
//!     .flavour(Flavour::Muon)
//!     .energy(2.5)
//!     .length(1300.0)
//!     .density(2848.0)
//!     .build()?;
//! let oscillator = Oscillator::new(params)?;
//!
//! let p = oscillator.evaluate();
//! assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-9);
//! # Ok::<(), neutosc::NeutoscError>(())
//! ```

pub mod core;
pub mod mixing;
pub mod hamiltonian;
pub mod propagation;
pub mod simulation;
pub mod sweep;
pub mod export;
pub mod config;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use crate::core::{Flavour, FlavourState, NeutoscError, OscillationParameters, ParametersBuilder, Probabilities, Result};
pub use mixing::MixingMatrix;
pub use hamiltonian::Hamiltonian;
pub use propagation::{MatterPropagator, NumericIntegrator, Propagator, VacuumPropagator};
pub use simulation::{Oscillator, ProbabilityCurve};
pub use sweep::{par_sweep, sweep, SweepParameter};
pub use export::{export_csv, write_csv};
pub use config::Config;
pub use validation::{
    check_normalization,
    check_unitarity,
    validate_parameters,
    validate_trajectory,
};

// Example: Energy sweep exported to CSV
// Sweeps the energy of a muon neutrino over a fixed baseline and writes
// the survival and appearance curves in the `x,e,mu,tau` format.
/// ```
/// use neutosc::{export::write_csv, sweep, Flavour, Oscillator, ParametersBuilder, SweepParameter};
///
/// let params = ParametersBuilder::new()
///     .flavour(Flavour::Muon)
///     .energy(5.0)
///     .length(1300.0)
///     .build()
///     .unwrap();
/// let oscillator = Oscillator::new(params).unwrap();
///
/// // 100 samples from 0 GeV up to 4.95 GeV. The first sample sits at zero
/// // energy and is not finite; everything after it is.
/// let curve = sweep(&oscillator, SweepParameter::Energy, 100).unwrap();
/// assert_eq!(curve.len(), 100);
/// assert_eq!(curve.non_finite_indices(), vec![0]);
///
/// let mut csv = Vec::new();
/// write_csv(&curve, &mut csv).unwrap();
/// let text = String::from_utf8(csv).unwrap();
/// assert!(text.starts_with("x,e,mu,tau\n"));
/// assert_eq!(text.lines().count(), 101);
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
