//! Physical and numerical constants used by the oscillation engine.

/// Constants shared by the mixing, Hamiltonian and propagation modules.
pub mod neutosc_constants {
    use num_complex::Complex;

    /// The imaginary unit `i`.
    pub const I: Complex<f64> = Complex::new(0.0, 1.0);

    /// Conversion factor from natural units to GeV, km and eV².
    /// The phase of a mass state after `L` km at `E` GeV is `Δm² · L / E · CONV`.
    pub const CONV: f64 = 2.534;

    /// Reduced Fermi constant times (ħc)², in m².
    pub const FERMI: f64 = 4.54164e-37;

    /// Nucleon mass in kg.
    pub const NUCLEON_MASS: f64 = 1.672e-27;

    /// Electrons per nucleon in ordinary matter.
    pub const ELECTRON_FRACTION: f64 = 0.5;

    /// Metres per kilometre, used to bring the matter potential from m⁻¹ to km⁻¹.
    pub const M_PER_KM: f64 = 1e3;

    /// Default number of Lie–Trotter subdivisions for matter propagation.
    pub const DEFAULT_SUBDIVISIONS: u32 = 128;

    /// Default step of the numeric integrator, in km.
    pub const DEFAULT_STEP_KM: f64 = 0.1;

    /// Largest number of Euler steps a single trajectory may take.
    pub const MAX_TRAJECTORY_STEPS: usize = 10_000_000;

    /// Relative slack when `length / step` lands next to an integer.
    pub const STEP_COUNT_TOLERANCE: f64 = 1e-9;

    /// Baseline over energy (km/GeV) of one full Δm²₂₁ = 7.5e-5 eV² period.
    pub const SOLAR_PERIOD_KM_PER_GEV: f64 = 33060.7;

    /// Used for δCP defaults.
    pub const PI: f64 = std::f64::consts::PI;
}
