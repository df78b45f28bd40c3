// src/simulation/engine.rs

use tracing::debug;

use crate::core::OscillationParameters;
use crate::hamiltonian::Hamiltonian;
use crate::mixing::MixingMatrix;

/// Matrix state derived from a parameter record: `U`, `U†`, `H` and `V`.
/// (Internal visibility)
///
/// Always built in one piece from a record, never patched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct OscillationEngine {
    mixing: MixingMatrix,
    hamiltonian: Hamiltonian,
}

impl OscillationEngine {
    /// Recomputes every matrix from `params`. Pure arithmetic, no failure mode.
    pub(crate) fn build(params: &OscillationParameters) -> Self {
        let mixing = MixingMatrix::from_parameters(params);
        let hamiltonian = Hamiltonian::from_parameters(params);
        debug!(
            antineutrino = params.antineutrino,
            density = params.density,
            potential = hamiltonian.matter()[0][0].re,
            "built oscillation engine"
        );
        Self { mixing, hamiltonian }
    }

    pub(crate) fn mixing(&self) -> &MixingMatrix {
        &self.mixing
    }

    pub(crate) fn hamiltonian(&self) -> &Hamiltonian {
        &self.hamiltonian
    }
}
