//! Unified error type for the user-facing surface

use sparq_core::QuantumError;
use sparq_sim::SimulatorError;
use thiserror::Error;

/// Any error a scope can surface
///
/// Usage, physics and release errors come from the recorder and manager;
/// engine errors indicate a malformed instruction stream reaching the
/// simulator. All are fatal to the current scope.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Quantum(#[from] QuantumError),

    #[error(transparent)]
    Simulator(#[from] SimulatorError),
}

/// Type alias for results in sparq
pub type Result<T> = std::result::Result<T, Error>;
