//! Engine-level error types

use sparq_core::Qubit;
use thiserror::Error;

/// Errors raised while interpreting a compiled instruction stream
///
/// These indicate a malformed program reaching the engine; the recorder
/// and compiler are expected to keep them unreachable in normal use.
#[derive(Debug, Error)]
pub enum SimulatorError {
    /// A gate name outside the recognized set reached the engine
    #[error("unknown gate '{0}' reached the simulator")]
    UnknownGate(String),

    /// An instruction carried the wrong number of qubit operands
    #[error("gate '{gate}' expects {expected} qubits, got {actual}")]
    ArityMismatch {
        gate: String,
        expected: usize,
        actual: usize,
    },

    /// An instruction carried the wrong number of angle parameters
    #[error("gate '{gate}' expects {expected} parameters, got {actual}")]
    ParamMismatch {
        gate: String,
        expected: usize,
        actual: usize,
    },

    /// A handle with no position in this simulator's order
    #[error("qubit {0} has no position in this simulator")]
    UnmappedQubit(Qubit),

    /// Collapse requested against an outcome with no probability mass
    #[error("cannot collapse onto outcome {outcome} with probability {probability:.3e}")]
    ImpossibleOutcome { outcome: u8, probability: f64 },

    /// An If/While node without its condition or body
    #[error("control block is missing its condition or body")]
    MalformedBlock,
}

/// Type alias for results in sparq-sim
pub type Result<T> = std::result::Result<T, SimulatorError>;
