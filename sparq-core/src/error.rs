//! Error types shared across the workspace

use crate::Qubit;
use thiserror::Error;

/// Errors surfaced by the user-facing layers
///
/// Every variant is fatal to the scope that raised it; the scope's cleanup
/// path still runs, and a release failure takes precedence over whatever
/// the callback returned.
#[derive(Debug, Error)]
pub enum QuantumError {
    /// Operating on a handle that was not allocated in the current scope
    #[error("qubit {0} is not allocated in this scope")]
    UnknownQubit(Qubit),

    /// Control and target of a controlled gate must differ
    #[error("gate '{gate}' uses qubit {qubit} as both control and target")]
    ControlIsTarget { gate: &'static str, qubit: Qubit },

    /// The same qubit appears twice in a multi-qubit gate
    #[error("gate '{gate}' requires distinct qubits, got {qubit} twice")]
    DuplicateQubit { gate: &'static str, qubit: Qubit },

    /// Scope-end release of a qubit that is not in |0⟩
    #[error("qubit {qubit} must be reset before release (p1 = {p_one:.3e})")]
    ReleaseNotZero { qubit: Qubit, p_one: f64 },

    /// A guard or result query hit a qubit with no recorded measurement
    #[error("no measurement recorded for qubit {0}")]
    NoMeasurement(Qubit),

    /// A probability parameter fell outside [0, 1]
    #[error("{name} must be in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    /// Request outside what the closed gate catalog can express
    #[error("unsupported: {0}")]
    Unsupported(String),
}

impl QuantumError {
    /// Create a control-equals-target error
    pub fn control_is_target(gate: &'static str, qubit: Qubit) -> Self {
        Self::ControlIsTarget { gate, qubit }
    }

    /// Create a duplicate-qubit error
    pub fn duplicate_qubit(gate: &'static str, qubit: Qubit) -> Self {
        Self::DuplicateQubit { gate, qubit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QubitManager;

    #[test]
    fn test_release_error_names_the_qubit() {
        let mut manager = QubitManager::new();
        let q = manager.allocate();
        let err = QuantumError::ReleaseNotZero {
            qubit: q,
            p_one: 0.5,
        };
        let msg = format!("{}", err);
        assert!(msg.contains(&format!("{}", q)));
        assert!(msg.contains("reset before release"));
    }

    #[test]
    fn test_probability_error_carries_value() {
        let err = QuantumError::InvalidProbability {
            name: "gate_error",
            value: 1.5,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("gate_error"));
        assert!(msg.contains("1.5"));
    }
}
