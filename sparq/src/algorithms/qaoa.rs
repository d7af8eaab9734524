//! QAOA building block

use crate::error::Result;
use crate::recorder::Operations;
use sparq_core::{QuantumError, Qubit};

/// One QAOA layer: the cost unitary e^(−iγ·Z⊗Z) across each edge followed
/// by the mixer e^(−iβ·X) on every qubit.
///
/// `edges` index into `qubits`.
pub fn qaoa_layer(
    ops: &mut Operations<'_>,
    qubits: &[Qubit],
    edges: &[(usize, usize)],
    gamma: f64,
    beta: f64,
) -> Result<()> {
    for &(a, b) in edges {
        if a >= qubits.len() || b >= qubits.len() {
            return Err(QuantumError::Unsupported(format!(
                "edge ({}, {}) is outside a {}-qubit register",
                a,
                b,
                qubits.len()
            ))
            .into());
        }
        ops.rzz(qubits[a], qubits[b], 2.0 * gamma)?;
    }
    for &q in qubits {
        ops.rx(q, 2.0 * beta)?;
    }
    Ok(())
}
