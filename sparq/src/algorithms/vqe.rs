//! Hardware-efficient variational ansatz

use crate::error::Result;
use crate::recorder::Operations;
use sparq_core::{QuantumError, Qubit};

/// Apply a hardware-efficient ansatz: alternating layers of per-qubit RY
/// rotations and a linear CNOT entangling chain.
///
/// `params` holds one angle per qubit per layer, so its length must be a
/// multiple of the register width; the layer count follows from it.
pub fn vqe_ansatz(ops: &mut Operations<'_>, qubits: &[Qubit], params: &[f64]) -> Result<()> {
    let n = qubits.len();
    if n == 0 || params.len() % n != 0 {
        return Err(QuantumError::Unsupported(format!(
            "ansatz over {} qubits needs a whole number of {}-angle layers, got {} angles",
            n,
            n,
            params.len()
        ))
        .into());
    }

    for (layer, angles) in params.chunks(n).enumerate() {
        if layer > 0 {
            for pair in qubits.windows(2) {
                ops.cnot(pair[0], pair[1])?;
            }
        }
        for (&q, &theta) in qubits.iter().zip(angles) {
            ops.ry(q, theta)?;
        }
    }
    Ok(())
}
