//! Grover search

use crate::error::Result;
use crate::recorder::Operations;
use sparq_core::{QuantumError, Qubit};
use std::f64::consts::PI;

/// Inversion about the mean: H X (phase flip about |1...1⟩) X H.
///
/// The multi-controlled Z comes from the closed catalog (Z, CZ, or a
/// Hadamard-conjugated CCX), which bounds the register at three qubits.
fn diffusion(ops: &mut Operations<'_>, qubits: &[Qubit]) -> Result<()> {
    for &q in qubits {
        ops.h(q)?;
    }
    for &q in qubits {
        ops.x(q)?;
    }
    match qubits {
        [q] => ops.z(*q)?,
        [a, b] => ops.cz(*a, *b)?,
        [a, b, c] => {
            ops.h(*c)?;
            ops.ccx(*a, *b, *c)?;
            ops.h(*c)?;
        }
        _ => {
            return Err(QuantumError::Unsupported(format!(
                "diffusion over {} qubits exceeds the closed gate catalog",
                qubits.len()
            ))
            .into())
        }
    }
    for &q in qubits {
        ops.x(q)?;
    }
    for &q in qubits {
        ops.h(q)?;
    }
    Ok(())
}

/// Run Grover search over `qubits` with a phase oracle, returning the
/// measured register.
///
/// The oracle must flip the phase of the marked basis states. Iteration
/// count is ⌊π/4·√2ⁿ⌋, never less than one.
pub fn run_grover<F>(ops: &mut Operations<'_>, qubits: &[Qubit], mut oracle: F) -> Result<Vec<u8>>
where
    F: FnMut(&mut Operations<'_>) -> Result<()>,
{
    if qubits.is_empty() {
        return Err(QuantumError::Unsupported("empty search register".into()).into());
    }

    for &q in qubits {
        ops.h(q)?;
    }

    let dimension = 2.0f64.powi(qubits.len() as i32);
    let iterations = ((PI / 4.0) * dimension.sqrt()).floor().max(1.0) as usize;
    for _ in 0..iterations {
        oracle(ops)?;
        diffusion(ops, qubits)?;
    }

    qubits.iter().map(|&q| ops.m(q)).collect()
}
