//! Quantum Fourier transform and its inverse

use crate::error::Result;
use crate::recorder::Operations;
use sparq_core::Qubit;
use std::f64::consts::PI;

/// Controlled phase of `theta` between two qubits, synthesized from the
/// closed catalog: CP(θ) = RZ(θ/2) ⊗ RZ(θ/2) · RZZ(−θ/2), up to global
/// phase.
pub(crate) fn controlled_phase(
    ops: &mut Operations<'_>,
    control: Qubit,
    target: Qubit,
    theta: f64,
) -> Result<()> {
    ops.rz(control, theta / 2.0)?;
    ops.rz(target, theta / 2.0)?;
    ops.rzz(control, target, -theta / 2.0)
}

/// Quantum Fourier transform over `qubits`, most significant bit first.
pub fn qft(ops: &mut Operations<'_>, qubits: &[Qubit]) -> Result<()> {
    let n = qubits.len();
    for i in 0..n {
        ops.h(qubits[i])?;
        for j in (i + 1)..n {
            let theta = PI / (1u64 << (j - i)) as f64;
            controlled_phase(ops, qubits[j], qubits[i], theta)?;
        }
    }
    for i in 0..n / 2 {
        ops.swap(qubits[i], qubits[n - 1 - i])?;
    }
    Ok(())
}

/// Exact inverse of [`qft`]: the same circuit reversed with negated angles.
pub fn inverse_qft(ops: &mut Operations<'_>, qubits: &[Qubit]) -> Result<()> {
    let n = qubits.len();
    for i in 0..n / 2 {
        ops.swap(qubits[i], qubits[n - 1 - i])?;
    }
    for i in (0..n).rev() {
        for j in ((i + 1)..n).rev() {
            let theta = PI / (1u64 << (j - i)) as f64;
            controlled_phase(ops, qubits[j], qubits[i], -theta)?;
        }
        ops.h(qubits[i])?;
    }
    Ok(())
}
