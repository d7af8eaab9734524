//! Bernstein–Vazirani hidden-string recovery

use crate::error::Result;
use crate::recorder::Operations;
use sparq_core::Qubit;

/// Recover the hidden bitstring of a dot-product oracle in one query.
///
/// The oracle receives the recorder and must apply its CNOTs from the data
/// qubits onto the ancilla (a CNOT from data qubit *k* encodes a 1 at
/// position *k* of the hidden string). Returns the measured data register.
pub fn run_bernstein_vazirani<F>(
    ops: &mut Operations<'_>,
    data: &[Qubit],
    ancilla: Qubit,
    oracle: F,
) -> Result<Vec<u8>>
where
    F: FnOnce(&mut Operations<'_>) -> Result<()>,
{
    // Ancilla in |−⟩ turns the oracle's bit flips into phase kicks.
    ops.x(ancilla)?;
    ops.h(ancilla)?;
    for &q in data {
        ops.h(q)?;
    }

    oracle(ops)?;

    for &q in data {
        ops.h(q)?;
    }

    data.iter().map(|&q| ops.m(q)).collect()
}
