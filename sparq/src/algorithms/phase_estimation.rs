//! Phase estimation, textbook and iterative

use super::qft::inverse_qft;
use crate::error::Result;
use crate::recorder::Operations;
use sparq_core::Qubit;
use std::f64::consts::PI;

/// Textbook quantum phase estimation.
///
/// `controlled_power(ops, control, k)` must apply the controlled U^(2^k)
/// with the given control qubit; the eigenstate register is the oracle's
/// own business. Returns the phase estimate in [0, 1) read from the
/// counting register, most significant bit at `counting[0]`.
pub fn quantum_phase_estimation<F>(
    ops: &mut Operations<'_>,
    counting: &[Qubit],
    mut controlled_power: F,
) -> Result<f64>
where
    F: FnMut(&mut Operations<'_>, Qubit, u32) -> Result<()>,
{
    let n = counting.len();
    for &q in counting {
        ops.h(q)?;
    }
    for (i, &q) in counting.iter().enumerate() {
        controlled_power(ops, q, (n - 1 - i) as u32)?;
    }
    inverse_qft(ops, counting)?;

    let mut phase = 0.0;
    for (i, &q) in counting.iter().enumerate() {
        if ops.m(q)? == 1 {
            phase += 0.5f64.powi(i as i32 + 1);
        }
    }
    Ok(phase)
}

/// Iterative phase estimation with a single probe qubit.
///
/// Measures `bits` binary digits of the phase, least significant first,
/// feeding each measured digit back as a classical Z-rotation before the
/// next round. The probe is reset between rounds, so the whole estimate
/// costs one ancilla.
pub fn iterative_phase_estimation<F>(
    ops: &mut Operations<'_>,
    probe: Qubit,
    bits: u32,
    mut controlled_power: F,
) -> Result<f64>
where
    F: FnMut(&mut Operations<'_>, Qubit, u32) -> Result<()>,
{
    let m = bits as usize;
    let mut digits = vec![0u8; m + 1]; // 1-indexed: digit k weighs 2^-k

    for k in (1..=m).rev() {
        ops.h(probe)?;
        controlled_power(ops, probe, (k - 1) as u32)?;

        // Rotate out the digits already pinned down in earlier rounds.
        let mut omega = 0.0;
        for j in (k + 1)..=m {
            if digits[j] == 1 {
                omega += 0.5f64.powi((j - k + 1) as i32);
            }
        }
        if omega != 0.0 {
            ops.rz(probe, -2.0 * PI * omega)?;
        }

        ops.h(probe)?;
        digits[k] = ops.m(probe)?;
        ops.reset(probe)?;
    }

    let mut phase = 0.0;
    for k in 1..=m {
        if digits[k] == 1 {
            phase += 0.5f64.powi(k as i32);
        }
    }
    Ok(phase)
}
