//! Decomposition to the native basis {U3, CNOT}
//!
//! A stateless single pass over the instruction list. Each high-level gate
//! expands to its fixed native form; everything already native, meta, or
//! unrecognized passes through unchanged. If/While bodies are left alone:
//! they compile at the flush that executes their enclosing program.

use sparq_core::{GateKind, Instruction, Qubit};
use std::f64::consts::{FRAC_PI_2, PI};

fn u3_on(q: Qubit, theta: f64, phi: f64, lambda: f64) -> Instruction {
    Instruction::gate(GateKind::U3, &[q], &[theta, phi, lambda])
}

fn cnot_on(control: Qubit, target: Qubit) -> Instruction {
    Instruction::gate(GateKind::Cnot, &[control, target], &[])
}

fn expand(op: Instruction, out: &mut Vec<Instruction>) {
    match op.gate {
        GateKind::H => out.push(u3_on(op.qubits[0], FRAC_PI_2, 0.0, PI)),
        GateKind::X => out.push(u3_on(op.qubits[0], PI, 0.0, PI)),
        GateKind::Y => out.push(u3_on(op.qubits[0], PI, FRAC_PI_2, FRAC_PI_2)),
        GateKind::Z => out.push(u3_on(op.qubits[0], 0.0, 0.0, PI)),
        GateKind::Rx => out.push(u3_on(op.qubits[0], op.params[0], -FRAC_PI_2, FRAC_PI_2)),
        GateKind::Ry => out.push(u3_on(op.qubits[0], op.params[0], 0.0, 0.0)),
        GateKind::Rz => out.push(u3_on(op.qubits[0], 0.0, 0.0, op.params[0])),
        GateKind::Swap => {
            let (a, b) = (op.qubits[0], op.qubits[1]);
            out.push(cnot_on(a, b));
            out.push(cnot_on(b, a));
            out.push(cnot_on(a, b));
        }
        GateKind::Cz => {
            // CZ = (I ⊗ H) · CNOT · (I ⊗ H)
            let (control, target) = (op.qubits[0], op.qubits[1]);
            out.push(u3_on(target, FRAC_PI_2, 0.0, PI));
            out.push(cnot_on(control, target));
            out.push(u3_on(target, FRAC_PI_2, 0.0, PI));
        }
        _ => out.push(op),
    }
}

/// Expand every instruction to the native basis.
pub fn transpile(input: Vec<Instruction>) -> Vec<Instruction> {
    let mut out = Vec::with_capacity(input.len());
    for op in input {
        expand(op, &mut out);
    }
    out
}
