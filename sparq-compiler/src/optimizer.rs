//! Algebraic circuit simplification
//!
//! A single forward sweep builds an output list while each qubit's wire
//! keeps a trail of slot indices into it. Incoming gates look back along
//! their wires for a partner to merge with or cancel against; the first
//! non-commuting op on a wire closes the window. Merging rewrites the
//! partner slot in place, cancellation nulls it.

use ahash::AHashMap;
use sparq_core::{GateKind, Instruction, Qubit};
use std::f64::consts::TAU;

/// Angle comparison tolerance for identity detection.
const ANGLE_TOLERANCE: f64 = 1e-10;

/// Reduce an angle into [0, 2π).
fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}

/// Whether an angle is ≡ 0 (mod 2π) within tolerance.
fn is_zero_angle(angle: f64) -> bool {
    let reduced = normalize_angle(angle);
    reduced < ANGLE_TOLERANCE || TAU - reduced < ANGLE_TOLERANCE
}

/// Whether a gate is an identity up to global phase.
fn is_identity(op: &Instruction) -> bool {
    match op.gate {
        GateKind::Rx | GateKind::Ry | GateKind::Rz => is_zero_angle(op.params[0]),
        GateKind::U3 => op.params.iter().copied().all(is_zero_angle),
        _ => false,
    }
}

/// Gates that walk their wires looking for a merge or cancel partner.
/// Blocks, meta ops, Ccx, Rzz and custom gates only ever append.
fn initiates_lookback(op: &Instruction) -> bool {
    matches!(
        op.gate,
        GateKind::H
            | GateKind::X
            | GateKind::Y
            | GateKind::Z
            | GateKind::S
            | GateKind::T
            | GateKind::Rx
            | GateKind::Ry
            | GateKind::Rz
            | GateKind::U3
            | GateKind::Cnot
            | GateKind::Cz
            | GateKind::Swap
    )
}

/// One-direction commutation rule: does `a` commute with `b` when they
/// share qubit `q` in the stated role?
fn rule(a: &Instruction, b: &Instruction, q: Qubit) -> bool {
    let controls = |op: &Instruction| op.qubits[0] == q;
    let targets = |op: &Instruction| op.qubits[1] == q;

    match a.gate {
        GateKind::Z => matches!(b.gate, GateKind::Cnot | GateKind::Cz) && controls(b),
        GateKind::S => {
            (matches!(b.gate, GateKind::Cnot | GateKind::Cz) && controls(b))
                || matches!(b.gate, GateKind::T | GateKind::Rz)
        }
        GateKind::T => {
            (matches!(b.gate, GateKind::Cnot | GateKind::Cz) && controls(b))
                || matches!(b.gate, GateKind::S | GateKind::Rz)
        }
        GateKind::Rz => {
            (matches!(b.gate, GateKind::Cnot | GateKind::Cz) && controls(b))
                || matches!(b.gate, GateKind::S | GateKind::T)
        }
        GateKind::X | GateKind::Rx => b.gate == GateKind::Cnot && targets(b),
        _ => false,
    }
}

/// Whether two ops can be reordered past each other.
fn commutes(a: &Instruction, b: &Instruction) -> bool {
    if a.is_block() || b.is_block() {
        return false;
    }
    let shared: Vec<Qubit> = a
        .qubits
        .iter()
        .copied()
        .filter(|q| b.qubits.contains(q))
        .collect();
    if shared.is_empty() {
        return true;
    }
    shared.iter().all(|&q| rule(a, b, q) || rule(b, a, q))
}

/// Walk one wire for a partner slot. Returns `Some(slot)` on a same-gate,
/// same-tuple candidate, `None` when the window closes first.
fn walk_wire(
    out: &[Option<Instruction>],
    trail: &[usize],
    op: &Instruction,
) -> Option<usize> {
    for &slot in trail.iter().rev() {
        let Some(existing) = &out[slot] else {
            continue;
        };
        if existing.gate == op.gate && existing.qubits == op.qubits {
            return Some(slot);
        }
        if !commutes(existing, op) {
            return None;
        }
    }
    None
}

/// Find the partner for an incoming op, if any. Single-qubit gates walk
/// their one wire; two-qubit self-inverse gates must see the same partner
/// as the first reachable candidate on every wire.
fn find_partner(
    out: &[Option<Instruction>],
    wires: &AHashMap<Qubit, Vec<usize>>,
    op: &Instruction,
) -> Option<usize> {
    let mut partner = None;
    for &q in &op.qubits {
        let slot = walk_wire(out, wires.get(&q)?, op)?;
        match partner {
            None => partner = Some(slot),
            Some(found) if found == slot => {}
            _ => return None,
        }
    }
    partner
}

/// Apply the merge/cancel rule against the partner slot. Returns false
/// when the candidate has no rewrite rule (the op must be appended).
fn try_merge(out: &mut [Option<Instruction>], slot: usize, op: &Instruction) -> bool {
    match op.gate {
        GateKind::Rx | GateKind::Ry | GateKind::Rz => {
            let partner = out[slot].as_mut().expect("partner slot was nulled");
            let sum = normalize_angle(partner.params[0] + op.params[0]);
            if is_zero_angle(sum) {
                out[slot] = None;
            } else {
                partner.params[0] = sum;
            }
            true
        }
        GateKind::S => {
            let partner = out[slot].as_mut().expect("partner slot was nulled");
            partner.gate = GateKind::Z;
            true
        }
        GateKind::T => {
            let partner = out[slot].as_mut().expect("partner slot was nulled");
            partner.gate = GateKind::S;
            true
        }
        ref kind if kind.is_self_inverse() => {
            out[slot] = None;
            true
        }
        _ => false,
    }
}

fn append(
    out: &mut Vec<Option<Instruction>>,
    wires: &mut AHashMap<Qubit, Vec<usize>>,
    op: Instruction,
) {
    let slot = out.len();
    if op.is_block() {
        // Blocks are barriers: visible on every wire, existing or not.
        if let Some(condition) = op.condition {
            wires.entry(condition.qubit).or_default();
        }
        for trail in wires.values_mut() {
            trail.push(slot);
        }
    } else {
        for &q in &op.qubits {
            wires.entry(q).or_default().push(slot);
        }
    }
    out.push(Some(op));
}

/// Simplify an instruction list: identity elimination, rotation merging,
/// self-inverse cancellation, commutation-aware lookback.
pub fn optimize(input: Vec<Instruction>) -> Vec<Instruction> {
    let mut out: Vec<Option<Instruction>> = Vec::with_capacity(input.len());
    let mut wires: AHashMap<Qubit, Vec<usize>> = AHashMap::new();

    for op in input {
        if is_identity(&op) {
            continue;
        }
        if initiates_lookback(&op) {
            if let Some(slot) = find_partner(&out, &wires, &op) {
                if try_merge(&mut out, slot, &op) {
                    continue;
                }
            }
        }
        append(&mut out, &mut wires, op);
    }

    out.into_iter()
        .flatten()
        .filter(|op| !is_identity(op))
        .collect()
}
