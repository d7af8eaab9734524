//! Gate matrix catalog for sparq
//!
//! Row-major complex unitaries for the fixed basis, plus pure functions for
//! the parameterized families. The simulator's generic scatter paths fetch
//! matrices through the `*_matrix` dispatch functions; its specialized paths
//! (Z, CNOT, CZ, SWAP) never touch the catalog.

pub mod matrices;

use num_complex::Complex64;
use sparq_core::GateKind;

pub use matrices::{
    rotation_x, rotation_y, rotation_z, rzz, u3, CCX, CNOT, CZ, HADAMARD, PAULI_X, PAULI_Y,
    PAULI_Z, SWAP, S_GATE, T_GATE,
};

/// 2×2 matrix for a single-qubit gate, or `None` if `kind` is not one.
pub fn single_qubit_matrix(kind: &GateKind, params: &[f64]) -> Option<[Complex64; 4]> {
    match kind {
        GateKind::H => Some(HADAMARD),
        GateKind::X => Some(PAULI_X),
        GateKind::Y => Some(PAULI_Y),
        GateKind::Z => Some(PAULI_Z),
        GateKind::S => Some(S_GATE),
        GateKind::T => Some(T_GATE),
        GateKind::Rx => Some(rotation_x(params[0])),
        GateKind::Ry => Some(rotation_y(params[0])),
        GateKind::Rz => Some(rotation_z(params[0])),
        GateKind::U3 => Some(u3(params[0], params[1], params[2])),
        _ => None,
    }
}

/// 4×4 matrix for a two-qubit gate, or `None` if `kind` is not one.
pub fn two_qubit_matrix(kind: &GateKind, params: &[f64]) -> Option<[Complex64; 16]> {
    match kind {
        GateKind::Cnot => Some(CNOT),
        GateKind::Cz => Some(CZ),
        GateKind::Swap => Some(SWAP),
        GateKind::Rzz => Some(rzz(params[0])),
        _ => None,
    }
}

/// 8×8 matrix for a three-qubit gate, or `None` if `kind` is not one.
pub fn three_qubit_matrix(kind: &GateKind) -> Option<[Complex64; 64]> {
    match kind {
        GateKind::Ccx => Some(CCX),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_covers_recognized_unitaries() {
        for kind in [
            GateKind::H,
            GateKind::X,
            GateKind::Y,
            GateKind::Z,
            GateKind::S,
            GateKind::T,
        ] {
            assert!(single_qubit_matrix(&kind, &[]).is_some());
        }
        assert!(single_qubit_matrix(&GateKind::Rx, &[0.5]).is_some());
        assert!(single_qubit_matrix(&GateKind::U3, &[0.5, 0.2, 0.1]).is_some());
        assert!(two_qubit_matrix(&GateKind::Cnot, &[]).is_some());
        assert!(two_qubit_matrix(&GateKind::Rzz, &[0.5]).is_some());
        assert!(three_qubit_matrix(&GateKind::Ccx).is_some());
    }

    #[test]
    fn test_dispatch_rejects_meta_and_custom() {
        assert!(single_qubit_matrix(&GateKind::Measure, &[]).is_none());
        assert!(single_qubit_matrix(&GateKind::Custom("ORACLE".into()), &[]).is_none());
        assert!(two_qubit_matrix(&GateKind::Ccx, &[]).is_none());
    }
}
