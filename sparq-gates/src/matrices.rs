//! Gate matrices in row-major interleaved form
//!
//! Fixed unitaries are compile-time constants; the parameterized families
//! (RX, RY, RZ, U3, RZZ) are pure functions of their angles. The catalog is
//! closed: there is no dynamic registration.

use num_complex::Complex64;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);
const NEG_I: Complex64 = Complex64::new(0.0, -1.0);
const NEG_ONE: Complex64 = Complex64::new(-1.0, 0.0);

const INV_SQRT2: f64 = 0.7071067811865476; // 1/√2

/// Hadamard gate
/// H = 1/√2 * [[1,  1],
///             [1, -1]]
pub const HADAMARD: [Complex64; 4] = [
    Complex64::new(INV_SQRT2, 0.0),
    Complex64::new(INV_SQRT2, 0.0),
    Complex64::new(INV_SQRT2, 0.0),
    Complex64::new(-INV_SQRT2, 0.0),
];

/// Pauli-X gate (NOT)
pub const PAULI_X: [Complex64; 4] = [ZERO, ONE, ONE, ZERO];

/// Pauli-Y gate
pub const PAULI_Y: [Complex64; 4] = [ZERO, NEG_I, I, ZERO];

/// Pauli-Z gate
pub const PAULI_Z: [Complex64; 4] = [ONE, ZERO, ZERO, NEG_ONE];

/// S gate (√Z, 90° phase)
pub const S_GATE: [Complex64; 4] = [ONE, ZERO, ZERO, I];

/// T gate (π/8 gate, 45° phase)
/// e^(iπ/4) = (1+i)/√2
pub const T_GATE: [Complex64; 4] = [ONE, ZERO, ZERO, Complex64::new(INV_SQRT2, INV_SQRT2)];

/// CNOT gate, basis order |control target⟩
pub const CNOT: [Complex64; 16] = [
    ONE, ZERO, ZERO, ZERO, //
    ZERO, ONE, ZERO, ZERO, //
    ZERO, ZERO, ZERO, ONE, //
    ZERO, ZERO, ONE, ZERO, //
];

/// Controlled-Z gate
pub const CZ: [Complex64; 16] = [
    ONE, ZERO, ZERO, ZERO, //
    ZERO, ONE, ZERO, ZERO, //
    ZERO, ZERO, ONE, ZERO, //
    ZERO, ZERO, ZERO, NEG_ONE, //
];

/// SWAP gate
pub const SWAP: [Complex64; 16] = [
    ONE, ZERO, ZERO, ZERO, //
    ZERO, ZERO, ONE, ZERO, //
    ZERO, ONE, ZERO, ZERO, //
    ZERO, ZERO, ZERO, ONE, //
];

/// Toffoli gate, basis order |c1 c2 t⟩: identity except |110⟩ ↔ |111⟩.
pub const CCX: [Complex64; 64] = {
    let mut m = [ZERO; 64];
    let mut row = 0;
    while row < 6 {
        m[row * 8 + row] = ONE;
        row += 1;
    }
    m[6 * 8 + 7] = ONE;
    m[7 * 8 + 6] = ONE;
    m
};

/// RX(θ) = [[cos(θ/2),    -i·sin(θ/2)],
///          [-i·sin(θ/2),  cos(θ/2)]]
#[inline]
pub fn rotation_x(theta: f64) -> [Complex64; 4] {
    let (sin, cos) = (theta / 2.0).sin_cos();
    [
        Complex64::new(cos, 0.0),
        Complex64::new(0.0, -sin),
        Complex64::new(0.0, -sin),
        Complex64::new(cos, 0.0),
    ]
}

/// RY(θ) = [[cos(θ/2), -sin(θ/2)],
///          [sin(θ/2),  cos(θ/2)]]
#[inline]
pub fn rotation_y(theta: f64) -> [Complex64; 4] {
    let (sin, cos) = (theta / 2.0).sin_cos();
    [
        Complex64::new(cos, 0.0),
        Complex64::new(-sin, 0.0),
        Complex64::new(sin, 0.0),
        Complex64::new(cos, 0.0),
    ]
}

/// RZ(θ) = [[e^(-iθ/2), 0        ],
///          [0,         e^(iθ/2)]]
#[inline]
pub fn rotation_z(theta: f64) -> [Complex64; 4] {
    let phase = Complex64::from_polar(1.0, theta / 2.0);
    [phase.conj(), ZERO, ZERO, phase]
}

/// The universal single-qubit gate against which the fixed decompositions
/// are calibrated:
///
/// U3(θ, φ, λ) = [[cos(θ/2),          -e^(iλ)·sin(θ/2)      ],
///                [e^(iφ)·sin(θ/2),    e^(i(φ+λ))·cos(θ/2)]]
#[inline]
pub fn u3(theta: f64, phi: f64, lambda: f64) -> [Complex64; 4] {
    let (sin, cos) = (theta / 2.0).sin_cos();
    [
        Complex64::new(cos, 0.0),
        -Complex64::from_polar(sin, lambda),
        Complex64::from_polar(sin, phi),
        Complex64::from_polar(cos, phi + lambda),
    ]
}

/// RZZ(θ) = diag(e^(-iθ/2), e^(iθ/2), e^(iθ/2), e^(-iθ/2))
#[inline]
pub fn rzz(theta: f64) -> [Complex64; 16] {
    let phase = Complex64::from_polar(1.0, theta / 2.0);
    let mut m = [ZERO; 16];
    m[0] = phase.conj();
    m[5] = phase;
    m[10] = phase;
    m[15] = phase.conj();
    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn assert_unitary_2x2(m: &[Complex64; 4]) {
        // U·U† = I
        for row in 0..2 {
            for col in 0..2 {
                let mut sum = ZERO;
                for k in 0..2 {
                    sum += m[row * 2 + k] * m[col * 2 + k].conj();
                }
                let expected = if row == col { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(sum.re, expected, epsilon = 1e-12);
                assert_abs_diff_eq!(sum.im, 0.0, epsilon = 1e-12);
            }
        }
    }

    fn assert_matrices_eq(a: &[Complex64; 4], b: &[Complex64; 4]) {
        for (x, y) in a.iter().zip(b.iter()) {
            assert_abs_diff_eq!(x.re, y.re, epsilon = 1e-12);
            assert_abs_diff_eq!(x.im, y.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_fixed_gates_are_unitary() {
        for m in [&HADAMARD, &PAULI_X, &PAULI_Y, &PAULI_Z, &S_GATE, &T_GATE] {
            assert_unitary_2x2(m);
        }
    }

    #[test]
    fn test_parameterized_gates_are_unitary() {
        for theta in [0.0, 0.3, PI / 2.0, PI, 4.8] {
            assert_unitary_2x2(&rotation_x(theta));
            assert_unitary_2x2(&rotation_y(theta));
            assert_unitary_2x2(&rotation_z(theta));
            assert_unitary_2x2(&u3(theta, 0.7, 1.9));
        }
    }

    #[test]
    fn test_u3_calibration_identities() {
        // The decomposition table is calibrated against these exact forms.
        assert_matrices_eq(&u3(PI / 2.0, 0.0, PI), &HADAMARD);
        assert_matrices_eq(&u3(PI, 0.0, PI), &PAULI_X);
        assert_matrices_eq(&u3(PI, PI / 2.0, PI / 2.0), &PAULI_Y);
        assert_matrices_eq(&u3(0.0, 0.0, PI), &PAULI_Z);
        assert_matrices_eq(&u3(1.1, -PI / 2.0, PI / 2.0), &rotation_x(1.1));
        assert_matrices_eq(&u3(1.1, 0.0, 0.0), &rotation_y(1.1));
    }

    #[test]
    fn test_rz_matches_u3_up_to_global_phase() {
        let theta = 0.9;
        let rz = rotation_z(theta);
        let via_u3 = u3(0.0, 0.0, theta);
        // U3(0,0,θ) = e^(iθ/2)·RZ(θ)
        let phase = Complex64::from_polar(1.0, theta / 2.0);
        for (a, b) in rz.iter().zip(via_u3.iter()) {
            let scaled = a * phase;
            assert_abs_diff_eq!(scaled.re, b.re, epsilon = 1e-12);
            assert_abs_diff_eq!(scaled.im, b.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_ccx_permutes_last_two_rows() {
        for row in 0..6 {
            assert_eq!(CCX[row * 8 + row], ONE);
        }
        assert_eq!(CCX[6 * 8 + 7], ONE);
        assert_eq!(CCX[7 * 8 + 6], ONE);
        let nonzero = CCX.iter().filter(|c| c.norm_sqr() > 0.0).count();
        assert_eq!(nonzero, 8);
    }

    #[test]
    fn test_rzz_diagonal() {
        let m = rzz(PI / 3.0);
        assert_abs_diff_eq!(m[0].arg(), -PI / 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m[5].arg(), PI / 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m[15].arg(), -PI / 6.0, epsilon = 1e-12);
        for (i, entry) in m.iter().enumerate() {
            if i % 5 != 0 {
                assert_eq!(entry.norm_sqr(), 0.0);
            }
        }
    }
}
