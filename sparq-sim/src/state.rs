//! Sparse quantum state with scatter-style gate application
//!
//! The state is a mapping from 64-bit basis indices to complex amplitudes,
//! stored as two parallel flat buffers for cache locality. Gate application
//! scatters each source entry's contributions into a twin scratch pair
//! through a collision map that deduplicates destination indices, then the
//! buffer pairs are swapped. Memory cost scales with the number of live
//! amplitudes rather than with 2^N.
//!
//! # Pruning
//!
//! Entries whose squared magnitude falls below an adaptive threshold are
//! dropped after every gate, collapse and reset. The threshold loosens in
//! proportion to how far the active count exceeds the memory budget, so a
//! state under decoherence pressure sheds its faintest branches first.

use crate::error::{Result, SimulatorError};
use ahash::AHashMap;
use num_complex::Complex64;
use std::fmt;

/// Hard cap imposed by the 64-bit basis index.
pub const MAX_QUBITS: usize = 64;

/// Base prune threshold on squared magnitude.
const PRUNE_BASE: f64 = 1e-15;

/// Active-entry count above which the prune threshold starts loosening.
const MEMORY_BUDGET: usize = 5000;

/// `is_zero` tolerance as a multiple of the current prune threshold.
const EPSILON_FACTOR: f64 = 100.0;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// Sparse state vector over up to 64 qubits
#[derive(Clone)]
pub struct SparseState {
    indices: Vec<u64>,
    amps: Vec<Complex64>,
    scratch_indices: Vec<u64>,
    scratch_amps: Vec<Complex64>,
    /// Destination index → scratch slot, cleared per gate step.
    slots: AHashMap<u64, usize>,
    epsilon_override: Option<f64>,
}

impl SparseState {
    /// Create a state seeded with |0...0⟩.
    pub fn new() -> Self {
        Self {
            indices: vec![0],
            amps: vec![Complex64::new(1.0, 0.0)],
            scratch_indices: Vec::new(),
            scratch_amps: Vec::new(),
            slots: AHashMap::new(),
            epsilon_override: None,
        }
    }

    /// Override the effective epsilon used by [`is_zero`](Self::is_zero).
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon_override = Some(epsilon);
        self
    }

    /// Number of live entries.
    #[inline]
    pub fn active_len(&self) -> usize {
        self.indices.len()
    }

    /// Iterate over live (basis index, amplitude) pairs.
    pub fn entries(&self) -> impl Iterator<Item = (u64, Complex64)> + '_ {
        self.indices.iter().copied().zip(self.amps.iter().copied())
    }

    /// Amplitude of a basis index (0 if absent). Linear scan; diagnostics
    /// and tests only.
    pub fn amplitude(&self, basis_idx: u64) -> Complex64 {
        self.indices
            .iter()
            .position(|&idx| idx == basis_idx)
            .map_or(ZERO, |i| self.amps[i])
    }

    /// Σ|amp|² over the live entries.
    pub fn norm_sqr(&self) -> f64 {
        self.amps.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Probability of reading 1 on the qubit at `position`.
    pub fn probability_of_one(&self, position: usize) -> f64 {
        let mask = 1u64 << position;
        self.indices
            .iter()
            .zip(self.amps.iter())
            .filter(|(&idx, _)| idx & mask != 0)
            .map(|(_, amp)| amp.norm_sqr())
            .sum()
    }

    /// Current adaptive prune threshold on squared magnitude.
    pub fn prune_threshold(&self) -> f64 {
        let over_budget = self.active_len() as f64 / MEMORY_BUDGET as f64;
        PRUNE_BASE * over_budget.max(1.0)
    }

    /// Tolerance below which a one-probability counts as zero.
    pub fn effective_epsilon(&self) -> f64 {
        self.epsilon_override
            .unwrap_or_else(|| EPSILON_FACTOR * self.prune_threshold())
    }

    /// Whether the qubit at `position` is |0⟩ up to the effective epsilon.
    pub fn is_zero(&self, position: usize) -> bool {
        self.probability_of_one(position) < self.effective_epsilon()
    }

    /// Drop entries whose squared magnitude is below the current threshold.
    pub fn prune(&mut self) {
        let threshold = self.prune_threshold();
        let mut write = 0;
        for read in 0..self.indices.len() {
            if self.amps[read].norm_sqr() >= threshold {
                self.indices[write] = self.indices[read];
                self.amps[write] = self.amps[read];
                write += 1;
            }
        }
        self.indices.truncate(write);
        self.amps.truncate(write);
    }

    /// Rescale to unit norm. No-op on an (unexpectedly) empty state.
    pub fn renormalize(&mut self) {
        let norm = self.norm_sqr().sqrt();
        if norm > 0.0 && (norm - 1.0).abs() > f64::EPSILON {
            let inv = 1.0 / norm;
            for amp in &mut self.amps {
                *amp *= inv;
            }
        }
    }

    /// Scatter a 2^k × 2^k row-major matrix over the qubits at `positions`.
    ///
    /// `positions[0]` forms the most significant bit of the matrix row and
    /// column indices, matching the catalog's |control target⟩ ordering.
    fn scatter(&mut self, matrix: &[Complex64], positions: &[usize]) {
        let k = positions.len();
        let dim = 1usize << k;
        debug_assert_eq!(matrix.len(), dim * dim);

        self.scratch_indices.clear();
        self.scratch_amps.clear();
        self.slots.clear();

        let Self {
            indices,
            amps,
            scratch_indices,
            scratch_amps,
            slots,
            ..
        } = self;

        for (&idx, &amp) in indices.iter().zip(amps.iter()) {
            let mut col = 0usize;
            for &p in positions {
                col = (col << 1) | ((idx >> p) & 1) as usize;
            }
            for row in 0..dim {
                let coeff = matrix[row * dim + col];
                if coeff.norm_sqr() == 0.0 {
                    continue;
                }
                let mut dst = idx;
                for (j, &p) in positions.iter().enumerate() {
                    let bit = (row >> (k - 1 - j)) & 1;
                    dst = (dst & !(1u64 << p)) | ((bit as u64) << p);
                }
                let slot = *slots.entry(dst).or_insert_with(|| {
                    scratch_indices.push(dst);
                    scratch_amps.push(ZERO);
                    scratch_indices.len() - 1
                });
                scratch_amps[slot] += coeff * amp;
            }
        }

        std::mem::swap(&mut self.indices, &mut self.scratch_indices);
        std::mem::swap(&mut self.amps, &mut self.scratch_amps);
    }

    /// Apply a 2×2 unitary to one qubit.
    pub fn apply_single(&mut self, matrix: &[Complex64; 4], position: usize) {
        self.scatter(matrix, &[position]);
    }

    /// Apply a 4×4 unitary; `hi` forms the high bit of the matrix index.
    pub fn apply_two(&mut self, matrix: &[Complex64; 16], hi: usize, lo: usize) {
        self.scatter(matrix, &[hi, lo]);
    }

    /// Apply an 8×8 unitary; `b2` forms the highest bit of the matrix index.
    pub fn apply_three(&mut self, matrix: &[Complex64; 64], b2: usize, b1: usize, b0: usize) {
        self.scatter(matrix, &[b2, b1, b0]);
    }

    /// Z specialization: sign-flip amplitudes whose bit is set, in place.
    pub fn apply_phase_flip(&mut self, position: usize) {
        let mask = 1u64 << position;
        for (idx, amp) in self.indices.iter().zip(self.amps.iter_mut()) {
            if idx & mask != 0 {
                *amp = -*amp;
            }
        }
    }

    /// CZ specialization: sign-flip amplitudes with both bits set.
    pub fn apply_cz(&mut self, a: usize, b: usize) {
        let mask = (1u64 << a) | (1u64 << b);
        for (idx, amp) in self.indices.iter().zip(self.amps.iter_mut()) {
            if idx & mask == mask {
                *amp = -*amp;
            }
        }
    }

    /// CNOT specialization: XOR the target bit where the control is set.
    /// A pure index permutation, so no amplitude changes and no collisions.
    pub fn apply_cnot(&mut self, control: usize, target: usize) {
        let control_mask = 1u64 << control;
        let target_mask = 1u64 << target;
        for idx in &mut self.indices {
            if *idx & control_mask != 0 {
                *idx ^= target_mask;
            }
        }
    }

    /// SWAP specialization: exchange two bit positions in every index.
    pub fn apply_swap(&mut self, a: usize, b: usize) {
        let mask = (1u64 << a) | (1u64 << b);
        for idx in &mut self.indices {
            let bits = *idx & mask;
            if bits != 0 && bits != mask {
                *idx ^= mask;
            }
        }
    }

    /// Coherent X: XOR the bit into every active index.
    pub fn xor_bit(&mut self, position: usize) {
        let mask = 1u64 << position;
        for idx in &mut self.indices {
            *idx ^= mask;
        }
    }

    /// Phase-damping kick: negate every amplitude whose bit is set.
    pub fn negate_one_branch(&mut self, position: usize) {
        self.apply_phase_flip(position);
    }

    /// Scale the |1⟩ branch of the qubit at `position` by `factor`.
    pub fn damp_one_branch(&mut self, position: usize, factor: f64) {
        let mask = 1u64 << position;
        for (idx, amp) in self.indices.iter().zip(self.amps.iter_mut()) {
            if idx & mask != 0 {
                *amp *= factor;
            }
        }
    }

    /// Project onto `outcome` for the qubit at `position`, rescaling the
    /// retained amplitudes by 1/√p_outcome, then prune.
    ///
    /// # Errors
    /// Rejects collapse against an outcome with no probability mass;
    /// callers sampling consistently never hit this.
    pub fn collapse(&mut self, position: usize, outcome: u8, p_outcome: f64) -> Result<()> {
        if p_outcome <= 0.0 {
            return Err(SimulatorError::ImpossibleOutcome {
                outcome,
                probability: p_outcome,
            });
        }
        let mask = 1u64 << position;
        let want = if outcome == 1 { mask } else { 0 };
        let scale = 1.0 / p_outcome.sqrt();

        let mut write = 0;
        for read in 0..self.indices.len() {
            if self.indices[read] & mask == want {
                self.indices[write] = self.indices[read];
                self.amps[write] = self.amps[read] * scale;
                write += 1;
            }
        }
        if write == 0 {
            return Err(SimulatorError::ImpossibleOutcome {
                outcome,
                probability: p_outcome,
            });
        }
        self.indices.truncate(write);
        self.amps.truncate(write);
        self.prune();
        Ok(())
    }
}

impl Default for SparseState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SparseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SparseState")
            .field("active_len", &self.active_len())
            .field("norm_sqr", &self.norm_sqr())
            .field("prune_threshold", &self.prune_threshold())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use sparq_gates::matrices;

    #[test]
    fn test_initial_state() {
        let state = SparseState::new();
        assert_eq!(state.active_len(), 1);
        assert_eq!(state.amplitude(0), Complex64::new(1.0, 0.0));
        assert_abs_diff_eq!(state.norm_sqr(), 1.0);
    }

    #[test]
    fn test_hadamard_creates_superposition() {
        let mut state = SparseState::new();
        state.apply_single(&matrices::HADAMARD, 0);

        assert_eq!(state.active_len(), 2);
        assert_abs_diff_eq!(state.amplitude(0).norm_sqr(), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(state.amplitude(1).norm_sqr(), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(state.norm_sqr(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_hadamard_twice_interferes_back() {
        let mut state = SparseState::new();
        state.apply_single(&matrices::HADAMARD, 0);
        state.apply_single(&matrices::HADAMARD, 0);
        state.prune();

        assert_eq!(state.active_len(), 1);
        assert_abs_diff_eq!(state.amplitude(0).re, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_x_moves_population() {
        let mut state = SparseState::new();
        state.apply_single(&matrices::PAULI_X, 2);

        assert_eq!(state.active_len(), 1);
        assert_abs_diff_eq!(state.amplitude(0b100).norm_sqr(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(state.probability_of_one(2), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bell_pair_via_specialized_cnot() {
        let mut state = SparseState::new();
        state.apply_single(&matrices::HADAMARD, 0);
        state.apply_cnot(0, 1);

        assert_eq!(state.active_len(), 2);
        assert_abs_diff_eq!(state.amplitude(0b00).norm_sqr(), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(state.amplitude(0b11).norm_sqr(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_specializations_match_scatter() {
        let mut specialized = SparseState::new();
        specialized.apply_single(&matrices::HADAMARD, 0);
        specialized.apply_single(&matrices::HADAMARD, 1);
        specialized.apply_single(&matrices::S_GATE, 1);

        let mut generic = specialized.clone();

        specialized.apply_cnot(0, 1);
        generic.apply_two(&matrices::CNOT, 0, 1);
        for (idx, amp) in specialized.entries() {
            let other = generic.amplitude(idx);
            assert_abs_diff_eq!(amp.re, other.re, epsilon = 1e-12);
            assert_abs_diff_eq!(amp.im, other.im, epsilon = 1e-12);
        }

        specialized.apply_cz(0, 1);
        generic.apply_two(&matrices::CZ, 0, 1);
        for (idx, amp) in specialized.entries() {
            let other = generic.amplitude(idx);
            assert_abs_diff_eq!(amp.re, other.re, epsilon = 1e-12);
            assert_abs_diff_eq!(amp.im, other.im, epsilon = 1e-12);
        }

        specialized.apply_swap(0, 1);
        generic.apply_two(&matrices::SWAP, 0, 1);
        for (idx, amp) in specialized.entries() {
            let other = generic.amplitude(idx);
            assert_abs_diff_eq!(amp.re, other.re, epsilon = 1e-12);
            assert_abs_diff_eq!(amp.im, other.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_phase_flip_matches_z_matrix() {
        let mut flipped = SparseState::new();
        flipped.apply_single(&matrices::HADAMARD, 0);
        let mut scattered = flipped.clone();

        flipped.apply_phase_flip(0);
        scattered.apply_single(&matrices::PAULI_Z, 0);

        for (idx, amp) in flipped.entries() {
            let other = scattered.amplitude(idx);
            assert_abs_diff_eq!(amp.re, other.re, epsilon = 1e-12);
            assert_abs_diff_eq!(amp.im, other.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_ccx_flips_only_when_both_controls_set() {
        let mut state = SparseState::new();
        state.apply_single(&matrices::PAULI_X, 2);
        state.apply_single(&matrices::PAULI_X, 1);
        // |110⟩ with positions (2, 1, 0) as (c1, c2, t)
        state.apply_three(&matrices::CCX, 2, 1, 0);
        assert_abs_diff_eq!(state.amplitude(0b111).norm_sqr(), 1.0, epsilon = 1e-12);

        let mut untouched = SparseState::new();
        untouched.apply_single(&matrices::PAULI_X, 2);
        untouched.apply_three(&matrices::CCX, 2, 1, 0);
        assert_abs_diff_eq!(untouched.amplitude(0b100).norm_sqr(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_collapse_retains_and_rescales() {
        let mut state = SparseState::new();
        state.apply_single(&matrices::HADAMARD, 0);
        state.apply_cnot(0, 1);

        let p_one = state.probability_of_one(0);
        state.collapse(0, 1, p_one).unwrap();

        assert_eq!(state.active_len(), 1);
        assert_abs_diff_eq!(state.amplitude(0b11).norm_sqr(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_collapse_impossible_outcome_rejected() {
        let mut state = SparseState::new();
        let err = state.collapse(0, 1, 0.0).unwrap_err();
        assert!(matches!(err, SimulatorError::ImpossibleOutcome { .. }));
    }

    #[test]
    fn test_prune_drops_faint_entries() {
        let mut state = SparseState::new();
        state.apply_single(&matrices::HADAMARD, 0);
        state.damp_one_branch(0, 1e-9);
        state.prune();

        assert_eq!(state.active_len(), 1);
        state.renormalize();
        assert_abs_diff_eq!(state.norm_sqr(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_threshold_loosens_over_budget() {
        let state = SparseState::new();
        let base = state.prune_threshold();
        assert_abs_diff_eq!(base, 1e-15);
        assert_abs_diff_eq!(state.effective_epsilon(), 1e-13);
    }

    #[test]
    fn test_epsilon_override() {
        let state = SparseState::new().with_epsilon(0.25);
        assert_abs_diff_eq!(state.effective_epsilon(), 0.25);
    }

    #[test]
    fn test_is_zero_after_xor() {
        let mut state = SparseState::new();
        assert!(state.is_zero(0));
        state.xor_bit(0);
        assert!(!state.is_zero(0));
    }

    #[test]
    fn test_norm_preserved_across_scatter_chain() {
        let mut state = SparseState::new();
        for position in 0..4 {
            state.apply_single(&matrices::HADAMARD, position);
        }
        state.apply_two(&matrices::rzz(0.7), 0, 1);
        state.apply_single(&matrices::rotation_y(1.3), 2);
        state.apply_three(&matrices::CCX, 0, 1, 3);
        state.prune();

        assert_abs_diff_eq!(state.norm_sqr(), 1.0, epsilon = 1e-9);
        assert_eq!(state.active_len(), 16);
    }
}
