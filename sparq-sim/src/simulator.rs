//! Instruction interpreter over the sparse state

use crate::error::{Result, SimulatorError};
use crate::noise::NoiseChannel;
use crate::state::{SparseState, MAX_QUBITS};
use ahash::AHashMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sparq_core::{GateKind, Instruction, NoiseModel, Qubit};

/// Sparse-state simulator bound to a fixed qubit order
///
/// The order given at construction fixes the handle → bit-position map for
/// the simulator's lifetime. Instructions are interpreted sequentially;
/// If/While recurse into their bodies against the measurement cache.
///
/// # Example
/// ```
/// use sparq_core::{GateKind, Instruction, QubitManager};
/// use sparq_sim::Simulator;
///
/// let mut manager = QubitManager::new();
/// let q = manager.allocate();
///
/// let mut sim = Simulator::new(&[q]).with_seed(42);
/// sim.run(&[Instruction::gate(GateKind::X, &[q], &[])]).unwrap();
/// assert_eq!(sim.measure(q).unwrap(), 1);
/// ```
pub struct Simulator {
    state: SparseState,
    positions: AHashMap<Qubit, usize>,
    results: AHashMap<Qubit, u8>,
    noise: Option<NoiseChannel>,
    rng: StdRng,
}

impl Simulator {
    /// Create a simulator over the given qubit order, seeded from entropy.
    ///
    /// # Panics
    /// Panics if more than 64 qubits are supplied; callers validate the
    /// count before allocating handles.
    pub fn new(qubit_order: &[Qubit]) -> Self {
        assert!(
            qubit_order.len() <= MAX_QUBITS,
            "basis indices are 64-bit; cannot simulate {} qubits",
            qubit_order.len()
        );
        let positions = qubit_order
            .iter()
            .enumerate()
            .map(|(position, &q)| (q, position))
            .collect();
        Self {
            state: SparseState::new(),
            positions,
            results: AHashMap::new(),
            noise: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Enable the stochastic noise channel.
    pub fn with_noise(mut self, model: NoiseModel) -> Self {
        self.noise = Some(NoiseChannel::new(model));
        self
    }

    /// Reseed the RNG for deterministic runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Override the zero-check epsilon.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.state = std::mem::take(&mut self.state).with_epsilon(epsilon);
        self
    }

    /// Read-only view of the state, for diagnostics and tests.
    #[inline]
    pub fn state(&self) -> &SparseState {
        &self.state
    }

    /// Interpret an instruction stream in order.
    pub fn run(&mut self, instructions: &[Instruction]) -> Result<()> {
        for instruction in instructions {
            self.execute(instruction)?;
        }
        Ok(())
    }

    fn execute(&mut self, instruction: &Instruction) -> Result<()> {
        match &instruction.gate {
            GateKind::If => {
                let (condition, body) = Self::block_parts(instruction)?;
                if self.results.get(&condition.qubit).copied() == Some(condition.value) {
                    self.run(body)?;
                }
                Ok(())
            }
            GateKind::While => {
                let (condition, body) = Self::block_parts(instruction)?;
                // An empty cache reads as false, so the loop never starts.
                while self.results.get(&condition.qubit).copied() == Some(condition.value) {
                    self.run(body)?;
                }
                Ok(())
            }
            GateKind::Measure => {
                self.check_shape(instruction)?;
                self.measure(instruction.qubits[0])?;
                Ok(())
            }
            GateKind::Reset => {
                self.check_shape(instruction)?;
                self.reset(instruction.qubits[0])
            }
            _ => {
                self.check_shape(instruction)?;
                self.apply_gate(instruction)?;
                if let Some(channel) = self.noise {
                    for &q in &instruction.qubits {
                        let position = self.position(q)?;
                        channel.apply(&mut self.state, position, &mut self.rng)?;
                    }
                }
                Ok(())
            }
        }
    }

    fn block_parts(instruction: &Instruction) -> Result<(sparq_core::Condition, &[Instruction])> {
        let condition = instruction.condition.ok_or(SimulatorError::MalformedBlock)?;
        let body = instruction
            .body
            .as_ref()
            .ok_or(SimulatorError::MalformedBlock)?;
        Ok((condition, body.instructions()))
    }

    fn check_shape(&self, instruction: &Instruction) -> Result<()> {
        let gate = &instruction.gate;
        let expected = gate
            .arity()
            .ok_or_else(|| SimulatorError::UnknownGate(gate.name().to_string()))?;
        if instruction.qubits.len() != expected {
            return Err(SimulatorError::ArityMismatch {
                gate: gate.name().to_string(),
                expected,
                actual: instruction.qubits.len(),
            });
        }
        if instruction.params.len() != gate.param_count() {
            return Err(SimulatorError::ParamMismatch {
                gate: gate.name().to_string(),
                expected: gate.param_count(),
                actual: instruction.params.len(),
            });
        }
        Ok(())
    }

    fn apply_gate(&mut self, instruction: &Instruction) -> Result<()> {
        let gate = &instruction.gate;
        let params = &instruction.params;

        match gate {
            // Specializations: no scatter, no amplitude arithmetic.
            GateKind::Z => {
                let p = self.position(instruction.qubits[0])?;
                self.state.apply_phase_flip(p);
            }
            GateKind::Cnot => {
                let c = self.position(instruction.qubits[0])?;
                let t = self.position(instruction.qubits[1])?;
                self.state.apply_cnot(c, t);
            }
            GateKind::Cz => {
                let a = self.position(instruction.qubits[0])?;
                let b = self.position(instruction.qubits[1])?;
                self.state.apply_cz(a, b);
            }
            GateKind::Swap => {
                let a = self.position(instruction.qubits[0])?;
                let b = self.position(instruction.qubits[1])?;
                self.state.apply_swap(a, b);
            }
            _ => {
                if let Some(matrix) = sparq_gates::single_qubit_matrix(gate, params) {
                    let p = self.position(instruction.qubits[0])?;
                    self.state.apply_single(&matrix, p);
                } else if let Some(matrix) = sparq_gates::two_qubit_matrix(gate, params) {
                    let hi = self.position(instruction.qubits[0])?;
                    let lo = self.position(instruction.qubits[1])?;
                    self.state.apply_two(&matrix, hi, lo);
                } else if let Some(matrix) = sparq_gates::three_qubit_matrix(gate) {
                    let b2 = self.position(instruction.qubits[0])?;
                    let b1 = self.position(instruction.qubits[1])?;
                    let b0 = self.position(instruction.qubits[2])?;
                    self.state.apply_three(&matrix, b2, b1, b0);
                } else {
                    return Err(SimulatorError::UnknownGate(gate.name().to_string()));
                }
            }
        }

        self.state.prune();
        Ok(())
    }

    /// Measure a qubit, collapse the state, and cache the reported bit.
    ///
    /// The outcome is sampled from the true one-probability; with
    /// probability `readout_error` the *reported* bit is inverted while the
    /// collapse follows the sampled outcome, so readout noise never leaves
    /// the state inconsistent with itself.
    pub fn measure(&mut self, q: Qubit) -> Result<u8> {
        let position = self.position(q)?;
        let p_one = self.state.probability_of_one(position);

        let actual: u8 = if self.rng.gen::<f64>() < p_one { 1 } else { 0 };
        let mut reported = actual;
        if let Some(channel) = &self.noise {
            if self.rng.gen::<f64>() < channel.model().readout_error() {
                reported ^= 1;
            }
        }

        let p_outcome = if actual == 1 { p_one } else { 1.0 - p_one };
        self.state.collapse(position, actual, p_outcome)?;
        self.state.renormalize();

        self.results.insert(q, reported);
        Ok(reported)
    }

    /// Reset a qubit to |0⟩: measure (noise suppressed), flip if 1, prune.
    pub fn reset(&mut self, q: Qubit) -> Result<()> {
        let position = self.position(q)?;
        let p_one = self.state.probability_of_one(position);

        let outcome: u8 = if self.rng.gen::<f64>() < p_one { 1 } else { 0 };
        let p_outcome = if outcome == 1 { p_one } else { 1.0 - p_one };
        self.state.collapse(position, outcome, p_outcome)?;
        self.state.renormalize();
        if outcome == 1 {
            self.state.xor_bit(position);
        }
        self.state.prune();

        self.results.insert(q, outcome);
        Ok(())
    }

    /// Whether the qubit reads |0⟩ up to the effective epsilon.
    pub fn is_zero(&self, q: Qubit) -> Result<bool> {
        let position = self.position(q)?;
        Ok(self.state.is_zero(position))
    }

    /// One-probability of the qubit, for release diagnostics.
    pub fn probability_of_one(&self, q: Qubit) -> Result<f64> {
        let position = self.position(q)?;
        Ok(self.state.probability_of_one(position))
    }

    /// Last cached measurement of the qubit, if any.
    pub fn result(&self, q: Qubit) -> Option<u8> {
        self.results.get(&q).copied()
    }

    fn position(&self, q: Qubit) -> Result<usize> {
        self.positions
            .get(&q)
            .copied()
            .ok_or(SimulatorError::UnmappedQubit(q))
    }
}
