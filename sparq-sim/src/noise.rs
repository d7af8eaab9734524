//! Stochastic noise channel application
//!
//! The channel runs after each unitary gate, once per acted-on qubit,
//! independently. Measurement and reset never trigger it; readout error is
//! handled at sampling time by the simulator.

use crate::error::Result;
use crate::state::SparseState;
use rand::rngs::StdRng;
use rand::Rng;
use sparq_core::NoiseModel;

/// Per-qubit noise channel driven by a [`NoiseModel`]
///
/// Channel order, per affected qubit:
/// 1. with probability `gate_error`: coherent bit flip (XOR into every
///    active index)
/// 2. with probability `t2`: phase kick (negate the |1⟩ branch)
/// 3. if `t1 > 0`: relaxation jump with probability `t1·p₁` (collapse to 1,
///    then flip to |0⟩); otherwise damp the |1⟩ branch by √(1−t1) and
///    renormalize
#[derive(Clone, Copy, Debug)]
pub struct NoiseChannel {
    model: NoiseModel,
}

impl NoiseChannel {
    /// Wrap a validated noise profile.
    pub fn new(model: NoiseModel) -> Self {
        Self { model }
    }

    /// The underlying profile.
    #[inline]
    pub fn model(&self) -> &NoiseModel {
        &self.model
    }

    /// Apply the channel to the qubit at `position`.
    pub fn apply(&self, state: &mut SparseState, position: usize, rng: &mut StdRng) -> Result<()> {
        if rng.gen::<f64>() < self.model.gate_error() {
            state.xor_bit(position);
        }

        if rng.gen::<f64>() < self.model.t2() {
            state.negate_one_branch(position);
        }

        let t1 = self.model.t1();
        if t1 > 0.0 {
            let p_one = state.probability_of_one(position);
            if p_one > 0.0 && rng.gen::<f64>() < t1 * p_one {
                // Relaxation event: the excited branch decays to ground.
                state.collapse(position, 1, p_one)?;
                state.xor_bit(position);
            } else {
                state.damp_one_branch(position, (1.0 - t1).sqrt());
                state.renormalize();
            }
        }

        state.prune();
        Ok(())
    }
}
