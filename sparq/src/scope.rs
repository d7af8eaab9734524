//! Scope entry point
//!
//! A scope allocates its qubits, binds a simulator over them in allocation
//! order, and hands the callback a recorder. Every exit path flushes the
//! pending program once more and releases each handle through the manager,
//! which insists on |0⟩. A release failure dominates whatever the callback
//! returned.

use crate::error::Result;
use crate::recorder::Operations;
use sparq_core::{NoiseModel, Program, QuantumError, Qubit, QubitManager};
use sparq_sim::{Simulator, MAX_QUBITS};
use std::cell::RefCell;

/// Shared per-scope state the recorder operates against.
pub(crate) struct ScopeCtx {
    pub(crate) manager: RefCell<QubitManager>,
    pub(crate) simulator: RefCell<Simulator>,
    pub(crate) program: RefCell<Program>,
}

/// Builder for a simulation scope
///
/// # Example
/// ```
/// use sparq::Scope;
///
/// let (a, b) = Scope::new(2)
///     .with_seed(11)
///     .run(|q, ops| {
///         ops.h(q[0])?;
///         ops.cnot(q[0], q[1])?;
///         let a = ops.m(q[0])?;
///         let b = ops.m(q[1])?;
///         ops.reset(q[0])?;
///         ops.reset(q[1])?;
///         Ok((a, b))
///     })
///     .unwrap();
/// assert_eq!(a, b);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Scope {
    num_qubits: usize,
    noise: Option<NoiseModel>,
    seed: Option<u64>,
    epsilon: Option<f64>,
}

impl Scope {
    /// A scope over `num_qubits` fresh qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            noise: None,
            seed: None,
            epsilon: None,
        }
    }

    /// Enable a noise profile for the scope's simulator.
    pub fn with_noise(mut self, noise: NoiseModel) -> Self {
        self.noise = Some(noise);
        self
    }

    /// Seed the simulator RNG for deterministic runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Override the zero-check epsilon used at release time.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(epsilon);
        self
    }

    /// Allocate the qubits, run the callback, flush and release.
    ///
    /// # Errors
    /// Propagates recorder and engine errors from the callback; a qubit
    /// left outside |0⟩ at scope end produces the must-reset error, which
    /// takes precedence.
    pub fn run<T, F>(self, f: F) -> Result<T>
    where
        F: FnOnce(&[Qubit], &mut Operations<'_>) -> Result<T>,
    {
        if self.num_qubits == 0 || self.num_qubits > MAX_QUBITS {
            return Err(QuantumError::Unsupported(format!(
                "a scope needs between 1 and {} qubits, got {}",
                MAX_QUBITS, self.num_qubits
            ))
            .into());
        }

        let mut manager = QubitManager::new();
        let handles: Vec<Qubit> = (0..self.num_qubits).map(|_| manager.allocate()).collect();

        let mut simulator = Simulator::new(&handles);
        if let Some(noise) = self.noise {
            simulator = simulator.with_noise(noise);
        }
        if let Some(seed) = self.seed {
            simulator = simulator.with_seed(seed);
        }
        if let Some(epsilon) = self.epsilon {
            simulator = simulator.with_epsilon(epsilon);
        }

        let ctx = ScopeCtx {
            manager: RefCell::new(manager),
            simulator: RefCell::new(simulator),
            program: RefCell::new(Program::new()),
        };

        let mut ops = Operations::root(&ctx);
        let outcome = f(&handles, &mut ops);

        // Cleanup runs on every exit path.
        let flush_result = ops.flush();

        let mut release_error = None;
        {
            let mut manager = ctx.manager.borrow_mut();
            let simulator = ctx.simulator.borrow();
            for &q in &handles {
                let released = manager.release(q, |handle| match simulator.is_zero(handle) {
                    Ok(true) => None,
                    Ok(false) => Some(simulator.probability_of_one(handle).unwrap_or(1.0)),
                    Err(_) => Some(1.0),
                });
                if let Err(e) = released {
                    release_error.get_or_insert(e);
                }
            }
        }

        if let Some(e) = release_error {
            return Err(e.into());
        }
        let value = outcome?;
        flush_result?;
        Ok(value)
    }
}

/// Convenience entry: a noiseless, entropy-seeded scope.
pub fn with_qubits<T, F>(num_qubits: usize, f: F) -> Result<T>
where
    F: FnOnce(&[Qubit], &mut Operations<'_>) -> Result<T>,
{
    Scope::new(num_qubits).run(f)
}
