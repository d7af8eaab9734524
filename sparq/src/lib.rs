//! Sparse-state quantum circuit simulator
//!
//! sparq simulates up to 64 logical qubits with memory cost proportional
//! to the number of non-zero amplitudes, not 2^N. User code records gates
//! through a validated [`Operations`] surface; at each measurement (and at
//! scope exit) the pending program is compiled — simplified, decomposed to
//! the native basis {U3, CNOT}, simplified again — and run against the
//! sparse engine.
//!
//! # Quick start
//!
//! ```
//! use sparq::Scope;
//!
//! // A deterministic Bell pair: the two measurements always agree.
//! let (a, b) = Scope::new(2)
//!     .with_seed(42)
//!     .run(|q, ops| {
//!         ops.h(q[0])?;
//!         ops.cnot(q[0], q[1])?;
//!         let a = ops.m(q[0])?;
//!         let b = ops.m(q[1])?;
//!         ops.reset(q[0])?;
//!         ops.reset(q[1])?;
//!         Ok((a, b))
//!     })
//!     .unwrap();
//! assert_eq!(a, b);
//! ```
//!
//! Every qubit must be back in |0⟩ when the scope ends; forgetting a
//! `reset` after a measurement that read 1 fails the scope with a
//! must-reset error.

pub mod algorithms;
pub mod error;
pub mod recorder;
pub mod scope;

pub use error::Error;
pub use recorder::Operations;
pub use scope::{with_qubits, Scope};

pub use sparq_core::{NoiseModel, Qubit};

/// Type alias for results in sparq
pub type Result<T> = std::result::Result<T, Error>;
