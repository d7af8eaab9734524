//! Circuit compiler for sparq
//!
//! Two cooperating passes over the gate-level IR:
//!
//! - **Optimizer**: identity elimination, rotation merging, self-inverse
//!   cancellation, and commutation-aware lookback along per-qubit wires
//! - **Transpiler**: fixed decomposition to the native basis {U3, CNOT}
//!
//! [`compile`] runs optimize → transpile → optimize, so high-level
//! identities are exploited before decomposition and the adjacency created
//! by decomposition is exploited after.

pub mod compiler;
pub mod optimizer;
pub mod transpiler;

pub use compiler::compile;
pub use optimizer::optimize;
pub use transpiler::transpile;
