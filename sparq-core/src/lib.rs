//! Core types for the sparq quantum circuit simulator
//!
//! This crate provides the foundation the rest of the workspace builds on:
//!
//! - **Qubit handles**: opaque, per-scope identities with release-time
//!   safety enforced by the [`QubitManager`]
//! - **Instruction IR**: the gate-level representation the recorder
//!   buffers into and the compiler transforms
//! - **Noise profiles**: validated probability bundles consumed by the
//!   simulator's stochastic channels

pub mod error;
pub mod instruction;
pub mod manager;
pub mod noise;
pub mod program;
pub mod qubit;

pub use error::QuantumError;
pub use instruction::{Condition, GateKind, Instruction};
pub use manager::QubitManager;
pub use noise::NoiseModel;
pub use program::Program;
pub use qubit::Qubit;

/// Type alias for results in sparq-core
pub type Result<T> = std::result::Result<T, QuantumError>;
