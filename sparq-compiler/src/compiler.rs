//! Compilation pipeline

use crate::optimizer::optimize;
use crate::transpiler::transpile;
use sparq_core::Instruction;

/// Compile an instruction list for execution.
///
/// The leading optimize pass exploits high-level identities (H·H, S·S)
/// before they are lost to decomposition; the trailing pass exploits the
/// adjacency decomposition creates, such as the CNOT pair left behind by
/// an expanded SWAP meeting an existing CNOT.
pub fn compile(input: Vec<Instruction>) -> Vec<Instruction> {
    optimize(transpile(optimize(input)))
}
