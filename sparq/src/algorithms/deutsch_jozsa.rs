//! Deutsch–Jozsa constant-vs-balanced decision

use crate::error::Result;
use crate::recorder::Operations;
use sparq_core::Qubit;
use std::fmt;

/// Verdict of a Deutsch–Jozsa run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OracleClass {
    Constant,
    Balanced,
}

impl fmt::Display for OracleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleClass::Constant => f.write_str("constant"),
            OracleClass::Balanced => f.write_str("balanced"),
        }
    }
}

/// Decide whether a promise oracle is constant or balanced in one query.
///
/// An all-zero data register after the final Hadamards means constant.
pub fn run_deutsch_jozsa<F>(
    ops: &mut Operations<'_>,
    data: &[Qubit],
    ancilla: Qubit,
    oracle: F,
) -> Result<OracleClass>
where
    F: FnOnce(&mut Operations<'_>) -> Result<()>,
{
    ops.x(ancilla)?;
    ops.h(ancilla)?;
    for &q in data {
        ops.h(q)?;
    }

    oracle(ops)?;

    for &q in data {
        ops.h(q)?;
    }

    let mut any_one = false;
    for &q in data {
        any_one |= ops.m(q)? == 1;
    }
    Ok(if any_one {
        OracleClass::Balanced
    } else {
        OracleClass::Constant
    })
}
