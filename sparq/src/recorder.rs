//! Validated operation recorder
//!
//! Every user-facing call validates its handles against the scope's qubit
//! manager, then appends one IR node to the current buffer. Nothing touches
//! the simulator until a flush point: `m` compiles and runs the pending
//! program synchronously and returns the observed bit. `if_eq`/`while_eq`
//! record into a fresh inner buffer through a child recorder, then append a
//! single guarded block node.

use crate::error::Result;
use crate::scope::ScopeCtx;
use sparq_core::{Condition, GateKind, Instruction, Program, QuantumError, Qubit};

/// Recording surface handed to scope callbacks
///
/// # Example
/// ```
/// use sparq::Scope;
///
/// let bit = Scope::new(1)
///     .with_seed(7)
///     .run(|q, ops| {
///         ops.x(q[0])?;
///         let bit = ops.m(q[0])?;
///         ops.reset(q[0])?;
///         Ok(bit)
///     })
///     .unwrap();
/// assert_eq!(bit, 1);
/// ```
pub struct Operations<'s> {
    ctx: &'s ScopeCtx,
    /// `Some` while recording the body of an `if_eq`/`while_eq` block.
    block: Option<Program>,
}

impl<'s> Operations<'s> {
    pub(crate) fn root(ctx: &'s ScopeCtx) -> Self {
        Self { ctx, block: None }
    }

    fn child(&self) -> Operations<'s> {
        Operations {
            ctx: self.ctx,
            block: Some(Program::new()),
        }
    }

    fn ensure_allocated(&self, q: Qubit) -> Result<()> {
        if self.ctx.manager.borrow().is_allocated(q) {
            Ok(())
        } else {
            Err(QuantumError::UnknownQubit(q).into())
        }
    }

    fn record(&mut self, instruction: Instruction) {
        match &mut self.block {
            Some(body) => body.push(instruction),
            None => self.ctx.program.borrow_mut().push(instruction),
        }
    }

    fn one(&mut self, gate: GateKind, q: Qubit, params: &[f64]) -> Result<()> {
        self.ensure_allocated(q)?;
        self.record(Instruction::gate(gate, &[q], params));
        Ok(())
    }

    /// Hadamard.
    pub fn h(&mut self, q: Qubit) -> Result<()> {
        self.one(GateKind::H, q, &[])
    }

    /// Pauli-X.
    pub fn x(&mut self, q: Qubit) -> Result<()> {
        self.one(GateKind::X, q, &[])
    }

    /// Pauli-Y.
    pub fn y(&mut self, q: Qubit) -> Result<()> {
        self.one(GateKind::Y, q, &[])
    }

    /// Pauli-Z.
    pub fn z(&mut self, q: Qubit) -> Result<()> {
        self.one(GateKind::Z, q, &[])
    }

    /// Phase gate (√Z).
    pub fn s(&mut self, q: Qubit) -> Result<()> {
        self.one(GateKind::S, q, &[])
    }

    /// π/8 gate (√S).
    pub fn t(&mut self, q: Qubit) -> Result<()> {
        self.one(GateKind::T, q, &[])
    }

    /// X rotation by `theta`.
    pub fn rx(&mut self, q: Qubit, theta: f64) -> Result<()> {
        self.one(GateKind::Rx, q, &[theta])
    }

    /// Y rotation by `theta`.
    pub fn ry(&mut self, q: Qubit, theta: f64) -> Result<()> {
        self.one(GateKind::Ry, q, &[theta])
    }

    /// Z rotation by `theta`.
    pub fn rz(&mut self, q: Qubit, theta: f64) -> Result<()> {
        self.one(GateKind::Rz, q, &[theta])
    }

    /// Universal single-qubit gate.
    pub fn u3(&mut self, q: Qubit, theta: f64, phi: f64, lambda: f64) -> Result<()> {
        self.one(GateKind::U3, q, &[theta, phi, lambda])
    }

    /// Controlled-NOT.
    pub fn cnot(&mut self, control: Qubit, target: Qubit) -> Result<()> {
        self.ensure_allocated(control)?;
        self.ensure_allocated(target)?;
        if control == target {
            return Err(QuantumError::control_is_target("CNOT", control).into());
        }
        self.record(Instruction::gate(GateKind::Cnot, &[control, target], &[]));
        Ok(())
    }

    /// Controlled-Z.
    pub fn cz(&mut self, control: Qubit, target: Qubit) -> Result<()> {
        self.ensure_allocated(control)?;
        self.ensure_allocated(target)?;
        if control == target {
            return Err(QuantumError::control_is_target("CZ", control).into());
        }
        self.record(Instruction::gate(GateKind::Cz, &[control, target], &[]));
        Ok(())
    }

    /// ZZ interaction by `theta`.
    pub fn rzz(&mut self, a: Qubit, b: Qubit, theta: f64) -> Result<()> {
        self.ensure_allocated(a)?;
        self.ensure_allocated(b)?;
        if a == b {
            return Err(QuantumError::duplicate_qubit("RZZ", a).into());
        }
        self.record(Instruction::gate(GateKind::Rzz, &[a, b], &[theta]));
        Ok(())
    }

    /// Exchange two qubits.
    pub fn swap(&mut self, a: Qubit, b: Qubit) -> Result<()> {
        self.ensure_allocated(a)?;
        self.ensure_allocated(b)?;
        if a == b {
            return Err(QuantumError::duplicate_qubit("SWAP", a).into());
        }
        self.record(Instruction::gate(GateKind::Swap, &[a, b], &[]));
        Ok(())
    }

    /// Toffoli.
    pub fn ccx(&mut self, c1: Qubit, c2: Qubit, target: Qubit) -> Result<()> {
        self.ensure_allocated(c1)?;
        self.ensure_allocated(c2)?;
        self.ensure_allocated(target)?;
        if c1 == target || c2 == target {
            return Err(QuantumError::control_is_target("CCX", target).into());
        }
        if c1 == c2 {
            return Err(QuantumError::duplicate_qubit("CCX", c1).into());
        }
        self.record(Instruction::gate(GateKind::Ccx, &[c1, c2, target], &[]));
        Ok(())
    }

    /// Return the qubit to |0⟩ at the next flush.
    pub fn reset(&mut self, q: Qubit) -> Result<()> {
        self.one(GateKind::Reset, q, &[])
    }

    /// Measure the qubit and return the observed bit.
    ///
    /// Appends a MEASURE node, then synchronously flushes the scope's
    /// pending program through the compiler and simulator.
    pub fn m(&mut self, q: Qubit) -> Result<u8> {
        self.one(GateKind::Measure, q, &[])?;
        self.flush()?;
        self.ctx
            .simulator
            .borrow()
            .result(q)
            .ok_or_else(|| QuantumError::NoMeasurement(q).into())
    }

    /// Record a block that runs when the cached measurement of `q` equals
    /// `value`. The callback records into a fresh inner buffer; the block
    /// is appended as a single node afterwards.
    pub fn if_eq<F>(&mut self, q: Qubit, value: u8, f: F) -> Result<()>
    where
        F: FnOnce(&mut Operations<'s>) -> Result<()>,
    {
        let body = self.block_body(q, value, f)?;
        self.record(Instruction::if_block(Condition { qubit: q, value }, body));
        Ok(())
    }

    /// Record a block that re-runs while the cached measurement of `q`
    /// equals `value`, re-checked before each iteration.
    pub fn while_eq<F>(&mut self, q: Qubit, value: u8, f: F) -> Result<()>
    where
        F: FnOnce(&mut Operations<'s>) -> Result<()>,
    {
        let body = self.block_body(q, value, f)?;
        self.record(Instruction::while_block(Condition { qubit: q, value }, body));
        Ok(())
    }

    fn block_body<F>(&mut self, q: Qubit, value: u8, f: F) -> Result<Program>
    where
        F: FnOnce(&mut Operations<'s>) -> Result<()>,
    {
        self.ensure_allocated(q)?;
        if value > 1 {
            return Err(QuantumError::Unsupported(format!(
                "block guard compares against a classical bit, got {}",
                value
            ))
            .into());
        }
        let mut inner = self.child();
        f(&mut inner)?;
        Ok(inner.block.take().unwrap_or_default())
    }

    /// Compile and run the pending program, clearing the buffer.
    pub(crate) fn flush(&mut self) -> Result<()> {
        let pending = self.ctx.program.borrow_mut().take();
        let compiled = sparq_compiler::compile(pending);
        self.ctx.simulator.borrow_mut().run(&compiled)?;
        Ok(())
    }
}
