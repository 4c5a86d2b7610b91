//! Bytecode dispatch loop for the binding-relevant instruction subset.
//!
//! The loop owns its environment and operand stack and borrows the code
//! unit, so any number of interpreters can run the same unit at once, one
//! per thread.

mod builder;

pub use builder::InterpreterBuilder;

use strata_ir::bytecode::decode_at;
use strata_ir::{CodeUnit, Instruction};

use crate::errors::unresolved_binding;
use crate::{
    Ambient, Environment, EvalError, EvalResult, InterruptHandle, OperandStack, Phase,
    PropertyResolver, Value,
};

/// Outcome of executing one instruction.
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    Continue,
    /// Execution finished with this result.
    Finished(Value),
}

/// Interpreter for one code unit.
pub struct Interpreter<'a> {
    unit: &'a CodeUnit,
    env: Environment,
    stack: OperandStack,
    pc: usize,
    phase: Phase,
    /// Consulted when lexical lookup exhausts the environment.
    ambient: Option<Ambient<'a>>,
    /// Answers dot reads.
    resolver: Option<&'a dyn PropertyResolver>,
    interrupt: Option<InterruptHandle>,
}

impl<'a> Interpreter<'a> {
    /// Interpreter with default configuration. See [`InterpreterBuilder`].
    pub fn new(unit: &'a CodeUnit) -> Result<Self, EvalError> {
        InterpreterBuilder::new(unit).build()
    }

    /// Run until `return`, the end of the stream, or an error.
    ///
    /// After `Interrupted`, calling `run` again resumes at the same
    /// instruction once the flag is cleared.
    pub fn run(&mut self) -> EvalResult {
        tracing::debug!(pc = self.pc, phase = ?self.phase, "run");
        loop {
            if let Step::Finished(value) = self.step()? {
                tracing::debug!(result = %value, depth = self.env.depth(), "finished");
                return Ok(value);
            }
        }
    }

    /// Execute one instruction.
    ///
    /// The interrupt flag is checked here, at the instruction boundary. On
    /// error the program counter stays on the failing instruction.
    pub fn step(&mut self) -> Result<Step, EvalError> {
        if let Some(interrupt) = &self.interrupt {
            if interrupt.is_requested() {
                tracing::debug!(pc = self.pc, "interrupt requested");
                return Err(EvalError::Interrupted { pc: self.pc });
            }
        }

        let unit = self.unit;
        let code = unit.code();
        if self.pc >= code.len() {
            return Ok(Step::Finished(
                self.stack.peek().cloned().unwrap_or(Value::Undefined),
            ));
        }

        let pc = self.pc;
        let (instruction, next) = decode_at(code, pc)?;
        tracing::trace!(pc, %instruction, stack = self.stack.len(), "dispatch");

        let step = self.execute(instruction, pc)?;
        self.pc = match step {
            Step::Continue => next,
            Step::Finished(_) => code.len(),
        };
        Ok(step)
    }

    fn execute(&mut self, instruction: Instruction, pc: usize) -> Result<Step, EvalError> {
        let unit = self.unit;
        match instruction {
            Instruction::Constant(id) => {
                let constant = *unit.constant(id)?;
                self.stack
                    .push(Value::from_constant(constant, unit.interner()))?;
            }
            Instruction::Pop => {
                self.stack.pop(pc)?;
            }
            Instruction::Multiname(id) => {
                unit.multinames().get(id)?;
                self.stack.push(Value::Multiname(id))?;
            }
            // operands stay on the stack until the operation succeeds
            Instruction::DotRead(id) => {
                let mn = unit.multinames().get(id)?;
                let base = self.operand(pc)?;
                let value = self
                    .resolver
                    .ok_or(crate::PropertyNotFound)
                    .and_then(|resolver| resolver.read_property(base, mn))
                    .map_err(|_| unresolved_binding(mn.to_text(unit.interner())))?;
                self.stack.pop(pc)?;
                self.stack.push(value)?;
            }
            Instruction::LexicalRead(id) => {
                let mn = unit.multinames().get(id)?;
                let value = self.env.lexical_read(mn, self.phase, self.ambient)?;
                self.stack.push(value)?;
            }
            Instruction::LexicalWrite(id) => {
                let mn = unit.multinames().get(id)?;
                let value = self.operand(pc)?.clone();
                self.env.lexical_write(mn, value, true, self.phase)?;
            }
            Instruction::LexicalAssign(id) => {
                let mn = unit.multinames().get(id)?;
                let value = self.operand(pc)?.clone();
                self.env.lexical_write(mn, value, false, self.phase)?;
            }
            Instruction::PushFrame(id) => {
                let template = unit.frames().get(id)?;
                self.env.push_frame(id, template);
            }
            Instruction::PopFrame => {
                self.env.pop_frame()?;
            }
            Instruction::Return => {
                let value = if self.stack.is_empty() {
                    Value::Undefined
                } else {
                    self.stack.pop(pc)?
                };
                return Ok(Step::Finished(value));
            }
        }
        Ok(Step::Continue)
    }

    /// Top operand, left in place.
    fn operand(&self, pc: usize) -> Result<&Value, EvalError> {
        self.stack
            .peek()
            .ok_or(EvalError::OperandStackUnderflow { pc })
    }

    #[inline]
    pub fn unit(&self) -> &'a CodeUnit {
        self.unit
    }

    #[inline]
    pub fn env(&self) -> &Environment {
        &self.env
    }

    #[inline]
    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    #[inline]
    pub fn stack(&self) -> &OperandStack {
        &self.stack
    }

    #[inline]
    pub fn pc(&self) -> usize {
        self.pc
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Rewind to the start of the unit with an empty operand stack.
    ///
    /// The environment is kept, so bindings made by a previous run stay visible.
    pub fn rewind(&mut self) {
        self.pc = 0;
        self.stack.clear();
    }
}
