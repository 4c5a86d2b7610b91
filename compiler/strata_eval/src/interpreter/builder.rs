//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use strata_ir::CodeUnit;

use super::Interpreter;
use crate::{
    Ambient, BindingPolicy, Environment, EvalError, InterruptHandle, OperandStack, Phase,
    PropertyResolver, Value, DEFAULT_STACK_LIMIT,
};

/// Builder for creating Interpreter instances.
///
/// Defaults: `Phase::Run`, the default binding policy, no ambient receiver,
/// no interrupt handle, and a fresh environment for the unit's base frame.
pub struct InterpreterBuilder<'a> {
    unit: &'a CodeUnit,
    env: Option<Environment>,
    phase: Phase,
    policy: Option<BindingPolicy>,
    ambient: Option<Ambient<'a>>,
    resolver: Option<&'a dyn PropertyResolver>,
    interrupt: Option<InterruptHandle>,
    stack_limit: usize,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(unit: &'a CodeUnit) -> Self {
        Self {
            unit,
            env: None,
            phase: Phase::default(),
            policy: None,
            ambient: None,
            resolver: None,
            interrupt: None,
            stack_limit: DEFAULT_STACK_LIMIT,
        }
    }

    /// Set the resolution phase.
    #[must_use]
    pub fn phase(mut self, phase: Phase) -> Self {
        self.phase = phase;
        self
    }

    /// Set the uninitialized-read policy. Overrides the policy of a supplied environment.
    #[must_use]
    pub fn policy(mut self, policy: BindingPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Set the initial environment.
    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// Set the ambient receiver for unresolved lexical reads.
    ///
    /// `resolver` also answers dot reads unless `property_resolver` overrides it.
    #[must_use]
    pub fn ambient(mut self, receiver: &'a Value, resolver: &'a dyn PropertyResolver) -> Self {
        self.ambient = Some(Ambient::new(receiver, resolver));
        if self.resolver.is_none() {
            self.resolver = Some(resolver);
        }
        self
    }

    /// Set the resolver for dot reads.
    #[must_use]
    pub fn property_resolver(mut self, resolver: &'a dyn PropertyResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Set the interrupt handle checked between instructions.
    #[must_use]
    pub fn interrupt(mut self, handle: InterruptHandle) -> Self {
        self.interrupt = Some(handle);
        self
    }

    /// Set the operand-stack limit.
    #[must_use]
    pub fn stack_limit(mut self, limit: usize) -> Self {
        self.stack_limit = limit;
        self
    }

    pub fn build(self) -> Result<Interpreter<'a>, EvalError> {
        let mut env = match self.env {
            Some(env) => env,
            None => Environment::for_unit(self.unit)?,
        };
        if let Some(policy) = self.policy {
            env.set_policy(policy);
        }
        Ok(Interpreter {
            unit: self.unit,
            env,
            stack: OperandStack::new(self.stack_limit),
            pc: 0,
            phase: self.phase,
            ambient: self.ambient,
            resolver: self.resolver,
            interrupt: self.interrupt,
        })
    }
}
