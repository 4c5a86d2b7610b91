//! Strata Eval - name resolution and bytecode dispatch for Strata code units.
//!
//! This crate runs the binding-relevant subset of Strata bytecode against a
//! loaded `strata_ir::CodeUnit`.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - `Environment`: the runtime frame stack, searched innermost first
//! - `BindingPolicy`: what an uninitialized read produces in each `Phase`
//! - `PropertyResolver`: host hook for dot reads and the ambient receiver
//! - `Interpreter`: the dispatch loop, built with `InterpreterBuilder`
//! - `EvalError`: categorized failures (`ErrorCategory`)

mod environment;
pub mod errors;
pub mod interpreter;
mod interrupt;
mod phase;
mod property;
mod stack;
mod value;

pub use environment::{Environment, Frame};
pub use errors::{ErrorCategory, EvalError, EvalResult};
pub use interpreter::{Interpreter, InterpreterBuilder, Step};
pub use interrupt::InterruptHandle;
pub use phase::{BindingPolicy, Phase, UninitializedRead};
pub use property::{Ambient, PropertyNotFound, PropertyResolver, PropertyTable};
pub use stack::{OperandStack, DEFAULT_STACK_LIMIT};
pub use value::{ObjectId, Value};
