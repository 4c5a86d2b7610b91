//! Resolution phases and the uninitialized-read policy they select.
//!
//! The phase is an explicit argument to every binding operation, never
//! ambient state, so resolution stays a pure function of its inputs.

/// Execution phase a binding is resolved in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Compile-time/static evaluation: forward references are errors.
    Static,
    /// Ordinary execution.
    #[default]
    Run,
}

/// What a read of a declared-but-uninitialized binding produces.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UninitializedRead {
    /// Fail with `UsedBeforeInitialization`.
    Reject,
    /// Yield [`Value::Uninitialized`](crate::Value::Uninitialized).
    Sentinel,
    /// Yield [`Value::Undefined`](crate::Value::Undefined).
    Undefined,
}

/// Per-phase uninitialized-read behavior.
///
/// Default: `Static` rejects, `Run` yields the sentinel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BindingPolicy {
    pub static_phase: UninitializedRead,
    pub run_phase: UninitializedRead,
}

impl BindingPolicy {
    /// Reject uninitialized reads in both phases.
    pub const STRICT: BindingPolicy = BindingPolicy {
        static_phase: UninitializedRead::Reject,
        run_phase: UninitializedRead::Reject,
    };

    #[inline]
    pub fn on_uninitialized(self, phase: Phase) -> UninitializedRead {
        match phase {
            Phase::Static => self.static_phase,
            Phase::Run => self.run_phase,
        }
    }
}

impl Default for BindingPolicy {
    fn default() -> Self {
        BindingPolicy {
            static_phase: UninitializedRead::Reject,
            run_phase: UninitializedRead::Sentinel,
        }
    }
}
