//! Lexical environment: the live stack of frames.
//!
//! The environment owns its frames outright, innermost last. Lookup walks
//! that sequence from the top down; template parent links are never
//! followed at run time, so popping a frame cannot leave a dangling chain.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use strata_ir::{
    CodeUnit, FrameId, FrameTemplate, Multiname, Name, QualifiedName, SharedInterner, SlotFlags,
};

use crate::errors::{immutable_binding, unresolved_binding, used_before_initialization};
use crate::{Ambient, BindingPolicy, EvalError, EvalResult, Phase, UninitializedRead, Value};

/// A single binding slot.
#[derive(Clone, Debug)]
struct Slot {
    name: QualifiedName,
    value: Value,
    flags: SlotFlags,
    /// Set by the first write; `value` may itself be the `Uninitialized` sentinel.
    initialized: bool,
}

impl Slot {
    fn written(name: QualifiedName, value: Value, flags: SlotFlags) -> Self {
        Slot {
            name,
            value,
            flags,
            initialized: true,
        }
    }
}

/// One instantiated lexical scope.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    /// Template this frame was instantiated from (`None` for host-built frames).
    template: Option<FrameId>,
    slots: Vec<Slot>,
    /// Local name to slot indices, in declaration order.
    by_name: FxHashMap<Name, SmallVec<[usize; 2]>>,
}

impl Frame {
    /// A frame with no slots and no template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate slots for `template`.
    ///
    /// Slots start uninitialized, except `HOISTED` ones which start `undefined`.
    pub fn instantiate(id: FrameId, template: &FrameTemplate) -> Self {
        let mut frame = Frame {
            template: Some(id),
            slots: Vec::with_capacity(template.slots().len()),
            by_name: FxHashMap::default(),
        };
        for decl in template.slots() {
            let slot = if decl.flags.contains(SlotFlags::HOISTED) {
                Slot::written(decl.name, Value::Undefined, decl.flags)
            } else {
                Slot {
                    name: decl.name,
                    value: Value::Uninitialized,
                    flags: decl.flags,
                    initialized: false,
                }
            };
            frame.declare(slot);
        }
        frame
    }

    #[inline]
    pub fn template(&self) -> Option<FrameId> {
        self.template
    }

    /// Number of slots, declared and added.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Add a slot. Callers ensure its name is not already declared here.
    fn declare(&mut self, slot: Slot) {
        let index = self.slots.len();
        self.by_name.entry(slot.name.name).or_default().push(index);
        self.slots.push(slot);
    }

    /// Slot answering to `mn` in this frame.
    ///
    /// Among the slots [`Multiname::matches`] accepts, the one whose
    /// namespace comes first in the reference's namespace set wins.
    fn find(&self, mn: &Multiname) -> Option<usize> {
        let priority = |i: usize| {
            self.slots[i]
                .name
                .namespace
                .and_then(|ns| mn.namespaces().iter().position(|&n| n == ns))
        };
        self.by_name
            .get(&mn.name())?
            .iter()
            .copied()
            .filter(|&i| mn.matches(&self.slots[i].name))
            .min_by_key(|&i| priority(i))
    }

    /// Current value of the binding `mn` resolves to in this frame.
    pub fn get(&self, mn: &Multiname) -> Option<&Value> {
        self.find(mn).map(|i| &self.slots[i].value)
    }
}

/// Environment for the interpreter using a frame stack.
///
/// Never empty: the base frame is created with the environment and cannot
/// be popped.
pub struct Environment {
    /// Active frames, innermost last. `frames[0]` is the base frame.
    frames: Vec<Frame>,
    interner: SharedInterner,
    policy: BindingPolicy,
}

impl Environment {
    /// Create an environment whose base frame is `base`.
    pub fn new(interner: SharedInterner, base: Frame) -> Self {
        Environment {
            frames: vec![base],
            interner,
            policy: BindingPolicy::default(),
        }
    }

    /// Create an environment with the unit's base frame instantiated.
    pub fn for_unit(unit: &CodeUnit) -> Result<Self, EvalError> {
        let id = unit.base_frame();
        let template = unit.frames().get(id)?;
        Ok(Self::new(
            unit.interner().clone(),
            Frame::instantiate(id, template),
        ))
    }

    #[must_use]
    pub fn with_policy(mut self, policy: BindingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn set_policy(&mut self, policy: BindingPolicy) {
        self.policy = policy;
    }

    #[inline]
    pub fn policy(&self) -> BindingPolicy {
        self.policy
    }

    /// Number of active frames, base included.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn innermost(&self) -> &Frame {
        // frames is never empty
        &self.frames[self.frames.len() - 1]
    }

    #[inline]
    pub fn base(&self) -> &Frame {
        &self.frames[0]
    }

    /// Enter a scope: instantiate `template` as the new innermost frame.
    pub fn push_frame(&mut self, id: FrameId, template: &FrameTemplate) {
        self.frames.push(Frame::instantiate(id, template));
        tracing::debug!(
            template = id.0,
            slots = template.slots().len(),
            depth = self.frames.len(),
            "push frame"
        );
    }

    /// Leave the innermost scope.
    ///
    /// Popping the base frame means the bytecode is unbalanced; that is fatal.
    pub fn pop_frame(&mut self) -> Result<Frame, EvalError> {
        if self.frames.len() <= 1 {
            return Err(EvalError::FrameUnderflow);
        }
        let frame = self.frames.pop().ok_or(EvalError::FrameUnderflow)?;
        tracing::debug!(
            template = frame.template.map(|id| id.0),
            depth = self.frames.len(),
            "pop frame"
        );
        Ok(frame)
    }

    /// Innermost `(frame, slot)` answering to `mn`.
    fn locate(&self, mn: &Multiname) -> Option<(usize, usize)> {
        self.frames
            .iter()
            .enumerate()
            .rev()
            .find_map(|(f, frame)| frame.find(mn).map(|s| (f, s)))
    }

    /// How many frames out from the innermost the binding for `mn` lives,
    /// or `None` if no frame declares it.
    pub fn resolution_distance(&self, mn: &Multiname) -> Option<usize> {
        self.locate(mn).map(|(f, _)| self.frames.len() - 1 - f)
    }

    /// Read the binding `mn` resolves to.
    ///
    /// Frames are searched innermost first. An uninitialized match is handled
    /// by the binding policy for `phase`. With no match, `ambient` (if any) is
    /// asked for `receiver.mn` before failing with `UnresolvedBinding`.
    pub fn lexical_read(
        &self,
        mn: &Multiname,
        phase: Phase,
        ambient: Option<Ambient<'_>>,
    ) -> EvalResult {
        if let Some((f, s)) = self.locate(mn) {
            let slot = &self.frames[f].slots[s];
            if slot.initialized {
                return Ok(slot.value.clone());
            }
            return match self.policy.on_uninitialized(phase) {
                UninitializedRead::Reject => Err(used_before_initialization(self.text(mn))),
                UninitializedRead::Sentinel => Ok(Value::Uninitialized),
                UninitializedRead::Undefined => Ok(Value::Undefined),
            };
        }

        if let Some(ambient) = ambient {
            tracing::trace!(name = %self.text(mn), "lexical read falls back to ambient receiver");
            return ambient
                .lookup(mn)
                .map_err(|_| unresolved_binding(self.text(mn)));
        }
        Err(unresolved_binding(self.text(mn)))
    }

    /// Write `value` to the binding `mn` resolves to.
    ///
    /// If no frame declares `mn`, `declare_if_absent` adds a binding to the
    /// innermost frame; otherwise the write fails with `UnresolvedBinding`.
    /// An `IMMUTABLE` slot accepts only its initializing write.
    pub fn lexical_write(
        &mut self,
        mn: &Multiname,
        value: Value,
        declare_if_absent: bool,
        phase: Phase,
    ) -> Result<(), EvalError> {
        if let Some((f, s)) = self.locate(mn) {
            let slot = &mut self.frames[f].slots[s];
            if slot.flags.contains(SlotFlags::IMMUTABLE) && slot.initialized {
                return Err(immutable_binding(slot.name.to_text(&self.interner)));
            }
            slot.value = value;
            slot.initialized = true;
            return Ok(());
        }

        if !declare_if_absent {
            return Err(unresolved_binding(self.text(mn)));
        }
        tracing::debug!(
            name = %self.text(mn),
            ?phase,
            depth = self.frames.len(),
            "declare binding in innermost frame"
        );
        let innermost = self.frames.len() - 1;
        self.frames[innermost].declare(Slot::written(
            mn.declaration_name(),
            value,
            SlotFlags::empty(),
        ));
        Ok(())
    }

    /// Declare (or overwrite) a binding in the innermost frame.
    pub fn define(&mut self, name: QualifiedName, value: Value, flags: SlotFlags) {
        let innermost = self.frames.len() - 1;
        Self::define_in(&mut self.frames[innermost], name, value, flags);
    }

    /// Declare (or overwrite) a binding in the base frame.
    pub fn define_global(&mut self, name: QualifiedName, value: Value, flags: SlotFlags) {
        Self::define_in(&mut self.frames[0], name, value, flags);
    }

    fn define_in(frame: &mut Frame, name: QualifiedName, value: Value, flags: SlotFlags) {
        let existing = frame.by_name.get(&name.name).and_then(|indices| {
            indices
                .iter()
                .copied()
                .find(|&i| frame.slots[i].name == name)
        });
        match existing {
            Some(i) => {
                let slot = &mut frame.slots[i];
                slot.value = value;
                slot.flags = flags;
                slot.initialized = true;
            }
            None => frame.declare(Slot::written(name, value, flags)),
        }
    }

    fn text(&self, mn: &Multiname) -> String {
        mn.to_text(&self.interner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]
mod tests;
