//! Compile-time frame templates.
//!
//! A template fixes the shape of one lexical scope: which names it declares
//! and in which slot order. Templates live in a [`FrameArena`] indexed by
//! [`FrameId`]; the parent link is an index into the same arena, used for
//! structure only. Run-time lookup never follows it.

use bitflags::bitflags;
use rustc_hash::FxHashSet;

use crate::{LoadError, QualifiedName, StringInterner};

bitflags! {
    /// Per-slot declaration properties.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct SlotFlags: u8 {
        /// Initialized to `undefined` on frame entry (var-style).
        const HOISTED = 1 << 0;
        /// Accepts its initializing write only.
        const IMMUTABLE = 1 << 1;
    }
}

/// One declared binding in a frame template.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SlotDecl {
    pub name: QualifiedName,
    pub flags: SlotFlags,
}

impl SlotDecl {
    pub fn new(name: QualifiedName) -> Self {
        SlotDecl {
            name,
            flags: SlotFlags::empty(),
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: SlotFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// Index of a template within its unit's [`FrameArena`] (16-bit operand).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub u16);

impl FrameId {
    #[inline]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

/// Shape of one lexical scope.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameTemplate {
    parent: Option<FrameId>,
    slots: Vec<SlotDecl>,
}

impl FrameTemplate {
    pub fn new(parent: Option<FrameId>, slots: Vec<SlotDecl>) -> Self {
        FrameTemplate { parent, slots }
    }

    /// Template with unqualified, unflagged slots.
    pub fn unqualified(interner: &StringInterner, parent: Option<FrameId>, names: &[&str]) -> Self {
        let slots = names
            .iter()
            .map(|n| SlotDecl::new(QualifiedName::unqualified(interner.intern(n))))
            .collect();
        FrameTemplate { parent, slots }
    }

    #[inline]
    pub fn parent(&self) -> Option<FrameId> {
        self.parent
    }

    #[inline]
    pub fn slots(&self) -> &[SlotDecl] {
        &self.slots
    }
}

/// Arena of every frame template in a code unit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameArena {
    templates: Vec<FrameTemplate>,
}

impl FrameArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a template, validating its shape.
    ///
    /// The parent must already be in the arena, so parent chains are acyclic,
    /// and slot names must be unique within the template.
    pub fn push(
        &mut self,
        template: FrameTemplate,
        interner: &StringInterner,
    ) -> Result<FrameId, LoadError> {
        let index = self.templates.len();
        let id = u16::try_from(index)
            .map(FrameId)
            .map_err(|_| LoadError::TableTooLarge { len: index + 1 })?;
        if let Some(parent) = template.parent {
            if parent.index() >= index {
                return Err(LoadError::ParentNotDeclared {
                    child: index,
                    parent: parent.index(),
                });
            }
        }
        let mut seen = FxHashSet::default();
        for slot in &template.slots {
            if !seen.insert(slot.name) {
                return Err(LoadError::DuplicateSlot {
                    frame: index,
                    name: slot.name.to_text(interner),
                });
            }
        }
        self.templates.push(template);
        Ok(id)
    }

    #[inline]
    pub fn get(&self, id: FrameId) -> Result<&FrameTemplate, LoadError> {
        self.templates
            .get(id.index())
            .ok_or(LoadError::FrameOutOfRange {
                index: id.index(),
                len: self.templates.len(),
            })
    }

    /// Number of enclosing templates above `id`.
    pub fn nesting_depth(&self, id: FrameId) -> Result<usize, LoadError> {
        let mut depth = 0;
        let mut current = self.get(id)?.parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.get(parent)?.parent;
        }
        Ok(depth)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FrameId, &FrameTemplate)> {
        // push() keeps the arena within u16 range
        (0..=u16::MAX).map(FrameId).zip(self.templates.iter())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]
mod tests;
