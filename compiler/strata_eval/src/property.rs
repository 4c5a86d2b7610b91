//! Ambient property lookup.
//!
//! The host owns objects. The interpreter only asks a [`PropertyResolver`]
//! for `base.name` on dot reads, and for `receiver.name` when lexical
//! resolution runs out of frames.

use rustc_hash::FxHashMap;
use strata_ir::{Multiname, QualifiedName};

use crate::{ObjectId, Value};

/// The resolver has no property for the requested multiname.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("property not found")]
pub struct PropertyNotFound;

/// Host-provided property lookup.
pub trait PropertyResolver {
    fn read_property(&self, base: &Value, name: &Multiname) -> Result<Value, PropertyNotFound>;
}

/// Receiver and resolver consulted when lexical lookup exhausts the environment.
#[derive(Clone, Copy)]
pub struct Ambient<'a> {
    pub receiver: &'a Value,
    pub resolver: &'a dyn PropertyResolver,
}

impl<'a> Ambient<'a> {
    pub fn new(receiver: &'a Value, resolver: &'a dyn PropertyResolver) -> Self {
        Ambient { receiver, resolver }
    }

    #[inline]
    pub fn lookup(&self, name: &Multiname) -> Result<Value, PropertyNotFound> {
        self.resolver.read_property(self.receiver, name)
    }
}

/// Simple host-side property store keyed by object handle and qualified name.
///
/// Qualified lookups try the multiname's namespaces in order.
#[derive(Clone, Debug, Default)]
pub struct PropertyTable {
    properties: FxHashMap<(ObjectId, QualifiedName), Value>,
}

impl PropertyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, object: ObjectId, name: QualifiedName, value: Value) {
        self.properties.insert((object, name), value);
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl PropertyResolver for PropertyTable {
    fn read_property(&self, base: &Value, name: &Multiname) -> Result<Value, PropertyNotFound> {
        let Value::Object(object) = *base else {
            return Err(PropertyNotFound);
        };
        if !name.is_qualified() {
            return self
                .properties
                .get(&(object, QualifiedName::unqualified(name.name())))
                .cloned()
                .ok_or(PropertyNotFound);
        }
        name.namespaces()
            .iter()
            .find_map(|&ns| {
                self.properties
                    .get(&(object, QualifiedName::qualified(ns, name.name())))
            })
            .cloned()
            .ok_or(PropertyNotFound)
    }
}
