//! Run-time values.
//!
//! Only what binding resolution moves around: scalars, strings, multiname
//! references and opaque object handles. Object contents belong to the host.

use std::fmt;
use std::sync::Arc;

use strata_ir::{Constant, MultinameId, StringInterner};

/// Host-owned object handle.
///
/// The core never inspects objects; it passes handles to a
/// [`PropertyResolver`](crate::PropertyResolver).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId(pub u32);

/// A run-time value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Sentinel for a declared binding not yet definitionally reached.
    Uninitialized,
    Undefined,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    /// Reference to an entry of the running unit's multiname table.
    Multiname(MultinameId),
    Object(ObjectId),
}

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::Str(s.into())
    }

    #[inline]
    pub fn is_uninitialized(&self) -> bool {
        matches!(self, Value::Uninitialized)
    }

    /// Materialize a constant-pool entry.
    pub fn from_constant(constant: Constant, interner: &StringInterner) -> Self {
        match constant {
            Constant::Undefined => Value::Undefined,
            Constant::Null => Value::Null,
            Constant::Bool(b) => Value::Bool(b),
            Constant::Int(i) => Value::Int(i),
            Constant::Float(bits) => Value::Float(f64::from_bits(bits)),
            Constant::Str(name) => Value::Str(interner.lookup(name)),
        }
    }

    /// Short type label used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Uninitialized => "uninitialized",
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Multiname(_) => "multiname",
            Value::Object(_) => "object",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Uninitialized => f.write_str("<uninitialized>"),
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Multiname(id) => write!(f, "{id}"),
            Value::Object(ObjectId(id)) => write!(f, "<object {id}>"),
        }
    }
}
