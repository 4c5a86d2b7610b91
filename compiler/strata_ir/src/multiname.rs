//! Namespace-qualified name references and the per-unit multiname table.

use std::fmt;

use smallvec::SmallVec;

use crate::{LoadError, Name, StringInterner};

/// A namespace qualifier (interned).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Namespace(pub Name);

/// The name a binding is declared under: a local name plus at most one namespace.
///
/// `namespace: None` is an unqualified binding.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub namespace: Option<Namespace>,
    pub name: Name,
}

impl QualifiedName {
    pub fn unqualified(name: Name) -> Self {
        QualifiedName {
            namespace: None,
            name,
        }
    }

    pub fn qualified(namespace: Namespace, name: Name) -> Self {
        QualifiedName {
            namespace: Some(namespace),
            name,
        }
    }

    /// Render as `ns::name` or `name`.
    pub fn to_text(&self, interner: &StringInterner) -> String {
        match self.namespace {
            Some(ns) => format!("{}::{}", interner.lookup(ns.0), interner.lookup(self.name)),
            None => interner.lookup(self.name).to_string(),
        }
    }
}

/// A compiled name reference: a local name and an ordered namespace set.
///
/// An empty namespace set is an unqualified reference. Read or write usage is
/// decided by the instruction, not stored here.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Multiname {
    name: Name,
    namespaces: SmallVec<[Namespace; 2]>,
}

impl Multiname {
    /// Create a multiname. Duplicate namespaces are dropped, first occurrence wins.
    pub fn new(name: Name, namespaces: impl IntoIterator<Item = Namespace>) -> Self {
        let mut set: SmallVec<[Namespace; 2]> = SmallVec::new();
        for ns in namespaces {
            if !set.contains(&ns) {
                set.push(ns);
            }
        }
        Multiname {
            name,
            namespaces: set,
        }
    }

    pub fn unqualified(name: Name) -> Self {
        Multiname {
            name,
            namespaces: SmallVec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> Name {
        self.name
    }

    /// Namespaces in priority order.
    #[inline]
    pub fn namespaces(&self) -> &[Namespace] {
        &self.namespaces
    }

    #[inline]
    pub fn is_qualified(&self) -> bool {
        !self.namespaces.is_empty()
    }

    /// Whether a binding declared as `binding` answers to this reference.
    ///
    /// A qualified binding matches if its namespace is in the set; an
    /// unqualified binding matches only an unqualified reference.
    #[inline]
    pub fn matches(&self, binding: &QualifiedName) -> bool {
        if binding.name != self.name {
            return false;
        }
        match binding.namespace {
            Some(ns) => self.namespaces.contains(&ns),
            None => self.namespaces.is_empty(),
        }
    }

    /// The binding name a declaring write creates for this reference.
    ///
    /// Uses the highest-priority namespace, or none if unqualified.
    pub fn declaration_name(&self) -> QualifiedName {
        QualifiedName {
            namespace: self.namespaces.first().copied(),
            name: self.name,
        }
    }

    /// Render as `{ns1,ns2}::name` or `name`.
    pub fn to_text(&self, interner: &StringInterner) -> String {
        if self.namespaces.is_empty() {
            return interner.lookup(self.name).to_string();
        }
        let qualifiers: Vec<_> = self
            .namespaces
            .iter()
            .map(|ns| interner.lookup(ns.0))
            .collect();
        format!("{{{}}}::{}", qualifiers.join(","), interner.lookup(self.name))
    }
}

/// Index of a multiname within its unit's table (16-bit operand).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MultinameId(pub u16);

impl MultinameId {
    #[inline]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

impl fmt::Display for MultinameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mn#{}", self.0)
    }
}

/// Immutable catalogue of every multiname a code unit references.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultinameTable {
    entries: Vec<Multiname>,
}

impl MultinameTable {
    /// Build from already-constructed multinames.
    pub fn new(entries: Vec<Multiname>) -> Result<Self, LoadError> {
        if entries.len() > usize::from(u16::MAX) + 1 {
            return Err(LoadError::TableTooLarge { len: entries.len() });
        }
        Ok(MultinameTable { entries })
    }

    /// Build from a flat list of `(name, namespace set)` pairs.
    pub fn from_pairs<'s, I, N>(interner: &StringInterner, pairs: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = (&'s str, N)>,
        N: IntoIterator<Item = &'s str>,
    {
        let mut entries = Vec::new();
        for (name, namespaces) in pairs {
            let name = interner.try_intern(name)?;
            let mut set = Vec::new();
            for ns in namespaces {
                set.push(Namespace(interner.try_intern(ns)?));
            }
            entries.push(Multiname::new(name, set));
        }
        Self::new(entries)
    }

    /// Multiname at `index`.
    #[inline]
    pub fn resolve(&self, index: usize) -> Result<&Multiname, LoadError> {
        self.entries
            .get(index)
            .ok_or(LoadError::MultinameOutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    #[inline]
    pub fn get(&self, id: MultinameId) -> Result<&Multiname, LoadError> {
        self.resolve(id.index())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Multiname> {
        self.entries.iter()
    }
}
