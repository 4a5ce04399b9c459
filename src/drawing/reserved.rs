//! Preservation of attributes the typed model does not bind.
//!
//! OOXML schemas are large and evolve over time; a model that binds only a
//! subset of attributes must still not lose the rest on a read/edit/write
//! cycle. Every modeled element therefore carries a side-table of the
//! attributes observed on its opening tag that were not routed to a typed
//! field. Entries keep the qualified name exactly as written and are
//! re-emitted unchanged, in input order, after the modeled attributes.

use smallvec::SmallVec;

/// A single preserved attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedAttr {
    /// Qualified name exactly as written in the source (prefix included)
    pub name: String,
    /// Resolved namespace URI when the attribute was prefixed
    pub namespace: Option<String>,
    /// Unescaped attribute value; empty when the source value was empty
    pub value: String,
}

impl ReservedAttr {
    /// Create an unqualified attribute entry.
    #[inline]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            value: value.into(),
        }
    }

    /// The local part of the attribute name.
    #[inline]
    pub fn local_name(&self) -> &str {
        match self.name.split_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }
}

/// Ordered collection of attributes not bound to a typed field.
///
/// Never deduplicates, never reorders. An element rarely carries more than
/// a couple of these, so the backing store is a small inline vector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReservedAttributes {
    attrs: SmallVec<[ReservedAttr; 2]>,
}

impl ReservedAttributes {
    /// Create an empty collection.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute, preserving insertion order.
    #[inline]
    pub fn push(&mut self, attr: ReservedAttr) {
        self.attrs.push(attr);
    }

    /// Iterate entries in insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &ReservedAttr> {
        self.attrs.iter()
    }

    /// Whether an attribute with the given local name is present.
    #[inline]
    pub fn contains(&self, local_name: &str) -> bool {
        self.attrs.iter().any(|a| a.local_name() == local_name)
    }

    /// Value of the first attribute with the given local name.
    #[inline]
    pub fn get(&self, local_name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.local_name() == local_name)
            .map(|a| a.value.as_str())
    }

    /// Number of preserved attributes.
    #[inline]
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Whether the collection is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

impl FromIterator<ReservedAttr> for ReservedAttributes {
    fn from_iter<I: IntoIterator<Item = ReservedAttr>>(iter: I) -> Self {
        Self {
            attrs: iter.into_iter().collect(),
        }
    }
}
