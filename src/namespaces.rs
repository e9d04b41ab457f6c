//! XML namespace handling
//!
//! Qualified names (QNames), prefix resolution against in-scope namespace
//! declarations, and the insertion-ordered QName multimap consumed by the
//! XML mapping layer.

use crate::error::{Error, Result};
use crate::names;
use indexmap::IndexMap;
use std::collections::HashMap;

/// XML Namespace URI
pub type NamespaceUri = String;

/// Namespace prefix
pub type Prefix = String;

/// Qualified name (QName) - combination of namespace and local name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    /// Namespace URI (None for no namespace)
    pub namespace: Option<NamespaceUri>,
    /// Local name
    pub local_name: String,
}

impl QName {
    /// Create a new QName
    pub fn new(namespace: Option<impl Into<String>>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(|s| s.into()),
            local_name: local_name.into(),
        }
    }

    /// Create a QName without a namespace
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
        }
    }

    /// Create a QName with a namespace
    pub fn namespaced(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
        }
    }

    /// Parse a lexical QName, expanding the prefix through a resolver.
    ///
    /// An unprefixed name maps to no namespace; a prefixed name whose
    /// prefix the resolver does not know is a namespace error.
    pub fn parse(lexical: &str, resolver: &dyn PrefixResolver) -> Result<Self> {
        names::validate_qname(lexical)?;
        match names::split_qname(lexical) {
            (Some(prefix), local) => {
                let namespace = resolver
                    .resolve(prefix)
                    .ok_or_else(|| Error::Namespace(format!("unknown prefix: '{}'", prefix)))?;
                Ok(QName::namespaced(namespace, local))
            }
            (None, local) => Ok(QName::local(local)),
        }
    }
}

impl std::fmt::Display for QName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}

/// Capability to resolve a namespace prefix to a namespace URI.
///
/// This is the one interface consumed from the (out-of-scope) XML reading
/// layer, needed when a lexical value itself contains a prefixed name.
pub trait PrefixResolver {
    /// Resolve a prefix to its in-scope namespace URI, or None if unbound
    fn resolve(&self, prefix: &str) -> Option<&str>;
}

/// Namespace context for resolving prefixes
#[derive(Debug, Clone, Default)]
pub struct NamespaceContext {
    /// Mapping from prefix to namespace URI
    prefixes: HashMap<Prefix, NamespaceUri>,
    /// Default namespace (no prefix)
    default_namespace: Option<NamespaceUri>,
}

impl NamespaceContext {
    /// Create a new empty namespace context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a namespace prefix mapping
    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Set the default namespace
    pub fn set_default_namespace(&mut self, namespace: impl Into<String>) {
        self.default_namespace = Some(namespace.into());
    }

    /// Get the default namespace
    pub fn default_namespace(&self) -> Option<&str> {
        self.default_namespace.as_deref()
    }
}

impl PrefixResolver for NamespaceContext {
    fn resolve(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(|s| s.as_str())
    }
}

// =============================================================================
// QName Multimap
// =============================================================================

/// Insertion-ordered map keyed by QName.
///
/// At most one value per distinct key. The insertion order of first-seen
/// keys is preserved for iteration; re-putting an existing key updates the
/// value without changing its iteration position, and removal does not
/// shift the relative order of the surviving entries.
///
/// Not implicitly shared: concurrent mutation from multiple threads
/// requires external synchronization by the owner.
#[derive(Debug, Clone, Default)]
pub struct QNameMap<V> {
    entries: IndexMap<QName, V>,
}

impl<V> QNameMap<V> {
    /// Create a new empty map
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Insert or update the value for `(namespace, local_name)`.
    ///
    /// Returns the previous value if the key was already present.
    pub fn put(
        &mut self,
        namespace: Option<impl Into<String>>,
        local_name: impl Into<String>,
        value: V,
    ) -> Option<V> {
        self.entries.insert(QName::new(namespace, local_name), value)
    }

    /// Insert or update the value for a QName key
    pub fn put_qname(&mut self, key: QName, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Get the value for a key, if present
    pub fn get(&self, namespace: Option<&str>, local_name: &str) -> Option<&V> {
        self.entries.get(&QName::new(namespace, local_name))
    }

    /// Check whether a key is present
    pub fn contains_key(&self, namespace: Option<&str>, local_name: &str) -> bool {
        self.entries.contains_key(&QName::new(namespace, local_name))
    }

    /// Remove a key, preserving the relative order of the other entries.
    ///
    /// Returns the removed value if the key was present.
    pub fn remove(&mut self, namespace: Option<&str>, local_name: &str) -> Option<V> {
        self.entries
            .shift_remove(&QName::new(namespace, local_name))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the map holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    ///
    /// Each call yields a fresh traversal.
    pub fn entries(&self) -> impl Iterator<Item = (&QName, &V)> {
        self.entries.iter()
    }

    /// Iterate over keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &QName> {
        self.entries.keys()
    }

    /// Iterate over values in insertion order
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }
}
