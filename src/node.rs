//! Node types for evolving graphs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Free-form attributes attached to nodes and edges.
pub type Attributes = HashMap<String, serde_json::Value>;

/// Anything usable as a node key.
pub trait NodeKey: Clone + Eq + Hash + fmt::Debug {}

impl<K: Clone + Eq + Hash + fmt::Debug> NodeKey for K {}

/// Anything usable as a timestamp. `Ord` defines what "sorted" means.
pub trait Timestamp: Clone + Ord + Hash + fmt::Debug {}

impl<T: Clone + Ord + Hash + fmt::Debug> Timestamp for T {}

/// A node in a graph.
///
/// Identity is the key alone: two nodes compare equal when their keys do,
/// regardless of index or attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node<K> {
    /// Dense position in the owning graph; `None` while detached.
    pub index: Option<usize>,
    /// User-facing identity, unique within a graph.
    pub key: K,
    /// Additional properties as key-value pairs.
    #[serde(default)]
    pub attributes: Attributes,
}

impl<K> Node<K> {
    /// Create a detached node.
    pub fn new(key: K) -> Self {
        Self {
            index: None,
            key,
            attributes: Attributes::new(),
        }
    }

    pub(crate) fn attached(index: usize, key: K) -> Self {
        Self {
            index: Some(index),
            key,
            attributes: Attributes::new(),
        }
    }

    /// Add a property.
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Whether the node has been registered in a graph.
    pub fn is_attached(&self) -> bool {
        self.index.is_some()
    }
}

impl<K: PartialEq> PartialEq for Node<K> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: Eq> Eq for Node<K> {}

impl<K: Hash> Hash for Node<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl<K: fmt::Display> fmt::Display for Node<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)
    }
}

/// A node observed at a specific timestamp.
///
/// The unit of identity for temporal traversal: the same key at two
/// timestamps gives two distinct `TimeNode`s.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeNode<K, T> {
    pub key: K,
    pub timestamp: T,
}

impl<K, T> TimeNode<K, T> {
    pub fn new(key: K, timestamp: T) -> Self {
        Self { key, timestamp }
    }
}

impl<K: Ord, T: Ord> PartialOrd for TimeNode<K, T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, T: Ord> Ord for TimeNode<K, T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| self.key.cmp(&other.key))
    }
}

impl<K: fmt::Display, T: fmt::Display> fmt::Display for TimeNode<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.key, self.timestamp)
    }
}
