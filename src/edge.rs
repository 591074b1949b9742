//! Edge types.
//!
//! Edges form a closed set of variants sharing a capability set: every
//! edge has a source and target; only some carry a timestamp, a weight or
//! attributes. Callers query a capability instead of matching on the
//! concrete variant.

use crate::node::Attributes;
use serde::{Deserialize, Serialize};

/// Weight assigned to edges that don't specify one.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// An edge between two node keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Edge<K, T> {
    /// Untimed, unweighted edge (static graphs).
    Plain { source: K, target: K },
    /// Timestamped, weighted edge with free-form attributes.
    Attributed {
        source: K,
        target: K,
        timestamp: T,
        weight: f64,
        attributes: Attributes,
    },
    /// Timestamped edge.
    Timed { source: K, target: K, timestamp: T },
    /// Timestamped edge with a weight.
    WeightedTimed {
        source: K,
        target: K,
        weight: f64,
        timestamp: T,
    },
}

impl<K, T> Edge<K, T> {
    /// Create a plain edge.
    pub fn plain(source: K, target: K) -> Self {
        Self::Plain { source, target }
    }

    /// Create a timestamped edge.
    pub fn timed(source: K, target: K, timestamp: T) -> Self {
        Self::Timed {
            source,
            target,
            timestamp,
        }
    }

    /// Create a weighted timestamped edge.
    pub fn weighted(source: K, target: K, weight: f64, timestamp: T) -> Self {
        Self::WeightedTimed {
            source,
            target,
            weight,
            timestamp,
        }
    }

    pub fn source(&self) -> &K {
        match self {
            Self::Plain { source, .. }
            | Self::Attributed { source, .. }
            | Self::Timed { source, .. }
            | Self::WeightedTimed { source, .. } => source,
        }
    }

    pub fn target(&self) -> &K {
        match self {
            Self::Plain { target, .. }
            | Self::Attributed { target, .. }
            | Self::Timed { target, .. }
            | Self::WeightedTimed { target, .. } => target,
        }
    }

    /// Timestamp, if this variant carries one.
    pub fn timestamp(&self) -> Option<&T> {
        match self {
            Self::Plain { .. } => None,
            Self::Attributed { timestamp, .. }
            | Self::Timed { timestamp, .. }
            | Self::WeightedTimed { timestamp, .. } => Some(timestamp),
        }
    }

    /// Weight, if this variant carries one.
    pub fn weight(&self) -> Option<f64> {
        match self {
            Self::Attributed { weight, .. } | Self::WeightedTimed { weight, .. } => Some(*weight),
            Self::Plain { .. } | Self::Timed { .. } => None,
        }
    }

    /// Weight used for matrix projection (`DEFAULT_WEIGHT` when absent).
    pub fn effective_weight(&self) -> f64 {
        self.weight().unwrap_or(DEFAULT_WEIGHT)
    }

    pub fn attributes(&self) -> Option<&Attributes> {
        match self {
            Self::Attributed { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    /// Whether this edge is active at `time`.
    pub fn active_at(&self, time: &T) -> bool
    where
        T: PartialEq,
    {
        self.timestamp().is_some_and(|t| t == time)
    }

    /// Whether this edge falls in the inclusive window `[start, end]`.
    pub fn in_window(&self, start: &T, end: &T) -> bool
    where
        T: PartialOrd,
    {
        self.timestamp().is_some_and(|t| t >= start && t <= end)
    }
}
