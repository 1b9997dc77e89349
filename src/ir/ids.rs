//! Newtype IDs for components.
//!
//! Ids are strings on the wire (`comp_000`, `comp_001`, ...) because canvas
//! clients may send their own, but within one request they are treated as
//! opaque unique keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A unique identifier for a component within one conversion request.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(pub String);

impl ComponentId {
    /// Creates a new ComponentId.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates the sequential id for the `index`-th component (`comp_007`).
    pub fn from_index(index: usize) -> Self {
        Self(format!("comp_{:03}", index))
    }

    /// Returns the id as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentId({})", self.0)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(id: &str) -> Self {
        ComponentId::new(id)
    }
}

impl From<String> for ComponentId {
    fn from(id: String) -> Self {
        ComponentId(id)
    }
}
