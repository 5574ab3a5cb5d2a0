//! Entity identifier type.
//!
//! An [`EntityId`] is a lightweight `u32` key with no inherent data. The
//! sparse set never allocates or recycles IDs; whoever owns the entity
//! lifecycle hands them in.

use serde::{Deserialize, Serialize};

/// An opaque entity identifier.
///
/// IDs are used directly as indices into the sparse side of a
/// [`SparseSet`](crate::SparseSet), so small, densely allocated values keep
/// the page table short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create an identifier from a raw `u32`.
    #[must_use]
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw `u32` value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the identifier as an array index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<EntityId> for u32 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}
