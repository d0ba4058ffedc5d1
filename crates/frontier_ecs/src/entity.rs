//! Entity identifiers and allocation.
//!
//! An [`EntityId`] is a plain `u64` with no inherent data; components attached
//! through the [`World`](crate::World) give it meaning. Ids are unique for the
//! lifetime of the process and are never reused.

use serde::{Deserialize, Serialize};

/// A unique entity identifier.
///
/// Ids are allocated by the simulation's single [`EntityAllocator`] and are
/// process-lifetime unique — they are not globally unique and deleted ids are
/// not recycled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Create an entity id from a raw `u64`.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` identifier.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entity:{}", self.0)
    }
}

/// Hands out monotonically increasing entity ids.
///
/// One allocator lives inside the authoritative [`World`](crate::World); it is
/// the single source of entity identity for the process.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    next_id: u64,
}

impl EntityAllocator {
    /// Creates a new allocator. The first allocated id is 1.
    #[must_use]
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Allocates a fresh entity id.
    pub fn allocate(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        EntityId(id)
    }

    /// Returns the number of ids allocated so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.next_id.saturating_sub(1)
    }
}
