//! Identifiers for replicated records that are not ECS entities.
//!
//! Entity ids come from [`frontier_ecs::EntityId`]; items and fixtures have
//! their own id spaces, allocated by the server, unique for the process
//! lifetime.

use serde::{Deserialize, Serialize};

/// Identifier of a freestanding item record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item:{}", self.0)
    }
}

/// Identifier of a static scenery fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FixtureId(pub u64);

impl std::fmt::Display for FixtureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fixture:{}", self.0)
    }
}
