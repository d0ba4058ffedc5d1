//! ECS error types.

use crate::entity::EntityId;

/// Errors raised by [`World`](crate::World) bookkeeping.
///
/// These are setup-time errors: a correctly composed entity library never
/// produces them at steady state.
#[derive(Debug, thiserror::Error)]
pub enum EcsError {
    /// The referenced entity is not in the entity table.
    #[error("{0} not found")]
    UnknownEntity(EntityId),

    /// A component of this kind is already attached to the entity.
    #[error("component {tag} already attached to {entity}")]
    DuplicateComponent {
        /// The entity the attach was aimed at.
        entity: EntityId,
        /// Debug rendering of the duplicate tag.
        tag: String,
    },
}
