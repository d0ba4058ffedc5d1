//! The component contract.
//!
//! A game defines one closed enum of component kinds (the tag) and one closed
//! enum of component values, and implements [`Component`] on the value enum.
//! The closed tag enum is what guarantees "a given kind appears at most once
//! per entity" — there is no runtime tag registry to collide in.

use std::fmt::Debug;
use std::hash::Hash;

/// A component kind tag.
///
/// Implemented by a closed, game-defined enum. Tags key the per-kind entity
/// index inside the [`World`](crate::World) and name the dependencies of a
/// [`System`](crate::System).
pub trait ComponentTag: Copy + Eq + Hash + Debug + Send + Sync + 'static {}

/// A tagged component value.
///
/// Implemented by a closed, game-defined enum with one variant per component
/// kind. Each value reports the tag of its variant; the [`World`](crate::World)
/// stores at most one value per tag per entity.
pub trait Component: Send + Sync + 'static {
    /// The tag enum for this component family.
    type Tag: ComponentTag;

    /// Returns the tag of this component value.
    fn tag(&self) -> Self::Tag;
}
