//! # frontier_net
//!
//! The state-replication layer: the authoritative [`WorldState`] container,
//! the ordered log of [`Action`] mutations that mirrors it to remote
//! observers, and the JSON wire frames both sides exchange.
//!
//! This crate provides:
//!
//! - [`Action`] — one recorded, replayable mutation to the container.
//! - [`WorldState`] — the replicated aggregate, writer or mirror by [`Role`].
//! - [`TaggedMap`] — the lossless `{dataType:"Map"}` map encoding.
//! - [`ComponentView`] — named component projections written by the ECS.
//! - [`frames`] — server frames, inbound intents, transient instants.
//! - [`Replicator`] — per-observer snapshot-then-deltas session tracking.
//! - [`codec`] — JSON encode/decode helpers.
//!
//! The transport that moves encoded frames is out of scope; it only has to
//! deliver each frame once, in order, per observer.

pub mod action;
pub mod codec;
pub mod error;
pub mod frames;
pub mod id;
pub mod kind;
pub mod replicate;
pub mod state;
pub mod tagged;
pub mod view;

pub use action::Action;
pub use codec::{decode, encode};
pub use error::NetError;
pub use frames::{ClientFrame, InstantEvent, Intent, ServerFrame};
pub use id::{FixtureId, ItemId};
pub use kind::{EntityKind, FixtureKind, InstantKind, ItemKind};
pub use replicate::{ObserverId, Replicator};
pub use state::{EntityRecord, FixtureRecord, ItemRecord, Role, WorldState};
pub use tagged::TaggedMap;
pub use view::{Ability, CombatStance, ComponentView, OrderView};
