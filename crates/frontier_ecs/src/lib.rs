//! # frontier_ecs
//!
//! The entity-component-system core of the authoritative simulation.
//!
//! Entities are opaque ids; components are values of a single closed enum
//! (one kind per entity, enforced by the per-tag storage); systems declare
//! the component kinds an entity must carry to be eligible and run once per
//! eligible entity per tick. There is no inheritance between entity kinds —
//! everything is composed from components.
//!
//! This crate provides:
//!
//! - [`EntityId`] — lightweight `u64` entity identifiers.
//! - [`EntityAllocator`] — monotonically increasing id allocator.
//! - [`Component`] / [`ComponentTag`] — the contract component enums satisfy.
//! - [`World`] — entity table plus per-tag index with intersection queries.
//! - [`System`] / [`Schedule`] — per-entity logic on fast and slow ticks.

pub mod component;
pub mod entity;
pub mod error;
pub mod system;
pub mod world;

pub use component::{Component, ComponentTag};
pub use entity::{EntityAllocator, EntityId};
pub use error::EcsError;
pub use system::{Schedule, System};
pub use world::World;
