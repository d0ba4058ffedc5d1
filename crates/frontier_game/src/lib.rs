//! # frontier_game
//!
//! The game layer on top of the ECS and replication crates:
//!
//! - [`components`] — the closed component set and its typed accessors.
//! - [`stats`] — static tuning tables for entity and item kinds.
//! - [`ballistics`] — the muzzle-velocity and kinetic-energy model.
//! - [`library`] — entity composition recipes (composition, no inheritance).
//! - [`systems`] — movement, reaction, combat, and production.
//! - [`server`] — [`ServerState`], the single writer driving everything.
//! - [`intent`] — the FIFO queue of inbound observer intents.
//! - [`worldgen`] — seeded scenery scatter.

pub mod ballistics;
pub mod components;
pub mod intent;
pub mod library;
pub mod server;
pub mod stats;
pub mod systems;
pub mod worldgen;

pub use components::{ComponentAccess, ComponentKind, GameComponent};
pub use intent::IntentQueue;
pub use server::{GameContext, ServerState, WORLD_HALF_EXTENT};
