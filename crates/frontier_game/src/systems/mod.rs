//! Simulation systems.
//!
//! Each system declares the component tags an entity must carry and is run by
//! the schedule once per eligible entity. Fast-tick systems run every tick;
//! perception and weapon re-evaluation run on the slow cadence.

mod combat;
mod movement;
mod production;
mod reaction;

pub use combat::CombatSystem;
pub use movement::MovementSystem;
pub use production::ProductionSystem;
pub use reaction::ReactionSystem;
