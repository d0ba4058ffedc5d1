//! Entity composition recipes.
//!
//! There is no inheritance between kinds; a kind is nothing but the set of
//! components its recipe attaches. Recipes only build the ECS side — the
//! caller mirrors component projections into the replicated container.

use frontier_ecs::{EcsError, EntityId, World};
use frontier_net::EntityKind;
use glam::Vec2;

use crate::components::{
    Combat, Dimension, Factory, GameComponent, Health, Identity, Inventory, Movement, Position,
    Senses, Team,
};
use crate::stats::entity_stats;

/// Perception radius shared by every sensing recipe, world units.
const SENSE_RANGE: f32 = 100.0;

/// Composes an entity of the given kind.
///
/// # Errors
///
/// Returns an [`EcsError`] if a recipe attaches a duplicate component, which
/// indicates a broken recipe and surfaces at setup time.
pub fn compose(
    world: &mut World<GameComponent>,
    kind: EntityKind,
    position: Vec2,
    team: i32,
) -> Result<EntityId, EcsError> {
    let id = world.spawn();
    match kind {
        EntityKind::Dummy => {
            world.attach(id, GameComponent::Position(Position::new(position)))?;
            world.attach(
                id,
                GameComponent::Identity(Identity::new(
                    "Dummy",
                    "A generic dummy entity, generally used for testing purposes.",
                )),
            )?;
        }
        EntityKind::Pawn => {
            world.attach(id, GameComponent::Position(Position::new(position)))?;
            world.attach(
                id,
                GameComponent::Movement(Movement::new(entity_stats(kind).speed)),
            )?;
            world.attach(
                id,
                GameComponent::Identity(Identity::new(
                    "Pawn",
                    "A simple pawn which belongs to a team.",
                )),
            )?;
            world.attach(id, GameComponent::Team(Team::new(team)))?;
            world.attach(id, GameComponent::Senses(Senses::new(SENSE_RANGE)))?;
            world.attach(id, GameComponent::Inventory(Inventory::new()))?;
            world.attach(id, GameComponent::Health(Health::new()))?;
            world.attach(id, GameComponent::Combat(Combat::new()))?;
        }
        EntityKind::Settlement => {
            world.attach(id, GameComponent::Position(Position::new(position)))?;
            world.attach(
                id,
                GameComponent::Identity(Identity::new(
                    "Settlement",
                    "The main center building of a colony.",
                )),
            )?;
            world.attach(id, GameComponent::Team(Team::new(team)))?;
            world.attach(id, GameComponent::Dimension(Dimension::new(30.0, 60.0)))?;
            world.attach(id, GameComponent::Senses(Senses::new(SENSE_RANGE)))?;
            world.attach(id, GameComponent::Inventory(Inventory::new()))?;
            world.attach(id, GameComponent::Health(Health::new()))?;
            world.attach(
                id,
                GameComponent::Factory(Factory::new(vec![EntityKind::Pawn])),
            )?;
        }
    }
    Ok(id)
}
