//! Stepwise movement toward the ordered target.

use frontier_ecs::{EntityId, System, World};

use crate::components::{ComponentAccess, ComponentKind, GameComponent};
use crate::server::GameContext;

/// Moves entities toward their target by `speed / tick_rate` per tick.
///
/// Entities inside the dead zone are not visited with a write: neither the
/// ECS position nor the replicated projection changes once arrived.
pub struct MovementSystem;

impl System<GameComponent, GameContext> for MovementSystem {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn dependencies(&self) -> &'static [ComponentKind] {
        &[ComponentKind::Position, ComponentKind::Movement]
    }

    fn on_tick(&mut self, entity: EntityId, world: &mut World<GameComponent>, ctx: &mut GameContext) {
        let Some(speed) = world.movement(entity).map(|m| m.speed) else {
            return;
        };
        let step = speed / ctx.state.tick_rate().max(1) as f32;
        let Some(position) = world.position_mut(entity) else {
            return;
        };
        if !position.is_moving() {
            return;
        }
        let difference = position.target() - position.position;
        let magnitude = difference.length();
        let movement = if magnitude < step {
            difference
        } else {
            difference / magnitude * step
        };
        position.position += movement;
        let view = position.view();
        ctx.state.set_component(entity, view);
    }
}
