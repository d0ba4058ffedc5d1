//! Factory order processing.

use frontier_ecs::{EntityId, System, World};
use glam::Vec2;
use tracing::{error, info};

use crate::components::{ComponentAccess, ComponentKind, GameComponent};
use crate::server::{spawn_entity, GameContext};

/// Advances the head production order by one tick's worth of seconds.
///
/// A finished order spawns its kind at the producer's position, on the
/// producer's team. The queue projection is refreshed every tick the queue
/// is non-empty so observers watch the completion fraction climb.
pub struct ProductionSystem;

impl System<GameComponent, GameContext> for ProductionSystem {
    fn name(&self) -> &'static str {
        "production"
    }

    fn dependencies(&self) -> &'static [ComponentKind] {
        &[ComponentKind::Factory]
    }

    fn on_tick(&mut self, entity: EntityId, world: &mut World<GameComponent>, ctx: &mut GameContext) {
        let dt = 1.0 / f64::from(ctx.state.tick_rate().max(1));
        let (produced, view) = {
            let Some(factory) = world.factory_mut(entity) else {
                return;
            };
            if factory.is_empty() {
                return;
            }
            (factory.advance_head(dt), factory.view())
        };
        ctx.state.set_component(entity, view);

        let Some(kind) = produced else {
            return;
        };
        let team = world.team(entity).map_or(-1, |t| t.team);
        let position = world.position(entity).map_or(Vec2::ZERO, |p| p.position);
        match spawn_entity(world, ctx, kind, position, team) {
            Ok(id) => info!(producer = %entity, produced = %id, ?kind, "production complete"),
            Err(error) => error!(%error, ?kind, "production spawn failed"),
        }
    }
}
