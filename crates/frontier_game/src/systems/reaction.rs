//! Opponent detection.

use frontier_ecs::{EntityId, System, World};
use frontier_spatial::Aabb;
use tracing::debug;

use crate::components::{ComponentAccess, ComponentKind, GameComponent};
use crate::server::GameContext;

/// Engages the nearest sensed opponent.
///
/// Runs on the slow cadence against the spatial index the server rebuilds
/// before each slow tick. The square query is a superset of the sense disc;
/// candidates are re-filtered by exact distance and sorted nearest first.
pub struct ReactionSystem;

impl System<GameComponent, GameContext> for ReactionSystem {
    fn name(&self) -> &'static str {
        "reaction"
    }

    fn dependencies(&self) -> &'static [ComponentKind] {
        &[ComponentKind::Position, ComponentKind::Senses, ComponentKind::Team]
    }

    fn on_tick_slow(
        &mut self,
        entity: EntityId,
        world: &mut World<GameComponent>,
        ctx: &mut GameContext,
    ) {
        let Some(position) = world.position(entity).map(|p| p.position) else {
            return;
        };
        let Some(range) = world.senses(entity).map(|s| s.range) else {
            return;
        };
        let Some(team_self) = world.team(entity).map(|t| t.team) else {
            return;
        };

        let mut sensed: Vec<(EntityId, f32)> = ctx
            .spatial
            .query(&Aabb::new(position, range))
            .into_iter()
            .filter(|(other, _, _)| *other != entity)
            .filter_map(|(other, other_position, _)| {
                let distance_sq = other_position.distance_squared(position);
                (distance_sq.sqrt() <= range).then_some((other, distance_sq))
            })
            .collect();
        sensed.sort_by(|a, b| a.1.total_cmp(&b.1));

        let opponent = sensed.iter().find_map(|(other, _)| {
            let team = world.team(*other)?.team;
            (team != team_self).then_some(*other)
        });
        let Some(opponent) = opponent else {
            return;
        };
        // Engage refuses undamageable targets and re-engagement.
        let opponent_health = world.health(opponent).copied();
        let Some(combat) = world.combat_mut(entity) else {
            return;
        };
        if !combat.engage(opponent, opponent_health) {
            return;
        }
        debug!(%entity, %opponent, "responding to sensed opponent");
        let view = combat.view();
        ctx.state.set_component(entity, view);
    }
}
