//! Engagement resolution and attacks.

use frontier_ecs::{EntityId, System, World};
use frontier_net::{InstantEvent, InstantKind, ItemId, ItemKind};
use glam::Vec2;
use rand::Rng;
use tracing::{debug, info};

use crate::ballistics::kinetic_energy;
use crate::components::{ComponentAccess, ComponentKind, GameComponent, WeaponChoice};
use crate::server::GameContext;
use crate::stats::{item_stats, ItemStats, WeaponStats, FISTS};

/// Resolves engaged combatants once per tick.
///
/// Fast tick: drop dead targets, resolve the weapon lazily, gate on movement,
/// consume ammunition, apply kinetic damage, and emit a tracer instant. Slow
/// tick: re-pick the weapon and break engagements the senses can no longer
/// hold.
pub struct CombatSystem {
    /// Attack direction jitter, uniform in `±jitter_degrees`.
    jitter_degrees: f32,
    /// Tracer velocity magnitude, world units per second.
    tracer_speed: f32,
}

impl Default for CombatSystem {
    fn default() -> Self {
        Self {
            jitter_degrees: 3.0,
            tracer_speed: 2000.0,
        }
    }
}

impl CombatSystem {
    #[must_use]
    pub fn new(jitter_degrees: f32, tracer_speed: f32) -> Self {
        Self {
            jitter_degrees,
            tracer_speed,
        }
    }

    fn attack(
        &mut self,
        entity: EntityId,
        target: EntityId,
        weapon: &'static WeaponStats,
        world: &mut World<GameComponent>,
        ctx: &mut GameContext,
    ) {
        let energy = match weapon.ammo {
            Some(ammo_kind) => {
                let Some((item_id, quantity)) = loaded_ammo(world, ctx, entity, ammo_kind) else {
                    debug!(%entity, "out of ammunition");
                    disengage(world, ctx, entity);
                    return;
                };
                ctx.state.set_item_quantity(item_id, quantity - 1);
                let ItemStats::Ammo(ammo) = item_stats(ammo_kind) else {
                    return;
                };
                self.emit_tracer(entity, target, world, ctx);
                kinetic_energy(weapon, ammo)
            }
            // Unarmed strikes carry no energy and leave no tracer.
            None => 0.0,
        };

        let Some(health) = world.health_mut(target) else {
            disengage(world, ctx, entity);
            return;
        };
        let dead = health.take_damage(energy);
        let view = health.view();
        ctx.state.set_component(target, view);
        if dead {
            info!(%target, "entity destroyed");
            world.despawn(target);
            ctx.state.delete_entity(target);
        }
    }

    fn emit_tracer(
        &mut self,
        entity: EntityId,
        target: EntityId,
        world: &World<GameComponent>,
        ctx: &mut GameContext,
    ) {
        let Some(origin) = world.position(entity).map(|p| p.position) else {
            return;
        };
        let Some(target_position) = world.position(target).map(|p| p.position) else {
            return;
        };
        let direction = (target_position - origin).normalize_or_zero();
        let jitter = ctx
            .rng
            .gen_range(-self.jitter_degrees..=self.jitter_degrees)
            .to_radians();
        let velocity = Vec2::from_angle(jitter).rotate(direction) * self.tracer_speed;
        let team = world.team(entity).map_or(-1, |t| t.team);
        ctx.instants.push(InstantEvent {
            kind: InstantKind::AttackBulletLight,
            origin,
            velocity,
            team,
        });
    }
}

impl System<GameComponent, GameContext> for CombatSystem {
    fn name(&self) -> &'static str {
        "combat"
    }

    fn dependencies(&self) -> &'static [ComponentKind] {
        &[ComponentKind::Combat]
    }

    fn on_tick(&mut self, entity: EntityId, world: &mut World<GameComponent>, ctx: &mut GameContext) {
        let Some(combat) = world.combat(entity).copied() else {
            return;
        };
        let Some(target) = combat.target() else {
            return;
        };
        if !world.contains(target) || world.health(target).is_none() {
            disengage(world, ctx, entity);
            return;
        }

        let choice = match combat.weapon() {
            Some(choice) => choice,
            None => {
                let choice = best_weapon(world, ctx, entity);
                if let Some(combat) = world.combat_mut(entity) {
                    combat.set_weapon(choice);
                }
                choice
            }
        };
        let weapon = match choice {
            WeaponChoice::Unarmed => &FISTS,
            WeaponChoice::Weapon(kind) => match item_stats(kind) {
                ItemStats::Weapon(stats) => stats,
                _ => &FISTS,
            },
        };

        let moving = world.position(entity).is_some_and(|p| p.is_moving());
        if moving && !weapon.use_while_moving {
            return;
        }
        self.attack(entity, target, weapon, world, ctx);
    }

    fn on_tick_slow(
        &mut self,
        entity: EntityId,
        world: &mut World<GameComponent>,
        ctx: &mut GameContext,
    ) {
        let choice = best_weapon(world, ctx, entity);
        if let Some(combat) = world.combat_mut(entity) {
            combat.set_weapon(choice);
        }

        // Break the engagement once the target leaves sensing range.
        let Some(target) = world.combat(entity).and_then(|c| c.target()) else {
            return;
        };
        let Some(range) = world.senses(entity).map(|s| s.range) else {
            return;
        };
        let Some(position) = world.position(entity).map(|p| p.position) else {
            return;
        };
        match world.position(target).map(|p| p.position) {
            Some(target_position) if position.distance(target_position) <= range => {}
            _ => disengage(world, ctx, entity),
        }
    }
}

/// First weapon item in the inventory, or fists.
fn best_weapon(
    world: &World<GameComponent>,
    ctx: &GameContext,
    entity: EntityId,
) -> WeaponChoice {
    let Some(inventory) = world.inventory(entity) else {
        return WeaponChoice::Unarmed;
    };
    inventory
        .items()
        .iter()
        .filter_map(|item_id| ctx.state.item(*item_id))
        .find_map(|record| {
            matches!(item_stats(record.kind), ItemStats::Weapon(_))
                .then_some(WeaponChoice::Weapon(record.kind))
        })
        .unwrap_or(WeaponChoice::Unarmed)
}

/// First held stack of the given ammunition kind with rounds remaining.
fn loaded_ammo(
    world: &World<GameComponent>,
    ctx: &GameContext,
    entity: EntityId,
    kind: ItemKind,
) -> Option<(ItemId, u32)> {
    let inventory = world.inventory(entity)?;
    inventory.items().iter().find_map(|item_id| {
        let record = ctx.state.item(*item_id)?;
        (record.kind == kind && record.quantity > 0).then_some((*item_id, record.quantity))
    })
}

fn disengage(world: &mut World<GameComponent>, ctx: &mut GameContext, entity: EntityId) {
    let Some(combat) = world.combat_mut(entity) else {
        return;
    };
    if combat.target().is_none() {
        return;
    }
    combat.disengage();
    let view = combat.view();
    ctx.state.set_component(entity, view);
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontier_net::{CombatStance, EntityKind};

    use crate::library::compose;

    struct Arena {
        world: World<GameComponent>,
        ctx: GameContext,
        attacker: EntityId,
        target: EntityId,
        ammo: ItemId,
    }

    fn armed_arena(rounds: u32) -> Arena {
        let mut world = World::new();
        let mut ctx = GameContext::new(7);
        let attacker = compose(&mut world, EntityKind::Pawn, Vec2::ZERO, 0).unwrap();
        let target = compose(&mut world, EntityKind::Pawn, Vec2::new(30.0, 0.0), 1).unwrap();

        let rifle = ctx.allocate_item_id();
        ctx.state.create_item(rifle, ItemKind::Win1906, 1);
        let ammo = ctx.allocate_item_id();
        ctx.state.create_item(ammo, ItemKind::Ammo22Short, rounds);
        let inventory = world.inventory_mut(attacker).unwrap();
        inventory.add(rifle);
        inventory.add(ammo);
        let target_health = world.health(target).copied();
        world
            .combat_mut(attacker)
            .unwrap()
            .engage(target, target_health);

        Arena {
            world,
            ctx,
            attacker,
            target,
            ammo,
        }
    }

    #[test]
    fn test_each_shot_costs_one_round_and_kinetic_damage() {
        let mut arena = armed_arena(10);
        let mut system = CombatSystem::default();
        system.on_tick(arena.attacker, &mut arena.world, &mut arena.ctx);

        assert_eq!(arena.ctx.state.item(arena.ammo).unwrap().quantity, 9);
        let health = arena.world.health(arena.target).unwrap().health;
        // One .22 Short from the rifle: about 118.6 J, 0.2965 health.
        assert!((health - (1.0 - 118.60 / 400.0)).abs() < 0.01, "health {health}");
        assert_eq!(arena.ctx.instants.len(), 1);
    }

    #[test]
    fn test_target_dies_and_is_deleted_on_fourth_hit() {
        let mut arena = armed_arena(10);
        let mut system = CombatSystem::default();
        for _ in 0..4 {
            system.on_tick(arena.attacker, &mut arena.world, &mut arena.ctx);
        }
        assert!(!arena.world.contains(arena.target));
        assert!(arena.ctx.state.entity(arena.target).is_none());
        assert_eq!(arena.ctx.state.item(arena.ammo).unwrap().quantity, 6);
    }

    #[test]
    fn test_exhausted_ammo_forces_disengage() {
        let mut arena = armed_arena(2);
        let mut system = CombatSystem::default();
        for _ in 0..3 {
            system.on_tick(arena.attacker, &mut arena.world, &mut arena.ctx);
        }
        assert_eq!(arena.ctx.state.item(arena.ammo).unwrap().quantity, 0);
        let combat = arena.world.combat(arena.attacker).unwrap();
        assert_eq!(combat.stance(), CombatStance::Idle);
        // Target survived the two hits.
        assert!(arena.world.contains(arena.target));
    }

    #[test]
    fn test_rifle_holds_fire_while_moving() {
        let mut arena = armed_arena(10);
        arena
            .world
            .position_mut(arena.attacker)
            .unwrap()
            .set_target(Vec2::new(200.0, 0.0));
        let mut system = CombatSystem::default();
        system.on_tick(arena.attacker, &mut arena.world, &mut arena.ctx);

        assert_eq!(arena.ctx.state.item(arena.ammo).unwrap().quantity, 10);
        // Still engaged, just waiting to stop.
        assert_eq!(
            arena.world.combat(arena.attacker).unwrap().stance(),
            CombatStance::Engaged
        );
    }

    #[test]
    fn test_despawned_target_drops_engagement() {
        let mut arena = armed_arena(10);
        arena.world.despawn(arena.target);
        let mut system = CombatSystem::default();
        system.on_tick(arena.attacker, &mut arena.world, &mut arena.ctx);
        assert_eq!(
            arena.world.combat(arena.attacker).unwrap().stance(),
            CombatStance::Idle
        );
    }

    #[test]
    fn test_unarmed_attack_consumes_nothing() {
        let mut world = World::new();
        let mut ctx = GameContext::new(7);
        let attacker = compose(&mut world, EntityKind::Pawn, Vec2::ZERO, 0).unwrap();
        let target = compose(&mut world, EntityKind::Pawn, Vec2::new(10.0, 0.0), 1).unwrap();
        let target_health = world.health(target).copied();
        world
            .combat_mut(attacker)
            .unwrap()
            .engage(target, target_health);

        CombatSystem::default().on_tick(attacker, &mut world, &mut ctx);
        assert_eq!(world.health(target).unwrap().health, 1.0);
        assert!(ctx.instants.is_empty());
    }

    #[test]
    fn test_slow_tick_disengages_out_of_range_target() {
        let mut arena = armed_arena(10);
        arena.world.position_mut(arena.target).unwrap().position = Vec2::new(500.0, 0.0);
        let mut system = CombatSystem::default();
        system.on_tick_slow(arena.attacker, &mut arena.world, &mut arena.ctx);
        assert_eq!(
            arena.world.combat(arena.attacker).unwrap().stance(),
            CombatStance::Idle
        );
    }
}
